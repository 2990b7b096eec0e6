pub mod app;
pub mod auth;
pub mod classifier;
pub mod config;
pub mod decoder;
pub mod error;
pub mod events;
pub mod history;
pub mod platform;
pub mod record;
pub mod session;

pub use app::{Command, Notice, ScannerApp, Screen, ShutdownReason};
pub use auth::{AuthProvider, AuthSession, AuthState, Identity, InMemoryAuthProvider};
pub use classifier::{classify, Classification, ContentType, ScanContent};
pub use config::QrScanConfig;
pub use decoder::{CodeFormat, DecodedCode};
pub use error::{AuthError, DispatchError, QrScanError, Result, ValidationError};
pub use events::{EventBus, EventFilter, EventMetrics, EventReceiver, ScanEvent};
pub use history::{HistoryBuilder, ScanHistory};
pub use platform::{
    ActionDispatcher, CameraPermissions, Clipboard, ConsolePlatform, DispatchOutcome, LinkOpener,
    MockPlatform,
};
pub use record::ScanRecord;
pub use session::{DecodeOutcome, ScanSession, ScanState};
