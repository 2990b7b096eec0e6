use crate::auth::{AuthProvider, AuthSession};
use crate::config::QrScanConfig;
use crate::error::Result;
use crate::events::EventBus;
use crate::history::{HistoryBuilder, ScanHistory};
use crate::platform::{ActionDispatcher, CameraPermissions, Clipboard, LinkOpener};
use crate::session::ScanSession;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Main application coordinator.
///
/// Owns the auth session, the shared history and the current scan session,
/// derives the active screen and turns every user operation into a notice.
pub struct ScannerApp {
    pub(super) config: QrScanConfig,
    pub(super) event_bus: Arc<EventBus>,
    pub(super) history: Arc<ScanHistory>,

    // Components
    pub(super) auth: AuthSession,
    pub(super) scan_session: Option<ScanSession>,
    pub(super) dispatcher: ActionDispatcher,
    pub(super) camera: Arc<dyn CameraPermissions>,

    /// Status line shown on the login screen
    pub(super) status: String,
    pub(super) cancellation_token: CancellationToken,
}

impl ScannerApp {
    /// Create a new app with the given configuration and collaborators
    pub fn new<P>(
        config: QrScanConfig,
        auth_provider: Arc<dyn AuthProvider>,
        platform: Arc<P>,
    ) -> Result<Self>
    where
        P: LinkOpener + Clipboard + CameraPermissions + 'static,
    {
        config.validate()?;

        let event_bus = Arc::new(if config.system.debug_events {
            EventBus::with_debug_logging(config.system.event_bus_capacity)
        } else {
            EventBus::new(config.system.event_bus_capacity)
        });

        let history = Arc::new(
            HistoryBuilder::new()
                .capacity(config.history.capacity)
                .build()?,
        );

        let auth = AuthSession::new(
            auth_provider,
            Arc::clone(&history),
            Arc::clone(&event_bus),
            &config.auth,
        );

        let dispatcher = ActionDispatcher::new(
            platform.clone(),
            platform.clone(),
            Arc::clone(&event_bus),
        );

        info!(
            "Scanner initialized (history capacity {}, {} accepted formats)",
            config.history.capacity,
            config.scanner.accepted_formats.len()
        );

        Ok(Self {
            config,
            event_bus,
            history,
            auth,
            scan_session: None,
            dispatcher,
            camera: platform,
            status: String::new(),
            cancellation_token: CancellationToken::new(),
        })
    }

    pub fn config(&self) -> &QrScanConfig {
        &self.config
    }

    pub fn event_bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.event_bus)
    }

    pub fn history(&self) -> Arc<ScanHistory> {
        Arc::clone(&self.history)
    }

    /// Token cancelled when the app shuts down
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }
}
