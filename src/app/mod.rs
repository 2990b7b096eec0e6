mod account;
mod command;
mod orchestrator;
mod runtime;
mod scanning;
mod shutdown;
mod state;
mod types;


pub use command::{Command, HELP_TEXT};
pub use orchestrator::ScannerApp;
pub use scanning::CAMERA_PERMISSION_MESSAGE;
pub use types::{Notice, Screen, ShutdownReason};
