use super::{ScannerApp, ShutdownReason};
use crate::events::ScanEvent;
use std::time::SystemTime;
use tracing::{error, info};

impl ScannerApp {
    /// Close the camera, announce shutdown and cancel background tasks.
    ///
    /// Returns the process exit code. The account stays signed in with the
    /// provider; only the in-memory session is torn down.
    pub fn shutdown(&mut self, reason: ShutdownReason) -> i32 {
        info!("Beginning shutdown ({})", reason);

        if let Some(session) = self.scan_session.take() {
            session.exit();
        }

        self.event_bus.emit(ScanEvent::ShutdownRequested {
            timestamp: SystemTime::now(),
            reason: reason.to_string(),
        });

        self.cancellation_token.cancel();

        let exit_code = match &reason {
            ShutdownReason::Error(details) => {
                error!("Stopping after error: {}", details);
                1
            }
            _ => 0,
        };

        info!("Shutdown completed with exit code: {}", exit_code);
        exit_code
    }
}
