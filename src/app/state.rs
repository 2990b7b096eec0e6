use super::{Screen, ScannerApp};
use crate::auth::Identity;
use crate::record::ScanRecord;
use crate::session::ScanState;

impl ScannerApp {
    /// Screen implied by the current auth and scan state
    pub fn screen(&self) -> Screen {
        if !self.auth.is_signed_in() {
            Screen::Login
        } else if self.scan_session.is_some() {
            Screen::Scanning
        } else {
            Screen::Home
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.auth.identity()
    }

    pub fn is_signed_in(&self) -> bool {
        self.auth.is_signed_in()
    }

    /// Status line from the last auth operation
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn scan_state(&self) -> Option<&ScanState> {
        self.scan_session.as_ref().map(|session| session.state())
    }

    /// Result awaiting acknowledgment, if any
    pub fn pending(&self) -> Option<&ScanRecord> {
        self.scan_session
            .as_ref()
            .and_then(|session| session.pending())
    }

    /// One-line summary for the `status` command
    pub fn describe(&self) -> String {
        let user = self
            .identity()
            .map(|identity| identity.email.as_str())
            .unwrap_or("nobody");
        let scan = self
            .scan_state()
            .map(|state| state.name())
            .unwrap_or("closed");

        format!(
            "screen: {}, user: {}, camera: {}, history: {}/{}",
            self.screen().name(),
            user,
            scan,
            self.history.len(),
            self.history.capacity()
        )
    }
}
