use super::{Notice, ScannerApp};
use crate::decoder::DecodedCode;
use crate::error::{DispatchError, QrScanError};
use crate::events::ScanEvent;
use crate::history::EMPTY_HISTORY_MESSAGE;
use crate::platform::DispatchOutcome;
use crate::record::ScanRecord;
use crate::session::{DecodeOutcome, ScanSession};
use std::time::SystemTime;
use tracing::{debug, info, warn};

pub const CAMERA_PERMISSION_MESSAGE: &str = "Camera permission is required to scan codes";

const COPY_LABEL: &str = "Copy";
const SCAN_ANOTHER_LABEL: &str = "Scan another";
const CLOSE_LABEL: &str = "Close";

impl ScannerApp {
    /// Open the camera.
    ///
    /// Requires a signed-in user and a camera grant; the grant is requested
    /// when missing. Always starts a fresh idle session.
    pub async fn enter_scan_mode(&mut self) -> Notice {
        if !self.auth.is_signed_in() {
            return Notice::from_error(&QrScanError::invalid_state("Sign in to scan codes"));
        }

        if !self.camera.is_granted() && !self.camera.request().await {
            warn!("Camera permission denied");
            return Notice::new("Permission required", CAMERA_PERMISSION_MESSAGE);
        }

        if let Some(previous) = self.scan_session.take() {
            previous.exit();
        }

        self.scan_session = Some(ScanSession::new(
            self.history.clone(),
            self.event_bus.clone(),
            self.config.scanner.accepted_formats.clone(),
        ));

        Notice::info("Point the camera at a code")
    }

    /// Feed a decode from the camera.
    ///
    /// Returns the result notice for an accepted scan and `None` when the
    /// decode was dropped.
    pub fn handle_decode(&mut self, code: DecodedCode) -> Option<Notice> {
        let Some(session) = self.scan_session.as_mut() else {
            debug!("Decode received outside scan mode, dropping");
            return None;
        };

        match session.handle_decode(code) {
            DecodeOutcome::Accepted(record) => Some(Self::result_notice(&record)),
            DecodeOutcome::Ignored | DecodeOutcome::UnsupportedFormat => None,
        }
    }

    /// Acknowledge the pending result so the next decode is accepted
    pub fn scan_another(&mut self) -> Notice {
        match self.scan_session.as_mut().map(|session| session.scan_another()) {
            Some(true) => Notice::info("Ready to scan"),
            Some(false) => Notice::info("Already waiting for a code"),
            None => Notice::from_error(&Self::not_scanning()),
        }
    }

    /// Close the camera and return to the home screen
    pub fn exit_scan_mode(&mut self) -> Notice {
        match self.scan_session.take() {
            Some(session) => {
                session.exit();
                Notice::info("Camera closed")
            }
            None => Notice::from_error(&Self::not_scanning()),
        }
    }

    /// Options offered for the result awaiting acknowledgment
    pub fn pending_options(&self) -> Vec<&'static str> {
        match self.pending() {
            Some(record) => vec![
                COPY_LABEL,
                record.content_type().action_label(),
                SCAN_ANOTHER_LABEL,
                CLOSE_LABEL,
            ],
            None => Vec::new(),
        }
    }

    /// Run the primary action of the result awaiting acknowledgment
    pub async fn dispatch_pending(&mut self) -> Notice {
        match self.pending().cloned() {
            Some(record) => self.dispatch(&record).await,
            None => Notice::from_error(&Self::nothing_pending()),
        }
    }

    /// Copy the payload of the result awaiting acknowledgment
    pub fn copy_pending(&mut self) -> Notice {
        match self.pending().cloned() {
            Some(record) => self.copy(&record),
            None => Notice::from_error(&Self::nothing_pending()),
        }
    }

    /// Run the primary action of any history entry
    pub async fn dispatch_record(&mut self, id: u64) -> Notice {
        match self.history.get(id) {
            Some(record) => self.dispatch(&record).await,
            None => Notice::from_error(&DispatchError::UnknownRecord { id }.into()),
        }
    }

    pub fn copy_record(&mut self, id: u64) -> Notice {
        match self.history.get(id) {
            Some(record) => self.copy(&record),
            None => Notice::from_error(&DispatchError::UnknownRecord { id }.into()),
        }
    }

    /// History listing, or the empty-history notice
    pub fn history_listing(&self) -> Notice {
        if self.history.is_empty() {
            return Notice::new("History", EMPTY_HISTORY_MESSAGE);
        }

        Notice::new(
            format!("Scan history ({})", self.history.len()),
            self.history
                .render_listing(self.config.scanner.preview_chars),
        )
    }

    pub fn clear_history(&mut self) -> Notice {
        let removed = self.history.clear();
        if removed > 0 {
            self.event_bus.emit(ScanEvent::HistoryCleared {
                removed,
                timestamp: SystemTime::now(),
            });
        }
        info!("History cleared ({} scans)", removed);
        Notice::new("History", "History cleared")
    }

    async fn dispatch(&self, record: &ScanRecord) -> Notice {
        match self.dispatcher.dispatch(record).await {
            Ok(DispatchOutcome::Opened { target }) => Notice::info(format!("Opening {}", target)),
            Ok(DispatchOutcome::NoAction) => Notice::info(record.display_summary()),
            Err(e) => Notice::error(e.to_string()),
        }
    }

    fn copy(&self, record: &ScanRecord) -> Notice {
        match self.dispatcher.copy_raw(record) {
            Ok(_) => Notice::new("Copied", "Text copied to clipboard"),
            Err(e) => Notice::error(e.to_string()),
        }
    }

    fn result_notice(record: &ScanRecord) -> Notice {
        Notice::new(
            format!("Scanned - {}", record.content_type().label()),
            record.display_summary(),
        )
    }

    fn not_scanning() -> QrScanError {
        QrScanError::invalid_state("Scan mode is not active")
    }

    fn nothing_pending() -> QrScanError {
        QrScanError::invalid_state("No scan result awaiting a choice")
    }
}
