use super::interface::{Clipboard, LinkOpener};
use crate::classifier::ScanContent;
use crate::error::DispatchError;
use crate::events::{EventBus, ScanEvent};
use crate::record::ScanRecord;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, warn};

/// Result of acting on a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The target was handed to the platform
    Opened { target: String },
    /// The content type has nothing to launch; acknowledging is enough
    NoAction,
}

/// Turns a scan record into a platform call
pub struct ActionDispatcher {
    opener: Arc<dyn LinkOpener>,
    clipboard: Arc<dyn Clipboard>,
    event_bus: Arc<EventBus>,
}

impl ActionDispatcher {
    pub fn new(
        opener: Arc<dyn LinkOpener>,
        clipboard: Arc<dyn Clipboard>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            opener,
            clipboard,
            event_bus,
        }
    }

    /// Run the primary action for a record.
    ///
    /// URLs are checked with `can_open` first. Failures are reported on the
    /// event bus and returned; they never touch the session or the history.
    pub async fn dispatch(&self, record: &ScanRecord) -> Result<DispatchOutcome, DispatchError> {
        let content_type = record.content_type();
        if !content_type.has_action() {
            debug!("No action for {} scan {}", content_type.label(), record.id);
            return Ok(DispatchOutcome::NoAction);
        }

        let target = record
            .normalized_target()
            .ok_or_else(|| DispatchError::NoAction {
                content_type: content_type.label().to_string(),
            })?
            .to_string();

        if let ScanContent::Url { .. } = record.content() {
            if !self.opener.can_open(&target).await {
                return Err(self.failed(&target, DispatchError::Unsupported {
                    target: target.clone(),
                }));
            }
        }

        if let Err(e) = self.opener.open(&target).await {
            return Err(self.failed(&target, e));
        }

        self.event_bus.emit(ScanEvent::ActionDispatched {
            content_type,
            target: target.clone(),
        });

        Ok(DispatchOutcome::Opened { target })
    }

    /// Copy the raw payload, unaltered, to the clipboard.
    ///
    /// Returns the number of characters copied.
    pub fn copy_raw(&self, record: &ScanRecord) -> Result<usize, DispatchError> {
        let payload = record.raw_payload();
        self.clipboard.set_text(payload)?;

        let length = payload.chars().count();
        self.event_bus.emit(ScanEvent::ClipboardCopied {
            length,
            timestamp: SystemTime::now(),
        });

        Ok(length)
    }

    fn failed(&self, target: &str, error: DispatchError) -> DispatchError {
        warn!("Action for {} failed: {}", target, error);
        self.event_bus.emit(ScanEvent::ActionFailed {
            target: target.to_string(),
            error: error.to_string(),
        });
        error
    }
}
