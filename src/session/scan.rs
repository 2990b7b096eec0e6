use super::state::{DecodeOutcome, ScanState};
use crate::decoder::{CodeFormat, DecodedCode};
use crate::events::{EventBus, ScanEvent};
use crate::history::ScanHistory;
use crate::record::ScanRecord;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};

/// One visit to scan mode.
///
/// Decodes are admitted only while idle. An accepted decode is classified,
/// stored at the head of the shared history and held as the pending result
/// until the user asks to scan another code. Dropping or exiting the session
/// ends it; the history lives on.
pub struct ScanSession {
    state: ScanState,
    history: Arc<ScanHistory>,
    event_bus: Arc<EventBus>,
    accepted_formats: Vec<CodeFormat>,
}

impl ScanSession {
    /// Start a session in the idle state
    pub fn new(
        history: Arc<ScanHistory>,
        event_bus: Arc<EventBus>,
        accepted_formats: Vec<CodeFormat>,
    ) -> Self {
        debug!(
            "Starting scan session ({} accepted formats)",
            accepted_formats.len()
        );

        event_bus.emit(ScanEvent::ScanModeEntered {
            timestamp: SystemTime::now(),
        });

        Self {
            state: ScanState::Idle,
            history,
            event_bus,
            accepted_formats,
        }
    }

    /// Session accepting every known symbology
    pub fn with_all_formats(history: Arc<ScanHistory>, event_bus: Arc<EventBus>) -> Self {
        Self::new(history, event_bus, CodeFormat::ALL.to_vec())
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, ScanState::Idle)
    }

    /// Result currently awaiting acknowledgment
    pub fn pending(&self) -> Option<&ScanRecord> {
        match &self.state {
            ScanState::AwaitingAcknowledgment(record) => Some(record),
            ScanState::Idle => None,
        }
    }

    pub fn accepts(&self, format: CodeFormat) -> bool {
        self.accepted_formats.contains(&format)
    }

    /// Feed one decode from the camera
    pub fn handle_decode(&mut self, code: DecodedCode) -> DecodeOutcome {
        if !self.accepts(code.format) {
            debug!("Dropping {} decode: format not accepted", code.format);
            self.event_bus.emit(ScanEvent::FormatRejected {
                format: code.format,
                timestamp: SystemTime::now(),
            });
            return DecodeOutcome::UnsupportedFormat;
        }

        if let ScanState::AwaitingAcknowledgment(pending) = &self.state {
            debug!(
                "Ignoring {} decode while scan {} awaits acknowledgment",
                code.format, pending.id
            );
            self.event_bus.emit(ScanEvent::DecodeIgnored {
                format: code.format,
                timestamp: SystemTime::now(),
            });
            return DecodeOutcome::Ignored;
        }

        self.event_bus.emit(ScanEvent::CodeDecoded {
            format: code.format,
            payload_len: code.payload.len(),
            timestamp: SystemTime::now(),
        });

        let record = ScanRecord::from_decoded(self.history.next_record_id(), &code);
        self.history.record(record.clone());

        info!(
            "Scanned {} code - type: {}, record: {}",
            record.format,
            record.content_type().label(),
            record.id
        );

        self.event_bus.emit(ScanEvent::ScanRecorded {
            record_id: record.id,
            content_type: record.content_type(),
            timestamp: SystemTime::now(),
        });

        self.state = ScanState::AwaitingAcknowledgment(record.clone());
        DecodeOutcome::Accepted(record)
    }

    /// Discard the displayed result and return to idle.
    ///
    /// Returns false when there was nothing to acknowledge.
    pub fn scan_another(&mut self) -> bool {
        match std::mem::replace(&mut self.state, ScanState::Idle) {
            ScanState::AwaitingAcknowledgment(record) => {
                debug!("Scan {} acknowledged, session idle", record.id);
                self.event_bus.emit(ScanEvent::ScanReset {
                    timestamp: SystemTime::now(),
                });
                true
            }
            ScanState::Idle => false,
        }
    }

    /// End the session
    pub fn exit(self) {
        debug!("Exiting scan session in state {}", self.state.name());
        self.event_bus.emit(ScanEvent::ScanModeExited {
            timestamp: SystemTime::now(),
        });
    }
}
