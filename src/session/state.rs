use crate::record::ScanRecord;

/// Admission state of a scan session
#[derive(Debug, Clone, PartialEq)]
pub enum ScanState {
    /// Ready to accept the next decode
    Idle,
    /// A result is on screen; further decodes are dropped
    AwaitingAcknowledgment(ScanRecord),
}

impl ScanState {
    pub fn name(&self) -> &'static str {
        match self {
            ScanState::Idle => "idle",
            ScanState::AwaitingAcknowledgment(_) => "awaiting_acknowledgment",
        }
    }
}

/// What happened to a decode handed to the session
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// Classified, recorded, and now awaiting acknowledgment
    Accepted(ScanRecord),
    /// Dropped because a result is already awaiting acknowledgment
    Ignored,
    /// Dropped because the symbology is not accepted
    UnsupportedFormat,
}

impl DecodeOutcome {
    pub fn record(&self) -> Option<&ScanRecord> {
        match self {
            DecodeOutcome::Accepted(record) => Some(record),
            DecodeOutcome::Ignored | DecodeOutcome::UnsupportedFormat => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, DecodeOutcome::Accepted(_))
    }
}
