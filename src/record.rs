use crate::classifier::{classify, Classification, ContentType, ScanContent};
use crate::decoder::{CodeFormat, DecodedCode};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// One accepted scan as kept in the history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Identifier issued by the history, unique for the process lifetime
    pub id: u64,
    /// When the decode was accepted
    pub timestamp: DateTime<Utc>,
    /// Symbology reported by the decoder
    pub format: CodeFormat,
    pub classification: Classification,
}

impl ScanRecord {
    pub fn new(id: u64, format: CodeFormat, classification: Classification) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            format,
            classification,
        }
    }

    /// Classify a decode and wrap it in a record
    pub fn from_decoded(id: u64, code: &DecodedCode) -> Self {
        Self::new(id, code.format, classify(&code.payload))
    }

    pub fn raw_payload(&self) -> &str {
        self.classification.raw_payload()
    }

    pub fn content(&self) -> &ScanContent {
        self.classification.content()
    }

    pub fn content_type(&self) -> ContentType {
        self.classification.content_type()
    }

    pub fn normalized_target(&self) -> Option<&str> {
        self.classification.normalized_target()
    }

    pub fn display_summary(&self) -> String {
        self.classification.display_summary()
    }

    /// Scan time rendered in the local timezone
    pub fn local_time(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    /// Payload truncated to `max_chars` characters, with an ellipsis when cut
    pub fn preview(&self, max_chars: usize) -> String {
        let raw = self.raw_payload();
        if raw.chars().count() > max_chars {
            let head: String = raw.chars().take(max_chars).collect();
            format!("{}...", head)
        } else {
            raw.to_string()
        }
    }
}
