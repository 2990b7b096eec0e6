use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNKNOWN_NETWORK: &str = "Unknown";
pub const DEFAULT_WIFI_SECURITY: &str = "WPA";
pub const NOT_SPECIFIED: &str = "Not specified";

/// Closed set of payload kinds the classifier can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Text,
    Url,
    Email,
    Phone,
    Wifi,
    Contact,
    Geo,
    Event,
}

impl ContentType {
    pub const ALL: [ContentType; 8] = [
        ContentType::Text,
        ContentType::Url,
        ContentType::Email,
        ContentType::Phone,
        ContentType::Wifi,
        ContentType::Contact,
        ContentType::Geo,
        ContentType::Event,
    ];

    /// Label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Text => "Text",
            ContentType::Url => "URL",
            ContentType::Email => "Email",
            ContentType::Phone => "Phone",
            ContentType::Wifi => "WiFi",
            ContentType::Contact => "Contact (vCard)",
            ContentType::Geo => "Location",
            ContentType::Event => "Event",
        }
    }

    /// Label of the primary action button offered for this content
    pub fn action_label(&self) -> &'static str {
        match self {
            ContentType::Url => "Open in browser",
            ContentType::Email => "Send email",
            ContentType::Phone => "Call",
            ContentType::Geo => "Open map",
            ContentType::Text | ContentType::Wifi | ContentType::Contact | ContentType::Event => {
                "OK"
            }
        }
    }

    /// Whether the platform can act on this content
    pub fn has_action(&self) -> bool {
        matches!(
            self,
            ContentType::Url | ContentType::Email | ContentType::Phone | ContentType::Geo
        )
    }

    /// Identifier used in logs and events
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Url => "url",
            ContentType::Email => "email",
            ContentType::Phone => "phone",
            ContentType::Wifi => "wifi",
            ContentType::Contact => "contact",
            ContentType::Geo => "geo",
            ContentType::Event => "event",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Interpreted payload, one variant per content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScanContent {
    Text,
    Url {
        target: String,
    },
    Email {
        target: String,
    },
    Phone {
        target: String,
    },
    Wifi {
        network: Option<String>,
        security: Option<String>,
    },
    Contact {
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    },
    Geo {
        target: String,
    },
    Event,
}

impl ScanContent {
    pub fn content_type(&self) -> ContentType {
        match self {
            ScanContent::Text => ContentType::Text,
            ScanContent::Url { .. } => ContentType::Url,
            ScanContent::Email { .. } => ContentType::Email,
            ScanContent::Phone { .. } => ContentType::Phone,
            ScanContent::Wifi { .. } => ContentType::Wifi,
            ScanContent::Contact { .. } => ContentType::Contact,
            ScanContent::Geo { .. } => ContentType::Geo,
            ScanContent::Event => ContentType::Event,
        }
    }

    pub fn normalized_target(&self) -> Option<&str> {
        match self {
            ScanContent::Url { target }
            | ScanContent::Email { target }
            | ScanContent::Phone { target }
            | ScanContent::Geo { target } => Some(target),
            ScanContent::Text
            | ScanContent::Wifi { .. }
            | ScanContent::Contact { .. }
            | ScanContent::Event => None,
        }
    }
}

/// Result of interpreting one decoded payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    raw_payload: String,
    content: ScanContent,
}

impl Classification {
    pub(crate) fn new(raw_payload: String, content: ScanContent) -> Self {
        Self {
            raw_payload,
            content,
        }
    }

    /// The decoded string exactly as received
    pub fn raw_payload(&self) -> &str {
        &self.raw_payload
    }

    pub fn content(&self) -> &ScanContent {
        &self.content
    }

    pub fn content_type(&self) -> ContentType {
        self.content.content_type()
    }

    pub fn normalized_target(&self) -> Option<&str> {
        self.content.normalized_target()
    }

    /// Human-readable rendering of the payload
    pub fn display_summary(&self) -> String {
        match &self.content {
            ScanContent::Email { target } | ScanContent::Phone { target } => target.clone(),
            ScanContent::Wifi { network, security } => format!(
                "Network: {}\nType: {}",
                network.as_deref().unwrap_or(UNKNOWN_NETWORK),
                security.as_deref().unwrap_or(DEFAULT_WIFI_SECURITY)
            ),
            ScanContent::Contact { name, phone, email } => format!(
                "Name: {}\nPhone: {}\nEmail: {}",
                name.as_deref().unwrap_or(NOT_SPECIFIED),
                phone.as_deref().unwrap_or(NOT_SPECIFIED),
                email.as_deref().unwrap_or(NOT_SPECIFIED)
            ),
            ScanContent::Text
            | ScanContent::Url { .. }
            | ScanContent::Geo { .. }
            | ScanContent::Event => self.raw_payload.clone(),
        }
    }
}
