mod content;
mod parse;
#[cfg(test)]
mod tests;

pub use content::{
    Classification, ContentType, ScanContent, DEFAULT_WIFI_SECURITY, NOT_SPECIFIED,
    UNKNOWN_NETWORK,
};

use parse::{GEO_PREFIX, VCARD_PREFIX, VEVENT_PREFIX, WIFI_PREFIX};
use tracing::trace;

/// Interpret a decoded payload.
///
/// Predicates are tried in a fixed order and the first one that holds decides
/// the content type: URL, email, phone, WiFi, vCard, geo URI, calendar event.
/// Anything else is plain text, so this never fails.
pub fn classify(raw: &str) -> Classification {
    let content = interpret(raw);
    trace!(
        "Classified {}-byte payload as {}",
        raw.len(),
        content.content_type().as_str()
    );
    Classification::new(raw.to_string(), content)
}

fn interpret(raw: &str) -> ScanContent {
    if parse::is_url(raw) {
        return ScanContent::Url {
            target: parse::url_target(raw),
        };
    }

    if parse::is_email(raw) {
        return ScanContent::Email {
            target: parse::email_target(raw),
        };
    }

    if let Some(number) = parse::phone_number(raw) {
        return ScanContent::Phone {
            target: format!("tel:{}", number),
        };
    }

    if let Some(body) = raw.strip_prefix(WIFI_PREFIX) {
        let fields = parse::parse_wifi(body);
        return ScanContent::Wifi {
            network: fields.network,
            security: fields.security,
        };
    }

    if raw.starts_with(VCARD_PREFIX) {
        let fields = parse::parse_vcard(raw);
        return ScanContent::Contact {
            name: fields.name,
            phone: fields.phone,
            email: fields.email,
        };
    }

    if raw.starts_with(GEO_PREFIX) {
        return ScanContent::Geo {
            target: raw.to_string(),
        };
    }

    if raw.starts_with(VEVENT_PREFIX) {
        return ScanContent::Event;
    }

    ScanContent::Text
}
