use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

// Applied to the lowercased payload
static RE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})([/0-9a-z_ .-]*)/?$").expect("valid regex")
});
static RE_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("valid regex"));

pub(crate) const WIFI_PREFIX: &str = "WIFI:";
pub(crate) const VCARD_PREFIX: &str = "BEGIN:VCARD";
pub(crate) const GEO_PREFIX: &str = "geo:";
pub(crate) const VEVENT_PREFIX: &str = "BEGIN:VEVENT";

pub(crate) fn is_url(raw: &str) -> bool {
    RE_URL.is_match(&raw.to_lowercase())
}

fn has_prefix_ignore_case(raw: &str, prefix: &str) -> bool {
    raw.get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}

/// The URL pattern tolerates trailing spaces, the target does not
pub(crate) fn url_target(raw: &str) -> String {
    let raw = raw.trim();
    if has_prefix_ignore_case(raw, "http://") || has_prefix_ignore_case(raw, "https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    }
}

/// An `@` followed, somewhere later, by a `.`
pub(crate) fn is_email(raw: &str) -> bool {
    match (raw.find('@'), raw.rfind('.')) {
        (Some(at), Some(dot)) => at < dot,
        _ => false,
    }
}

pub(crate) fn email_target(raw: &str) -> String {
    let raw = raw.trim();
    if has_prefix_ignore_case(raw, "mailto:") {
        raw.to_string()
    } else {
        format!("mailto:{}", raw)
    }
}

/// Dialable number with visual separators removed, if the payload is one
pub(crate) fn phone_number(raw: &str) -> Option<String> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | '-'))
        .collect();

    RE_PHONE.is_match(&compact).then_some(compact)
}

/// Split on `;` while honouring backslash escapes, as used by WIFI: payloads
fn split_escaped(input: &str, separator: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            current.push(c);
            if let Some(next) = chars.next() {
                current.push(next);
            }
        } else if c == separator {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fields.push(current);

    fields
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }

    out
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct WifiFields {
    pub network: Option<String>,
    pub security: Option<String>,
}

/// Parse the part of a WIFI: payload after the prefix
pub(crate) fn parse_wifi(body: &str) -> WifiFields {
    let mut params: HashMap<String, String> = HashMap::new();

    for field in split_escaped(body, ';') {
        if let Some((key, value)) = field.split_once(':') {
            if !key.is_empty() && !value.is_empty() {
                params.insert(key.to_lowercase(), unescape(value));
            }
        }
    }

    WifiFields {
        network: params.remove("s"),
        security: params.remove("t"),
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ContactFields {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

const STRUCTURAL_PROPERTIES: [&str; 3] = ["BEGIN", "END", "VERSION"];

/// Name comes from `FN`, falling back to the structured `N`
pub(crate) fn parse_vcard(raw: &str) -> ContactFields {
    let mut fields = ContactFields::default();
    let mut structured_name = None;

    for line in raw.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        // Drop parameters (TEL;TYPE=CELL) before matching the property name
        let property = key
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_uppercase();

        if STRUCTURAL_PROPERTIES.contains(&property.as_str()) {
            continue;
        }

        if property.contains("TEL") {
            fields.phone = Some(value.to_string());
        } else if property.contains("EMAIL") {
            fields.email = Some(value.to_string());
        } else if property == "FN" {
            fields.name = Some(value.to_string());
        } else if property == "N" {
            structured_name = Some(value.to_string());
        }
    }

    if fields.name.is_none() {
        fields.name = structured_name;
    }
    fields
}
