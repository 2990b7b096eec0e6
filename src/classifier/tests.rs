use super::*;

fn assert_target(raw: &str, expected_type: ContentType, expected_target: Option<&str>) {
    let classification = classify(raw);
    assert_eq!(classification.content_type(), expected_type, "payload: {:?}", raw);
    assert_eq!(classification.normalized_target(), expected_target, "payload: {:?}", raw);
    assert_eq!(classification.raw_payload(), raw);
}

#[test]
fn test_url_with_scheme_is_unchanged() {
    assert_target("https://example.com", ContentType::Url, Some("https://example.com"));
    assert_target("http://example.com/a/b", ContentType::Url, Some("http://example.com/a/b"));
}

#[test]
fn test_bare_domain_gets_https_scheme() {
    assert_target("example.com", ContentType::Url, Some("https://example.com"));

    let classification = classify("example.com");
    assert_eq!(classification.display_summary(), "example.com");
}

#[test]
fn test_email_gets_mailto_target() {
    assert_target("user@example.com", ContentType::Email, Some("mailto:user@example.com"));
    assert_target(
        "mailto:user@example.com",
        ContentType::Email,
        Some("mailto:user@example.com"),
    );

    let classification = classify("user@example.com");
    assert_eq!(classification.display_summary(), "mailto:user@example.com");
}

#[test]
fn test_targets_drop_surrounding_whitespace() {
    assert_target("example.com ", ContentType::Url, Some("https://example.com"));
    assert_target("https://example.com/a  ", ContentType::Url, Some("https://example.com/a"));
    assert_target("user@example.com\n", ContentType::Email, Some("mailto:user@example.com"));
}

#[test]
fn test_phone_gets_tel_target() {
    assert_target("+15551234567", ContentType::Phone, Some("tel:+15551234567"));
    assert_target("+1 (555) 123-4567", ContentType::Phone, Some("tel:+15551234567"));
    assert_target("5551234567", ContentType::Phone, Some("tel:5551234567"));
}

#[test]
fn test_wifi_summary() {
    let classification = classify("WIFI:S:MyNet;T:WPA;;");
    assert_eq!(classification.content_type(), ContentType::Wifi);
    assert_eq!(classification.normalized_target(), None);

    let summary = classification.display_summary();
    assert!(summary.contains("MyNet"));
    assert!(summary.contains("WPA"));
    assert_eq!(summary, "Network: MyNet\nType: WPA");
}

#[test]
fn test_wifi_defaults() {
    let classification = classify("WIFI:S:Cafe;;");
    assert_eq!(classification.display_summary(), "Network: Cafe\nType: WPA");

    let classification = classify("WIFI:T:WEP;;");
    assert_eq!(classification.display_summary(), "Network: Unknown\nType: WEP");

    let classification = classify("WIFI:s:lower;t:nopass;;");
    assert_eq!(
        classification.content(),
        &ScanContent::Wifi {
            network: Some("lower".to_string()),
            security: Some("nopass".to_string()),
        }
    );
}

#[test]
fn test_contact_summary() {
    let classification = classify("BEGIN:VCARD\nVERSION:3.0\nN:John Smith\nTEL:+15551234567\nEND:VCARD");
    assert_eq!(classification.content_type(), ContentType::Contact);
    assert_eq!(classification.normalized_target(), None);
    assert_eq!(
        classification.display_summary(),
        "Name: John Smith\nPhone: +15551234567\nEmail: Not specified"
    );
}

#[test]
fn test_contact_name_prefers_full_name() {
    let classification = classify("BEGIN:VCARD\nFN:Jane Doe\nNOTE:call later\nEND:VCARD");
    assert_eq!(
        classification.display_summary(),
        "Name: Jane Doe\nPhone: Not specified\nEmail: Not specified"
    );

    let classification = classify("BEGIN:VCARD\nNICKNAME:JD\nTEL:+15551234567\nEND:VCARD");
    assert_eq!(
        classification.display_summary(),
        "Name: Not specified\nPhone: +15551234567\nEmail: Not specified"
    );
}

#[test]
fn test_contact_without_fields() {
    let classification = classify("BEGIN:VCARD\nEND:VCARD");
    assert_eq!(
        classification.display_summary(),
        "Name: Not specified\nPhone: Not specified\nEmail: Not specified"
    );
}

#[test]
fn test_geo_target_is_payload() {
    assert_target(
        "geo:37.7749,-122.4194",
        ContentType::Geo,
        Some("geo:37.7749,-122.4194"),
    );
}

#[test]
fn test_event_has_no_target() {
    let raw = "BEGIN:VEVENT\nSUMMARY:Standup\nDTSTART:20250101T090000Z\nEND:VEVENT";
    assert_target(raw, ContentType::Event, None);
    assert_eq!(classify(raw).display_summary(), raw);
}

#[test]
fn test_plain_text_fallback() {
    let classification = classify("random plain text");
    assert_eq!(classification.content_type(), ContentType::Text);
    assert_eq!(classification.normalized_target(), None);
    assert_eq!(classification.display_summary(), "random plain text");

    assert_target("", ContentType::Text, None);
    assert_target("3.14", ContentType::Text, None);
    assert_target("https://example.com/search?q=rust", ContentType::Text, None);
}

#[test]
fn test_first_match_wins() {
    // Address inside a vCard satisfies the email predicate before the vCard prefix is checked
    let raw = "BEGIN:VCARD\nFN:Jane\nEMAIL:jane@example.com\nEND:VCARD";
    assert_eq!(classify(raw).content_type(), ContentType::Email);

    // Purely numeric barcodes read as phone numbers
    assert_eq!(classify("4006381333931").content_type(), ContentType::Phone);

    // Lowercase prefixes are not WiFi or vCard payloads
    assert_eq!(classify("wifi:S:Net;;").content_type(), ContentType::Text);
    assert_eq!(classify("begin:vcard").content_type(), ContentType::Text);
}

#[test]
fn test_classification_is_total_and_deterministic() {
    let long = "x".repeat(10_000);
    let inputs = [
        "",
        " ",
        "\0",
        "日本語のテキスト",
        "@",
        ".@",
        "WIFI:",
        "WIFI:;;;:::",
        "BEGIN:VCARD",
        "geo:",
        "+",
        "((((",
        "http://",
        long.as_str(),
    ];

    for raw in inputs {
        let first = classify(raw);
        let second = classify(raw);
        assert!(ContentType::ALL.contains(&first.content_type()));
        assert_eq!(first, second);
    }
}

#[test]
fn test_targets_are_protocol_qualified() {
    let inputs = [
        "example.com",
        "HTTP://EXAMPLE.COM",
        "user@example.com",
        "+44 20 7946 0958",
        "geo:51.5,-0.12",
    ];

    for raw in inputs {
        let classification = classify(raw);
        let target = classification
            .normalized_target()
            .expect("actionable payload has a target");
        let lower = target.to_ascii_lowercase();
        assert!(
            lower.starts_with("http://")
                || lower.starts_with("https://")
                || lower.starts_with("mailto:")
                || lower.starts_with("tel:")
                || lower.starts_with("geo:"),
            "unexpected target {:?}",
            target
        );
        assert_eq!(
            classification.content_type().has_action(),
            classification.normalized_target().is_some()
        );
    }
}

#[test]
fn test_labels() {
    assert_eq!(ContentType::Url.action_label(), "Open in browser");
    assert_eq!(ContentType::Phone.action_label(), "Call");
    assert_eq!(ContentType::Wifi.action_label(), "OK");
    assert_eq!(ContentType::Contact.label(), "Contact (vCard)");
    assert_eq!(ContentType::Geo.to_string(), "Location");
}
