use super::*;
use crate::decoder::DecodedCode;
use crate::error::DispatchError;
use crate::events::{EventBus, EventFilter, ScanEvent};
use crate::record::ScanRecord;
use std::sync::Arc;

fn create_dispatcher(platform: &Arc<MockPlatform>, event_bus: &Arc<EventBus>) -> ActionDispatcher {
    ActionDispatcher::new(platform.clone(), platform.clone(), Arc::clone(event_bus))
}

fn record(payload: &str) -> ScanRecord {
    ScanRecord::from_decoded(1, &DecodedCode::qr(payload))
}

#[tokio::test]
async fn test_dispatch_opens_targets() {
    let platform = Arc::new(MockPlatform::new());
    let event_bus = Arc::new(EventBus::new(16));
    let dispatcher = create_dispatcher(&platform, &event_bus);

    for payload in [
        "example.com",
        "user@example.com",
        "+1 (555) 123-4567",
        "geo:37.786971,-122.399677",
    ] {
        let outcome = dispatcher.dispatch(&record(payload)).await.unwrap();
        assert!(matches!(outcome, DispatchOutcome::Opened { .. }));
    }

    assert_eq!(
        platform.opened(),
        vec![
            "https://example.com".to_string(),
            "mailto:user@example.com".to_string(),
            "tel:+15551234567".to_string(),
            "geo:37.786971,-122.399677".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_dispatch_without_action() {
    let platform = Arc::new(MockPlatform::new());
    let event_bus = Arc::new(EventBus::new(16));
    let dispatcher = create_dispatcher(&platform, &event_bus);

    for payload in [
        "random plain text",
        "WIFI:S:MyNet;T:WPA;P:secret;;",
        "BEGIN:VCARD\nFN:Jane Doe\nEND:VCARD",
        "BEGIN:VEVENT\nSUMMARY:Launch\nEND:VEVENT",
    ] {
        assert_eq!(
            dispatcher.dispatch(&record(payload)).await.unwrap(),
            DispatchOutcome::NoAction
        );
    }

    assert!(platform.opened().is_empty());
}

#[tokio::test]
async fn test_unsupported_url() {
    let platform = Arc::new(MockPlatform::new());
    platform.set_links_supported(false);
    let event_bus = Arc::new(EventBus::new(16));
    let mut receiver =
        event_bus.subscribe_filtered(EventFilter::EventTypes(vec!["action_failed"]), "test");
    let dispatcher = create_dispatcher(&platform, &event_bus);

    let error = dispatcher
        .dispatch(&record("https://example.com"))
        .await
        .unwrap_err();

    assert_eq!(
        error,
        DispatchError::Unsupported {
            target: "https://example.com".to_string()
        }
    );
    assert!(error.to_string().starts_with("Cannot open this URL"));
    assert!(platform.opened().is_empty());
    assert!(matches!(
        receiver.try_recv().unwrap(),
        Some(ScanEvent::ActionFailed { .. })
    ));
}

#[tokio::test]
async fn test_non_url_skips_can_open() {
    let platform = Arc::new(MockPlatform::new());
    platform.set_links_supported(false);
    let event_bus = Arc::new(EventBus::new(16));
    let dispatcher = create_dispatcher(&platform, &event_bus);

    dispatcher
        .dispatch(&record("user@example.com"))
        .await
        .unwrap();
    assert_eq!(platform.opened(), vec!["mailto:user@example.com".to_string()]);
}

#[tokio::test]
async fn test_platform_failure_is_reported() {
    let platform = Arc::new(MockPlatform::new());
    platform.fail_next_open("no dialer");
    let event_bus = Arc::new(EventBus::new(16));
    let dispatcher = create_dispatcher(&platform, &event_bus);

    let result = dispatcher.dispatch(&record("+15551234567")).await;
    assert!(matches!(result, Err(DispatchError::Platform { .. })));

    // The failure was one-shot
    dispatcher.dispatch(&record("+15551234567")).await.unwrap();
    assert_eq!(platform.opened(), vec!["tel:+15551234567".to_string()]);
}

#[test]
fn test_copy_is_verbatim() {
    let platform = Arc::new(MockPlatform::new());
    let event_bus = Arc::new(EventBus::new(16));
    let mut receiver = event_bus.subscribe_filtered(EventFilter::All, "test");
    let dispatcher = create_dispatcher(&platform, &event_bus);

    let payload = "WIFI:S:Café;T:WEP;P:p\\;w;;";
    let copied = dispatcher.copy_raw(&record(payload)).unwrap();

    assert_eq!(copied, payload.chars().count());
    assert_eq!(platform.clipboard_text().as_deref(), Some(payload));
    assert!(matches!(
        receiver.try_recv().unwrap(),
        Some(ScanEvent::ClipboardCopied { .. })
    ));
}

#[tokio::test]
async fn test_mock_camera_permission() {
    let platform = MockPlatform::without_camera_permission(false);
    assert!(!platform.is_granted());
    assert!(!platform.request().await);
    assert_eq!(platform.permission_requests(), 1);

    let platform = MockPlatform::without_camera_permission(true);
    assert!(platform.request().await);
    assert!(platform.is_granted());
}
