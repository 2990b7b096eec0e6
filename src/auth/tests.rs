use super::*;
use crate::config::AuthConfig;
use crate::decoder::DecodedCode;
use crate::error::{AuthError, QrScanError, ValidationError};
use crate::events::{EventBus, EventFilter, ScanEvent};
use crate::history::ScanHistory;
use crate::record::ScanRecord;
use std::sync::Arc;

struct Fixture {
    provider: Arc<InMemoryAuthProvider>,
    history: Arc<ScanHistory>,
    event_bus: Arc<EventBus>,
    session: AuthSession,
}

fn create_fixture(provider: InMemoryAuthProvider) -> Fixture {
    let provider = Arc::new(provider);
    let history = Arc::new(ScanHistory::new(10));
    let event_bus = Arc::new(EventBus::new(32));
    let session = AuthSession::new(
        provider.clone(),
        Arc::clone(&history),
        Arc::clone(&event_bus),
        &AuthConfig {
            min_password_length: 6,
        },
    );

    Fixture {
        provider,
        history,
        event_bus,
        session,
    }
}

fn fill_history(history: &ScanHistory, count: usize) {
    for i in 0..count {
        let record = ScanRecord::from_decoded(
            history.next_record_id(),
            &DecodedCode::qr(format!("scan {}", i)),
        );
        history.record(record);
    }
}

#[tokio::test]
async fn test_create_account_signs_in() {
    let mut fixture = create_fixture(InMemoryAuthProvider::new());

    let identity = fixture
        .session
        .create_account("new@example.com", "secret1")
        .await
        .unwrap();

    assert_eq!(identity.email, "new@example.com");
    assert!(fixture.session.is_signed_in());
    assert_eq!(fixture.session.identity(), Some(&identity));
    assert_eq!(fixture.provider.account_count(), 1);
    assert_eq!(fixture.provider.current_uid(), Some(identity.uid));
}

#[tokio::test]
async fn test_validation_errors_never_reach_provider() {
    let mut fixture = create_fixture(InMemoryAuthProvider::new());
    fixture.provider.fail_next(AuthError::from_code("auth/internal-error", "boom"));

    let result = fixture.session.create_account("new@example.com", "12345").await;
    assert!(matches!(
        result,
        Err(QrScanError::Validation(ValidationError::PasswordTooShort { min_length: 6 }))
    ));

    let result = fixture.session.sign_in("not-an-email", "whatever").await;
    assert!(matches!(
        result,
        Err(QrScanError::Validation(ValidationError::InvalidEmail))
    ));

    let result = fixture.session.sign_in("", "").await;
    assert!(matches!(
        result,
        Err(QrScanError::Validation(ValidationError::MissingCredentials))
    ));

    // The injected failure is still pending, so the provider was never called
    let result = fixture.session.sign_in("user@example.com", "secret1").await;
    assert!(matches!(result, Err(QrScanError::Auth(AuthError::Other { .. }))));
    assert!(!fixture.session.is_signed_in());
}

#[tokio::test]
async fn test_duplicate_account() {
    let mut fixture =
        create_fixture(InMemoryAuthProvider::new().with_account("taken@example.com", "secret1"));

    let result = fixture
        .session
        .create_account("Taken@example.com", "another1")
        .await;

    match result {
        Err(QrScanError::Auth(error)) => {
            assert_eq!(error, AuthError::EmailAlreadyInUse);
            assert_eq!(
                error.user_message(AuthOperation::CreateAccount),
                "Email is already in use"
            );
        }
        other => panic!("Unexpected result: {:?}", other.map(|_| ())),
    }
    assert!(!fixture.session.is_signed_in());
}

#[tokio::test]
async fn test_sign_in_failures() {
    let mut fixture =
        create_fixture(InMemoryAuthProvider::new().with_account("user@example.com", "secret1"));

    let result = fixture.session.sign_in("nobody@example.com", "secret1").await;
    assert!(matches!(result, Err(QrScanError::Auth(AuthError::UserNotFound))));

    let result = fixture.session.sign_in("user@example.com", "wrong-pass").await;
    assert!(matches!(result, Err(QrScanError::Auth(AuthError::WrongPassword))));

    let identity = fixture
        .session
        .sign_in("user@example.com", "secret1")
        .await
        .unwrap();
    assert_eq!(identity.email, "user@example.com");
}

#[tokio::test]
async fn test_failures_publish_user_messages() {
    let mut fixture = create_fixture(InMemoryAuthProvider::new());
    let mut receiver = fixture
        .event_bus
        .subscribe_filtered(EventFilter::EventTypes(vec!["auth_failed"]), "auth-test");

    let _ = fixture.session.sign_in("ghost@example.com", "secret1").await;

    match receiver.try_recv().unwrap() {
        Some(ScanEvent::AuthFailed { operation, message }) => {
            assert_eq!(operation, "Sign in");
            assert_eq!(message, "User not found");
        }
        other => panic!("Unexpected event: {:?}", other),
    }
}

#[test]
fn test_error_message_mapping() {
    assert_eq!(
        AuthError::WeakPassword.user_message(AuthOperation::CreateAccount),
        "Password is too weak"
    );
    assert_eq!(
        AuthError::InvalidEmail.user_message(AuthOperation::SignIn),
        "Invalid email"
    );
    assert_eq!(
        AuthError::WrongPassword.user_message(AuthOperation::SignIn),
        "Incorrect password"
    );
    assert_eq!(
        AuthError::from_code("auth/too-many-requests", "Too many attempts, try later")
            .user_message(AuthOperation::SignIn),
        "Too many attempts, try later"
    );
    assert_eq!(
        AuthError::from_code("auth/unknown", "").user_message(AuthOperation::CreateAccount),
        "Error registering user"
    );
    assert_eq!(
        AuthError::UserNotFound.user_message(AuthOperation::SignOut),
        "Error signing out"
    );
}

#[tokio::test]
async fn test_sign_out_clears_history() {
    let mut fixture =
        create_fixture(InMemoryAuthProvider::new().with_account("user@example.com", "secret1"));
    fixture
        .session
        .sign_in("user@example.com", "secret1")
        .await
        .unwrap();

    fill_history(&fixture.history, 10);
    assert_eq!(fixture.history.len(), 10);

    let removed = fixture.session.sign_out().await.unwrap();
    assert_eq!(removed, 10);
    assert!(fixture.history.is_empty());
    assert!(!fixture.session.is_signed_in());
    assert_eq!(fixture.session.state(), &AuthState::SignedOut);
    assert!(fixture.provider.current_uid().is_none());
}

#[tokio::test]
async fn test_sign_out_with_empty_history() {
    let mut fixture =
        create_fixture(InMemoryAuthProvider::new().with_account("user@example.com", "secret1"));
    fixture
        .session
        .sign_in("user@example.com", "secret1")
        .await
        .unwrap();

    assert_eq!(fixture.session.sign_out().await.unwrap(), 0);
    assert!(fixture.history.is_empty());
}

#[tokio::test]
async fn test_failed_sign_out_keeps_state() {
    let mut fixture =
        create_fixture(InMemoryAuthProvider::new().with_account("user@example.com", "secret1"));
    fixture
        .session
        .sign_in("user@example.com", "secret1")
        .await
        .unwrap();
    fill_history(&fixture.history, 3);

    fixture
        .provider
        .fail_next(AuthError::from_code("auth/network-request-failed", "offline"));
    assert!(fixture.session.sign_out().await.is_err());

    assert!(fixture.session.is_signed_in());
    assert_eq!(fixture.history.len(), 3);
}

#[tokio::test]
async fn test_sign_out_requires_sign_in() {
    let mut fixture = create_fixture(InMemoryAuthProvider::new());
    assert!(matches!(
        fixture.session.sign_out().await,
        Err(QrScanError::InvalidState { .. })
    ));
}
