use super::provider::AuthProvider;
use super::types::{AuthErrorExt, AuthOperation, AuthState, Identity};
use super::validation::{validate_create_account, validate_sign_in};
use crate::config::AuthConfig;
use crate::error::{AuthError, QrScanError, Result};
use crate::events::{EventBus, ScanEvent};
use crate::history::ScanHistory;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Signed-in state plus the calls that change it.
///
/// Credentials are validated locally first; only well-formed requests reach
/// the provider. A successful sign-out empties the scan history.
pub struct AuthSession {
    provider: Arc<dyn AuthProvider>,
    state: AuthState,
    history: Arc<ScanHistory>,
    event_bus: Arc<EventBus>,
    min_password_length: usize,
}

impl AuthSession {
    pub fn new(
        provider: Arc<dyn AuthProvider>,
        history: Arc<ScanHistory>,
        event_bus: Arc<EventBus>,
        config: &AuthConfig,
    ) -> Self {
        debug!("Auth session using provider '{}'", provider.provider_name());
        Self {
            provider,
            state: AuthState::SignedOut,
            history,
            event_bus,
            min_password_length: config.min_password_length,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            AuthState::SignedIn(identity) => Some(identity),
            AuthState::SignedOut => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.state, AuthState::SignedIn(_))
    }

    pub async fn create_account(&mut self, email: &str, password: &str) -> Result<Identity> {
        if let Err(e) = validate_create_account(email, password, self.min_password_length) {
            warn!("Rejected account creation before contacting provider: {}", e);
            return Err(e.into());
        }

        let identity = self
            .provider
            .create_account(email, password)
            .await
            .map_err(|e| self.failed(AuthOperation::CreateAccount, e))?;

        info!("Account created for {}", identity.email);
        self.event_bus.emit(ScanEvent::AccountCreated {
            email: identity.email.clone(),
            timestamp: SystemTime::now(),
        });

        self.state = AuthState::SignedIn(identity.clone());
        Ok(identity)
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Identity> {
        if let Err(e) = validate_sign_in(email, password) {
            warn!("Rejected sign-in before contacting provider: {}", e);
            return Err(e.into());
        }

        let identity = self
            .provider
            .sign_in(email, password)
            .await
            .map_err(|e| self.failed(AuthOperation::SignIn, e))?;

        self.event_bus.emit(ScanEvent::SignedIn {
            email: identity.email.clone(),
            timestamp: SystemTime::now(),
        });

        self.state = AuthState::SignedIn(identity.clone());
        Ok(identity)
    }

    /// Sign out and clear the history, returning how many scans were dropped
    pub async fn sign_out(&mut self) -> Result<usize> {
        if !self.is_signed_in() {
            return Err(QrScanError::invalid_state("Not signed in"));
        }

        self.provider
            .sign_out()
            .await
            .map_err(|e| self.failed(AuthOperation::SignOut, e))?;

        self.state = AuthState::SignedOut;
        let removed = self.history.clear();

        self.event_bus.emit(ScanEvent::SignedOut {
            timestamp: SystemTime::now(),
        });
        if removed > 0 {
            self.event_bus.emit(ScanEvent::HistoryCleared {
                removed,
                timestamp: SystemTime::now(),
            });
        }

        Ok(removed)
    }

    fn failed(&self, operation: AuthOperation, error: AuthError) -> QrScanError {
        self.event_bus.emit(ScanEvent::AuthFailed {
            operation: operation.label().to_string(),
            message: error.user_message(operation),
        });
        QrScanError::Auth(error)
    }
}
