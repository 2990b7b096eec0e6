use super::provider::AuthProvider;
use super::types::Identity;
use super::validation::is_valid_email;
use crate::error::AuthError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Shortest password the service itself accepts
const SERVICE_MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    email: String,
    password: String,
}

/// Auth provider backed by an in-process account table.
///
/// Produces the same failure codes as the hosted identity service so the
/// client logic can be exercised without a network.
#[derive(Default)]
pub struct InMemoryAuthProvider {
    accounts: Mutex<HashMap<String, Account>>,
    current_uid: Mutex<Option<String>>,
    next_failure: Mutex<Option<AuthError>>,
}

impl InMemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account, bypassing the service checks
    pub fn with_account(self, email: &str, password: &str) -> Self {
        let account = Account {
            uid: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.accounts.lock().insert(email.to_lowercase(), account);
        self
    }

    /// Make the next call fail with `error`
    pub fn fail_next(&self, error: AuthError) {
        *self.next_failure.lock() = Some(error);
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().len()
    }

    /// UID of the account currently signed in, if any
    pub fn current_uid(&self) -> Option<String> {
        self.current_uid.lock().clone()
    }

    fn take_failure(&self) -> Result<(), AuthError> {
        match self.next_failure.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn establish(&self, account: &Account) -> Identity {
        *self.current_uid.lock() = Some(account.uid.clone());
        Identity {
            uid: account.uid.clone(),
            email: account.email.clone(),
        }
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.take_failure()?;

        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail);
        }

        if password.chars().count() < SERVICE_MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword);
        }

        let account = {
            let mut accounts = self.accounts.lock();
            let key = email.to_lowercase();
            if accounts.contains_key(&key) {
                return Err(AuthError::EmailAlreadyInUse);
            }

            let account = Account {
                uid: Uuid::new_v4().to_string(),
                email: email.to_string(),
                password: password.to_string(),
            };
            accounts.insert(key, account.clone());
            account
        };

        debug!("Created in-memory account {}", account.uid);
        Ok(self.establish(&account))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.take_failure()?;

        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail);
        }

        let account = self
            .accounts
            .lock()
            .get(&email.to_lowercase())
            .cloned()
            .ok_or(AuthError::UserNotFound)?;

        if account.password != password {
            return Err(AuthError::WrongPassword);
        }

        Ok(self.establish(&account))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.take_failure()?;
        *self.current_uid.lock() = None;
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "in-memory"
    }
}
