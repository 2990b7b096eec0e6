use super::types::Identity;
use crate::error::AuthError;
use async_trait::async_trait;

/// Remote identity service.
///
/// Each call resolves exactly once, either to an identity or to a classified
/// failure. Calls are not retried or cancelled by the caller.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Register a new account and sign it in
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Name used in logs
    fn provider_name(&self) -> &str;
}
