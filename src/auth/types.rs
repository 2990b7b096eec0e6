use crate::error::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed-in user as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOperation {
    CreateAccount,
    SignIn,
    SignOut,
}

impl AuthOperation {
    pub fn label(&self) -> &'static str {
        match self {
            AuthOperation::CreateAccount => "Create account",
            AuthOperation::SignIn => "Sign in",
            AuthOperation::SignOut => "Sign out",
        }
    }

    /// Message used when the provider gives nothing better
    pub fn fallback_message(&self) -> &'static str {
        match self {
            AuthOperation::CreateAccount => "Error registering user",
            AuthOperation::SignIn => "Error signing in",
            AuthOperation::SignOut => "Error signing out",
        }
    }
}

impl fmt::Display for AuthOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a user is signed in
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    SignedOut,
    SignedIn(Identity),
}

pub trait AuthErrorExt {
    /// Message shown to the user for a failure of `operation`
    fn user_message(&self, operation: AuthOperation) -> String;
}

impl AuthErrorExt for AuthError {
    fn user_message(&self, operation: AuthOperation) -> String {
        match (operation, self) {
            (AuthOperation::SignOut, _) => operation.fallback_message().to_string(),
            (AuthOperation::CreateAccount, AuthError::EmailAlreadyInUse) => {
                "Email is already in use".to_string()
            }
            (AuthOperation::CreateAccount, AuthError::WeakPassword) => {
                "Password is too weak".to_string()
            }
            (AuthOperation::SignIn, AuthError::UserNotFound) => "User not found".to_string(),
            (AuthOperation::SignIn, AuthError::WrongPassword) => "Incorrect password".to_string(),
            (_, AuthError::InvalidEmail) => "Invalid email".to_string(),
            (_, AuthError::Other { message, .. }) if message.trim().is_empty() => {
                operation.fallback_message().to_string()
            }
            (_, other) => other.to_string(),
        }
    }
}
