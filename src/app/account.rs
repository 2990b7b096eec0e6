use super::{Notice, ScannerApp};
use crate::auth::{AuthErrorExt, AuthOperation};
use crate::error::QrScanError;
use tracing::info;

impl ScannerApp {
    /// Register a new account; success signs the user in
    pub async fn create_account(&mut self, email: &str, password: &str) -> Notice {
        match self.auth.create_account(email, password).await {
            Ok(identity) => {
                self.status = format!("User created: {}", identity.email);
                Notice::success("User registered successfully")
            }
            Err(e) => self.auth_failure(AuthOperation::CreateAccount, e),
        }
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Notice {
        match self.auth.sign_in(email, password).await {
            Ok(identity) => {
                self.status = format!("Welcome: {}", identity.email);
                Notice::success("Signed in successfully")
            }
            Err(e) => self.auth_failure(AuthOperation::SignIn, e),
        }
    }

    /// Sign out, closing the camera and emptying the history
    pub async fn sign_out(&mut self) -> Notice {
        match self.auth.sign_out().await {
            Ok(removed) => {
                if let Some(session) = self.scan_session.take() {
                    session.exit();
                }
                info!("Signed out, {} scans discarded", removed);
                self.status = "Signed out successfully".to_string();
                Notice::info("Signed out")
            }
            Err(e) => self.auth_failure(AuthOperation::SignOut, e),
        }
    }

    /// Map a failed auth call to a notice.
    ///
    /// Local validation failures leave the status line alone; provider
    /// failures are also shown there.
    fn auth_failure(&mut self, operation: AuthOperation, error: QrScanError) -> Notice {
        match &error {
            QrScanError::Auth(auth_error) => {
                let message = auth_error.user_message(operation);
                self.status = message.clone();
                Notice::error(message)
            }
            other => Notice::from_error(other),
        }
    }
}
