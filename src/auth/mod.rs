mod memory;
mod provider;
mod session;
mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use memory::InMemoryAuthProvider;
pub use provider::AuthProvider;
pub use session::AuthSession;
pub use types::{AuthErrorExt, AuthOperation, AuthState, Identity};
