use crate::error::DispatchError;
use async_trait::async_trait;

/// Hands action targets (`https://`, `mailto:`, `tel:`, `geo:`) to the OS
#[async_trait]
pub trait LinkOpener: Send + Sync {
    /// Whether some installed handler accepts this target
    async fn can_open(&self, target: &str) -> bool;

    async fn open(&self, target: &str) -> Result<(), DispatchError>;
}

/// System clipboard
pub trait Clipboard: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), DispatchError>;
}

/// Camera access grant.
///
/// `request` may prompt the user and resolves to the resulting grant.
#[async_trait]
pub trait CameraPermissions: Send + Sync {
    fn is_granted(&self) -> bool;

    async fn request(&self) -> bool;
}
