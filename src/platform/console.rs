use super::interface::{CameraPermissions, Clipboard, LinkOpener};
use crate::error::DispatchError;
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;

const SUPPORTED_SCHEMES: [&str; 5] = ["http://", "https://", "mailto:", "tel:", "geo:"];

/// Platform used by the terminal front-end.
///
/// Opening a target only logs it; the clipboard lives in memory and the
/// camera is always available.
#[derive(Default)]
pub struct ConsolePlatform {
    clipboard: Mutex<Option<String>>,
    last_opened: Mutex<Option<String>>,
}

impl ConsolePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clipboard_text(&self) -> Option<String> {
        self.clipboard.lock().clone()
    }

    pub fn last_opened(&self) -> Option<String> {
        self.last_opened.lock().clone()
    }
}

fn has_supported_scheme(target: &str) -> bool {
    let lower = target.to_lowercase();
    SUPPORTED_SCHEMES
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

#[async_trait]
impl LinkOpener for ConsolePlatform {
    async fn can_open(&self, target: &str) -> bool {
        has_supported_scheme(target)
    }

    async fn open(&self, target: &str) -> Result<(), DispatchError> {
        if !has_supported_scheme(target) {
            return Err(DispatchError::Unsupported {
                target: target.to_string(),
            });
        }

        info!("Opening {}", target);
        *self.last_opened.lock() = Some(target.to_string());
        Ok(())
    }
}

impl Clipboard for ConsolePlatform {
    fn set_text(&self, text: &str) -> Result<(), DispatchError> {
        *self.clipboard.lock() = Some(text.to_string());
        Ok(())
    }
}

#[async_trait]
impl CameraPermissions for ConsolePlatform {
    fn is_granted(&self) -> bool {
        true
    }

    async fn request(&self) -> bool {
        true
    }
}
