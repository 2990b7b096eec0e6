use super::interface::{CameraPermissions, Clipboard, LinkOpener};
use crate::error::DispatchError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::debug;

/// Mock platform for testing without an OS shell.
///
/// Records every opened target and the clipboard contents. Link support,
/// open failures and the camera grant are configurable.
pub struct MockPlatform {
    opened: Mutex<Vec<String>>,
    clipboard: Mutex<Option<String>>,
    links_supported: AtomicBool,
    next_open_failure: Mutex<Option<String>>,
    permission_granted: AtomicBool,
    grant_on_request: AtomicBool,
    permission_requests: AtomicUsize,
}

impl MockPlatform {
    /// Permissive platform: every link opens and the camera is granted
    pub fn new() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            clipboard: Mutex::new(None),
            links_supported: AtomicBool::new(true),
            next_open_failure: Mutex::new(None),
            permission_granted: AtomicBool::new(true),
            grant_on_request: AtomicBool::new(true),
            permission_requests: AtomicUsize::new(0),
        }
    }

    /// Camera starts ungranted; `grant_on_request` decides the prompt answer
    pub fn without_camera_permission(grant_on_request: bool) -> Self {
        let platform = Self::new();
        platform.permission_granted.store(false, Ordering::Relaxed);
        platform
            .grant_on_request
            .store(grant_on_request, Ordering::Relaxed);
        platform
    }

    /// Make `can_open` answer false for every target
    pub fn set_links_supported(&self, supported: bool) {
        self.links_supported.store(supported, Ordering::Relaxed);
    }

    /// Make the next `open` call fail
    pub fn fail_next_open<S: Into<String>>(&self, details: S) {
        *self.next_open_failure.lock() = Some(details.into());
    }

    /// Targets opened so far, in order
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().clone()
    }

    pub fn clipboard_text(&self) -> Option<String> {
        self.clipboard.lock().clone()
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::Relaxed)
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkOpener for MockPlatform {
    async fn can_open(&self, _target: &str) -> bool {
        self.links_supported.load(Ordering::Relaxed)
    }

    async fn open(&self, target: &str) -> Result<(), DispatchError> {
        if let Some(details) = self.next_open_failure.lock().take() {
            return Err(DispatchError::Platform { details });
        }

        debug!("Mock open: {}", target);
        self.opened.lock().push(target.to_string());
        Ok(())
    }
}

impl Clipboard for MockPlatform {
    fn set_text(&self, text: &str) -> Result<(), DispatchError> {
        *self.clipboard.lock() = Some(text.to_string());
        Ok(())
    }
}

#[async_trait]
impl CameraPermissions for MockPlatform {
    fn is_granted(&self) -> bool {
        self.permission_granted.load(Ordering::Relaxed)
    }

    async fn request(&self) -> bool {
        self.permission_requests.fetch_add(1, Ordering::Relaxed);
        let granted = self.grant_on_request.load(Ordering::Relaxed);
        self.permission_granted.store(granted, Ordering::Relaxed);
        granted
    }
}
