mod console;
mod dispatch;
mod interface;
mod mock;

#[cfg(test)]
mod tests;

pub use console::ConsolePlatform;
pub use dispatch::{ActionDispatcher, DispatchOutcome};
pub use interface::{CameraPermissions, Clipboard, LinkOpener};
pub use mock::MockPlatform;
