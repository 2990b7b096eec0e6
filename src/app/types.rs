use crate::error::QrScanError;
use std::fmt;

/// Screen the front-end should show, derived from auth and scan state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Home,
    Scanning,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Login => "login",
            Screen::Home => "home",
            Screen::Scanning => "scanning",
        }
    }
}

/// Short message surfaced to the user after an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new<T: Into<String>, M: Into<String>>(title: T, message: M) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success<M: Into<String>>(message: M) -> Self {
        Self::new("Success", message)
    }

    pub fn info<M: Into<String>>(message: M) -> Self {
        Self::new("Info", message)
    }

    pub fn error<M: Into<String>>(message: M) -> Self {
        Self::new("Error", message)
    }

    /// Error notice carrying the part of `error` meant for the user
    pub fn from_error(error: &QrScanError) -> Self {
        let message = match error {
            QrScanError::Validation(e) => e.to_string(),
            QrScanError::Dispatch(e) => e.to_string(),
            QrScanError::InvalidState { message } => message.clone(),
            other => other.to_string(),
        };
        Self::error(message)
    }

    pub fn is_error(&self) -> bool {
        self.title == "Error"
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Why the interactive loop stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
    Signal(String),
    EndOfInput,
    UserRequest,
    Error(String),
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::Signal(name) => write!(f, "signal {}", name),
            ShutdownReason::EndOfInput => write!(f, "end of input"),
            ShutdownReason::UserRequest => write!(f, "user request"),
            ShutdownReason::Error(details) => write!(f, "error: {}", details),
        }
    }
}
