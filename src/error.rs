use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrScanError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Action error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Event bus error: {0}")]
    EventBus(#[from] EventBusError),

    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    #[error("System error: {message}")]
    System { message: String },
}

impl QrScanError {
    pub fn system<S: Into<String>>(message: S) -> Self {
        Self::System {
            message: message.into(),
        }
    }

    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }
}

/// Credential problems caught before anything is sent to the auth provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter email and password.")]
    MissingCredentials,

    #[error("Please enter a valid email.")]
    InvalidEmail,

    #[error("Password must be at least {min_length} characters.")]
    PasswordTooShort { min_length: usize },
}

/// Classified failure reported by the auth provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("The email address is already in use by another account")]
    EmailAlreadyInUse,

    #[error("The email address is badly formatted")]
    InvalidEmail,

    #[error("The password must be 6 characters long or more")]
    WeakPassword,

    #[error("There is no user record corresponding to this identifier")]
    UserNotFound,

    #[error("The password is invalid")]
    WrongPassword,

    #[error("{message}")]
    Other { code: String, message: String },
}

impl AuthError {
    pub const EMAIL_ALREADY_IN_USE: &'static str = "auth/email-already-in-use";
    pub const INVALID_EMAIL: &'static str = "auth/invalid-email";
    pub const WEAK_PASSWORD: &'static str = "auth/weak-password";
    pub const USER_NOT_FOUND: &'static str = "auth/user-not-found";
    pub const WRONG_PASSWORD: &'static str = "auth/wrong-password";

    /// Build an error from a provider failure code; unknown codes keep the raw message
    pub fn from_code<S: Into<String>>(code: &str, message: S) -> Self {
        match code {
            Self::EMAIL_ALREADY_IN_USE => Self::EmailAlreadyInUse,
            Self::INVALID_EMAIL => Self::InvalidEmail,
            Self::WEAK_PASSWORD => Self::WeakPassword,
            Self::USER_NOT_FOUND => Self::UserNotFound,
            Self::WRONG_PASSWORD => Self::WrongPassword,
            _ => Self::Other {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }

    /// Provider failure code for this error
    pub fn code(&self) -> &str {
        match self {
            Self::EmailAlreadyInUse => Self::EMAIL_ALREADY_IN_USE,
            Self::InvalidEmail => Self::INVALID_EMAIL,
            Self::WeakPassword => Self::WEAK_PASSWORD,
            Self::UserNotFound => Self::USER_NOT_FOUND,
            Self::WrongPassword => Self::WRONG_PASSWORD,
            Self::Other { code, .. } => code,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Cannot open this URL: {target}")]
    Unsupported { target: String },

    #[error("No action available for {content_type} content")]
    NoAction { content_type: String },

    #[error("Platform failure: {details}")]
    Platform { details: String },

    #[error("No scan record with id {id}")]
    UnknownRecord { id: u64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventBusError {
    #[error("Failed to publish event: {details}")]
    PublishFailed { details: String },

    #[error("Receiver lagged behind by {skipped} events")]
    Lagged { skipped: u64 },

    #[error("Event channel closed")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, QrScanError>;
