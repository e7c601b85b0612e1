//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // API Errors
    // ─────────────────────────────────────────────────────────────
    #[error("{message}")]
    Api { message: String },

    #[error("HTTP request failed: {message}")]
    Http { message: String },

    #[error("No API link named '{key}' in the root document")]
    LinkNotFound { key: String },

    // ─────────────────────────────────────────────────────────────
    // Auth Errors
    // ─────────────────────────────────────────────────────────────
    #[error("{message}")]
    Auth { message: String },

    #[error("Not logged in")]
    NotLoggedIn,

    // ─────────────────────────────────────────────────────────────
    // Validation / Domain-Rule Errors
    // ─────────────────────────────────────────────────────────────
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("{message}")]
    Domain { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel send error: {message}")]
    ChannelSend { message: String },

    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
        }
    }

    pub fn link_not_found(key: impl Into<String>) -> Self {
        Self::LinkNotFound { key: key.into() }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn channel_send(message: impl Into<String>) -> Self {
        Self::ChannelSend {
            message: message.into(),
        }
    }

    /// The text shown to the user when this error reaches a notification.
    ///
    /// API, auth, and domain errors already carry the human-readable text;
    /// everything else falls back to the Display form.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api { message }
            | Error::Auth { message }
            | Error::Domain { message }
            | Error::Http { message } => message.clone(),
            Error::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Check if this error means the session token is missing or rejected
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth { .. } | Error::NotLoggedIn)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
