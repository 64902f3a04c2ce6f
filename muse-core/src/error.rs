//! Error types for the prompt console
//!
//! Two layers: [`InvokeError`] is raised by a completion client when no
//! well-formed reply envelope exists (bad config, network fault, undecodable
//! body), and [`ConsoleError`] is what the console surfaces to the user. The
//! display text of a `ConsoleError` is always safe to show verbatim.

use thiserror::Error;

/// Shown when the function reports failure without a usable message,
/// or when a success envelope carries no content
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate AI response";

/// Shown when the function cannot be reached or faults outright
pub const CONNECTION_FAILED_MESSAGE: &str = "Failed to connect to AI service";

/// User-visible failures surfaced by the console
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// The prompt was empty after trimming whitespace. The completion
    /// function is never invoked in this case.
    #[error("Please enter a prompt")]
    EmptyPrompt,

    /// The completion function failed. Carries either the message the
    /// function reported or one of the generic fallback strings.
    #[error("{message}")]
    Service {
        /// Text to show the user.
        message: String,
    },
}

impl ConsoleError {
    /// Convenience constructor for service failures.
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }
}

/// Faults raised by a completion client before a reply envelope exists
#[derive(Debug, Error)]
pub enum InvokeError {
    /// Client was built with an invalid or incomplete configuration.
    #[error("client not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// The request never produced an HTTP response (network, timeout, TLS).
    #[error("transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The function answered with a status or body the client could not use.
    #[error("response error: {reason}")]
    Response {
        /// Additional context about the response failure.
        reason: String,
    },
}

impl InvokeError {
    /// Convenience constructor for configuration issues.
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for unusable responses.
    pub fn response(reason: impl Into<String>) -> Self {
        Self::Response {
            reason: reason.into(),
        }
    }
}
