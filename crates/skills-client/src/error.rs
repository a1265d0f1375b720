//! Client error types.
//!
//! Every operation surfaces failures through [`SkillsClientError`].  The
//! variants separate the three ways a call can go wrong: the request never
//! completed, the server answered with an unexpected status, or the body did
//! not have the expected shape.

/// Unified error type for the skills client.
#[derive(Debug, thiserror::Error)]
pub enum SkillsClientError {
    // -- Transport -----------------------------------------------------------
    /// The request could not be built or sent, or the response body could
    /// not be read to completion.
    #[error("transport error in `{operation}`: {reason}")]
    Transport {
        operation: &'static str,
        reason: String,
    },

    /// The transport gave up after its configured timeout.
    #[error("`{operation}` timed out after {seconds}s")]
    Timeout {
        operation: &'static str,
        seconds: u64,
    },

    // -- Response ------------------------------------------------------------
    /// The server answered with a status other than the one the operation
    /// expects.  `body` is the raw response body, untouched.
    #[error("`{operation}` returned status {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded into the expected type.
    #[error("failed to decode `{operation}` response: {reason}")]
    Decode {
        operation: &'static str,
        reason: String,
    },

    /// The request payload could not be serialized.
    #[error("failed to encode `{operation}` request: {reason}")]
    Encode {
        operation: &'static str,
        reason: String,
    },

    // -- Configuration -------------------------------------------------------
    /// Client configuration is missing or invalid.
    #[error("config error: {reason}")]
    Config { reason: String },
}

impl SkillsClientError {
    /// Returns `true` if the request never produced a complete response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }

    /// Returns `true` if the server answered with an unexpected status.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }

    /// Returns `true` if the response body had the wrong shape.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// The HTTP status carried by a [`SkillsClientError::Status`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the client crate.
pub type Result<T> = std::result::Result<T, SkillsClientError>;
