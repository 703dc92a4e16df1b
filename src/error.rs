//! Error types for WHOIS lookups

use std::io;

use thiserror::Error;

/// WHOIS lookup error type
///
/// Transport failures are transparent: their message is the one the
/// operating system or resolver produced.
#[derive(Error, Debug)]
pub enum WhoisError {
    #[error("domain is empty")]
    EmptyDomain,

    #[error("domain {0} is invalid")]
    InvalidDomain(String),

    #[error(transparent)]
    Connect(io::Error),

    #[error(transparent)]
    Write(io::Error),

    #[error(transparent)]
    Read(io::Error),
}

impl WhoisError {
    /// True for errors raised before any network activity.
    pub fn is_validation(&self) -> bool {
        matches!(self, WhoisError::EmptyDomain | WhoisError::InvalidDomain(_))
    }

    /// The underlying transport error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            WhoisError::Connect(e) | WhoisError::Write(e) | WhoisError::Read(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for WHOIS operations
pub type Result<T> = std::result::Result<T, WhoisError>;
