//! Standard errors used by all functions in the crate.

use crate::pin::PinError;
use std::{collections::HashMap, fmt};

/// Error collecting all possible failures of the Embedly client.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Reqwest error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    /// Error returned by an Embedly API endpoint.
    #[error("{0}")]
    ApiError(#[from] ApiError),
    /// A required argument was missing or malformed.
    ///
    /// Returned before any request is sent to the server.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: String,
    },
    /// Error encrypting a card PIN.
    #[error("Error encrypting PIN: {0}")]
    PinEncryption(#[from] PinError),
    /// Catch-all variant for unexpected errors.
    #[error(transparent)]
    Other(anyhow::Error),
}

impl Error {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => Error::HttpError(e),
            reqwest_middleware::Error::Middleware(e) => {
                e.downcast::<Error>().unwrap_or_else(Error::Other)
            }
        }
    }
}

impl From<Error> for reqwest_middleware::Error {
    fn from(e: Error) -> Self {
        reqwest_middleware::Error::Middleware(e.into())
    }
}

/// Embedly HTTP APIs error.
#[derive(thiserror::Error, Debug)]
pub struct ApiError {
    /// HTTP status returned by the server.
    pub status: u16,
    /// Embedly response code, if the server returned one (e.g. `"99"`).
    pub code: Option<String>,
    /// Concise description of the error.
    pub message: String,
    /// The identifier of the failed request, useful when contacting Embedly support.
    pub request_id: Option<String>,
    /// Optional additional details depending on the specific error.
    ///
    /// In the case of validation errors, this map contains a list of all the fields that failed validation.
    pub errors: HashMap<String, Vec<String>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Embedly HTTP error {}: {}", self.status, self.message)?;

        if let Some(ref code) = self.code {
            write!(f, " (code {})", code)?;
        }

        if let Some(ref request_id) = self.request_id {
            write!(f, "\nRequest ID: {}", request_id)?;
        }

        if !self.errors.is_empty() {
            write!(f, "\nAll errors:")?;
            for (k, v) in &self.errors {
                write!(f, "\n- {}: {}", k, v.join(", "))?;
            }
        }

        Ok(())
    }
}
