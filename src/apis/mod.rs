//! Clients for the various Embedly APIs.

use crate::{
    client::Environment,
    common::REQUEST_ID_HEADER,
    error::{ApiError, Error},
    pin::PinEncryptor,
};
use anyhow::anyhow;
use reqwest::{Response, Url};
use reqwest_middleware::ClientWithMiddleware;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

pub mod cards;
pub mod checkout;
pub mod corporate_customers;
pub mod customers;
pub mod payouts;
pub mod products;
pub mod wallet_groups;
pub mod wallets;

pub(crate) struct EmbedlyClientInner {
    pub(crate) client: ClientWithMiddleware,
    pub(crate) environment: Environment,
    pub(crate) pin_encryptor: Option<PinEncryptor>,
}

impl EmbedlyClientInner {
    /// Returns the configured PIN encryptor, or fails if none was configured.
    pub(crate) fn pin_encryptor(&self) -> Result<&PinEncryptor, Error> {
        self.pin_encryptor.as_ref().ok_or_else(|| {
            Error::invalid_argument(
                "pin",
                "a PIN public key must be configured to send card PINs",
            )
        })
    }
}

impl Debug for EmbedlyClientInner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbedlyClientInner")
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

/// Envelope wrapping every response body returned by Embedly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub code: Option<String>,
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Appends a path to one of the environment base URLs, keeping any path prefix of the base
/// (e.g. `https://gateway.example.com/embedly/`).
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url, Error> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let prefix = format!("{}/", base.path());
        base.set_path(&prefix);
    }

    base.join(path.trim_start_matches('/'))
        .map_err(|e| Error::Other(anyhow!("Invalid endpoint {}: {}", path, e)))
}

/// Fails if a required identifier is empty or blank.
pub(crate) fn ensure_not_empty(name: &'static str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::invalid_argument(name, "must not be empty"));
    }

    Ok(())
}

/// Fails if an identifier cannot be used as a single URL path segment.
///
/// Percent-encoding leaves `.` and `..` untouched, and URL resolution would treat them as
/// relative segments pointing to another resource.
pub(crate) fn ensure_path_segment(name: &'static str, value: &str) -> Result<(), Error> {
    ensure_not_empty(name, value)?;

    if value == "." || value == ".." {
        return Err(Error::invalid_argument(
            name,
            "must not be a relative path segment",
        ));
    }

    Ok(())
}

/// Reads the envelope of a successful HTTP response, failing if Embedly reported an error in it.
async fn read_envelope<T: DeserializeOwned>(res: Response) -> Result<ApiResponse<T>, Error> {
    let status = res.status().as_u16();
    let request_id = res
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let envelope: ApiResponse<T> = res.json().await?;
    if !envelope.success {
        tracing::debug!(code = ?envelope.code, "Embedly reported a failure in a 2xx response");

        return Err(Error::ApiError(ApiError {
            status,
            code: envelope.code,
            message: envelope
                .message
                .unwrap_or_else(|| "request_failed".to_string()),
            request_id,
            errors: Default::default(),
        }));
    }

    Ok(envelope)
}

/// Unwraps the `data` of a successful response.
pub(crate) async fn read_data<T: DeserializeOwned>(res: Response) -> Result<T, Error> {
    read_envelope(res)
        .await?
        .data
        .ok_or_else(|| Error::Other(anyhow!("Embedly response did not contain any data")))
}

/// Checks that a response without meaningful data was successful.
pub(crate) async fn read_ack(res: Response) -> Result<(), Error> {
    read_envelope::<serde_json::Value>(res).await?;
    Ok(())
}

/// Maps a 404 to `None`, otherwise behaves like [`read_data`].
pub(crate) async fn read_optional<T: DeserializeOwned>(
    res: reqwest_middleware::Result<Response>,
) -> Result<Option<T>, Error> {
    match res.map_err(Error::from) {
        Ok(res) => Ok(Some(read_data(res).await?)),
        Err(Error::ApiError(api_error)) if api_error.status == 404 => Ok(None),
        Err(e) => Err(e),
    }
}
