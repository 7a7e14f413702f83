//! Validation and dispatching of webhooks sent by Embedly.
//!
//! Every webhook carries an `x-embedly-signature` header containing the lowercase hex
//! HMAC-SHA512 of the raw request body, keyed with the webhook secret (your API key, unless
//! configured otherwise in the Embedly dashboard).
//!
//! When a timestamp tolerance is configured, webhooks must also carry an `x-embedly-timestamp`
//! header (Unix seconds) and the signature covers `"{timestamp}.{body}"` instead of the bare
//! body, so a captured webhook cannot be replayed with a fresh timestamp.
//!
//! ```rust,no_run
//! # use embedly_rust::webhook::WebhookValidator;
//! # let raw_body = "";
//! # let signature_header = "";
//! let validator = WebhookValidator::new("my-webhook-secret");
//! let event = validator.validate(raw_body, signature_header)?;
//! println!("Received {} webhook", event.event);
//! # Ok::<(), embedly_rust::webhook::WebhookError>(())
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::Sha512;
use std::{fmt, time::Duration};

pub use crate::common::{WEBHOOK_SIGNATURE_HEADER, WEBHOOK_TIMESTAMP_HEADER};

type HmacSha512 = Hmac<Sha512>;

/// Reasons for rejecting a webhook.
#[derive(thiserror::Error, Debug)]
pub enum WebhookError {
    #[error("Webhook payload is missing")]
    MissingPayload,
    #[error("Webhook signature is missing")]
    MissingSignature,
    #[error("Webhook signature does not match the payload")]
    InvalidSignature,
    #[error("Webhook timestamp is missing or not a Unix timestamp")]
    MissingTimestamp,
    #[error("Webhook timestamp {0} is outside the tolerance window")]
    TimestampOutOfTolerance(i64),
    #[error("Webhook payload is not valid JSON: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    /// The [`WebhookHandler`](crate::webhook::WebhookHandler) failed to process a valid event.
    #[error("Webhook handler failed: {0}")]
    Handler(#[source] anyhow::Error),
}

/// Checks signatures (and optionally timestamps) of incoming webhooks.
#[derive(Clone)]
pub struct WebhookValidator {
    secret: SecretString,
    tolerance: Option<Duration>,
}

impl WebhookValidator {
    /// Builds a validator using the given shared secret. No timestamp check is performed.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            tolerance: None,
        }
    }

    /// Requires webhooks to carry a timestamp no further than `tolerance` from the current time.
    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Computes the signature Embedly would send for `payload` when no timestamp is involved.
    pub fn sign(&self, payload: &str) -> String {
        hex::encode(self.mac(&[payload.as_bytes()]).finalize().into_bytes())
    }

    /// Computes the signature of `payload` bound to `timestamp`, as expected by validators with a
    /// tolerance.
    pub fn sign_with_timestamp(&self, payload: &str, timestamp: i64) -> String {
        let timestamp = timestamp.to_string();
        hex::encode(
            self.mac(&[timestamp.as_bytes(), &b"."[..], payload.as_bytes()])
                .finalize()
                .into_bytes(),
        )
    }

    /// Returns `true` if `signature` is valid for `payload` and the payload is a well-formed event.
    ///
    /// Always `false` when a tolerance is configured, since no timestamp is provided: use
    /// [`validate_with_timestamp`](Self::validate_with_timestamp) instead.
    pub fn is_valid(&self, payload: &str, signature: &str) -> bool {
        self.validate(payload, signature).is_ok()
    }

    /// Validates the signature of `payload` and parses it into a [`WebhookEvent`].
    ///
    /// If a tolerance is configured this always fails with
    /// [`WebhookError::MissingTimestamp`](crate::webhook::WebhookError::MissingTimestamp).
    pub fn validate(&self, payload: &str, signature: &str) -> Result<WebhookEvent, WebhookError> {
        self.validate_with_timestamp(payload, signature, None)
    }

    /// Validates the signature of `payload`, the timestamp header (when a tolerance is
    /// configured) and parses the payload into a [`WebhookEvent`].
    pub fn validate_with_timestamp(
        &self,
        payload: &str,
        signature: &str,
        timestamp: Option<&str>,
    ) -> Result<WebhookEvent, WebhookError> {
        self.validate_at(payload, signature, timestamp, Utc::now())
    }

    fn validate_at(
        &self,
        payload: &str,
        signature: &str,
        timestamp: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<WebhookEvent, WebhookError> {
        if payload.trim().is_empty() {
            return Err(WebhookError::MissingPayload);
        }

        let signature = signature.trim();
        if signature.is_empty() {
            return Err(WebhookError::MissingSignature);
        }

        match self.tolerance {
            None => check_signature(&self.sign(payload), signature)?,
            Some(tolerance) => {
                let timestamp = timestamp
                    .and_then(|t| t.trim().parse::<i64>().ok())
                    .ok_or(WebhookError::MissingTimestamp)?;

                check_signature(&self.sign_with_timestamp(payload, timestamp), signature)?;

                if now.timestamp().abs_diff(timestamp) > tolerance.as_secs() {
                    return Err(WebhookError::TimestampOutOfTolerance(timestamp));
                }
            }
        }

        Ok(serde_json::from_str(payload)?)
    }

    fn mac(&self, parts: &[&[u8]]) -> HmacSha512 {
        let mut mac = HmacSha512::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        for part in parts {
            mac.update(part);
        }
        mac
    }
}

fn check_signature(expected: &str, signature: &str) -> Result<(), WebhookError> {
    // Compare the hex strings rather than decoded bytes, so that case changes are rejected too
    if expected.len() != signature.len()
        || !openssl::memcmp::eq(expected.as_bytes(), signature.as_bytes())
    {
        return Err(WebhookError::InvalidSignature);
    }

    Ok(())
}

impl fmt::Debug for WebhookValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookValidator")
            .field("tolerance", &self.tolerance)
            .finish_non_exhaustive()
    }
}

/// A webhook event as sent by Embedly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WebhookEvent {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl WebhookEvent {
    /// Classifies this event by its `event` field.
    pub fn kind(&self) -> WebhookEventKind {
        match self.event.to_ascii_lowercase().as_str() {
            "nip" | "nip.inflow" => WebhookEventKind::Nip,
            "payout" | "payout.status" => WebhookEventKind::Payout,
            "checkout.payment.success" | "checkout.payment" => WebhookEventKind::Checkout,
            "card.transaction" | "card" => WebhookEventKind::CardTransaction,
            _ => WebhookEventKind::Unknown,
        }
    }

    /// Deserializes the `data` field of this event into a typed notification.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data)
    }
}

/// Kinds of webhook events known to this crate.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum WebhookEventKind {
    Nip,
    Payout,
    Checkout,
    CardTransaction,
    Unknown,
}

/// Inflow to a wallet through the NIBSS Instant Payment network.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NipNotification {
    pub account_number: String,
    pub reference: String,
    pub amount: Decimal,
    #[serde(default)]
    pub fee: Decimal,
    pub sender_name: Option<String>,
    pub sender_bank: Option<String>,
    pub narration: Option<String>,
    pub date_of_transaction: Option<String>,
}

/// Status update of an inter-bank payout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PayoutNotification {
    pub payment_reference: String,
    pub status: String,
    pub amount: Decimal,
    pub debit_account_number: Option<String>,
    pub credit_account_number: Option<String>,
    pub credit_account_name: Option<String>,
    pub narration: Option<String>,
}

/// Payment received on a checkout wallet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutNotification {
    pub wallet_number: String,
    pub reference: String,
    pub amount: Decimal,
    pub status: String,
    pub sender_name: Option<String>,
}

/// Authorization or settlement on an issued card.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardTransactionNotification {
    pub account_number: String,
    pub masked_pan: Option<String>,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub merchant_name: Option<String>,
    pub status: String,
    pub reference: String,
}

/// Application logic for validated webhook events.
///
/// Every method defaults to ignoring the event, so implementors only override what they need.
#[async_trait]
pub trait WebhookHandler: Send + Sync {
    async fn on_nip(&self, _notification: NipNotification) -> anyhow::Result<()> {
        Ok(())
    }

    async fn on_payout(&self, _notification: PayoutNotification) -> anyhow::Result<()> {
        Ok(())
    }

    async fn on_checkout(&self, _notification: CheckoutNotification) -> anyhow::Result<()> {
        Ok(())
    }

    async fn on_card_transaction(
        &self,
        _notification: CardTransactionNotification,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    async fn on_unknown(&self, event: WebhookEvent) -> anyhow::Result<()> {
        tracing::warn!(event = %event.event, "Ignoring unknown webhook event");
        Ok(())
    }
}

/// Validates incoming webhooks and dispatches them to a [`WebhookHandler`].
#[derive(Debug, Clone)]
pub struct WebhookProcessor<H> {
    validator: WebhookValidator,
    handler: H,
}

impl<H: WebhookHandler> WebhookProcessor<H> {
    pub fn new(validator: WebhookValidator, handler: H) -> Self {
        Self { validator, handler }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Validates a raw webhook and, if valid, hands it over to the handler.
    ///
    /// Returns the event that was processed.
    #[tracing::instrument(name = "Process Webhook", skip_all)]
    pub async fn process(
        &self,
        payload: &str,
        signature: &str,
        timestamp: Option<&str>,
    ) -> Result<WebhookEvent, WebhookError> {
        let event = self
            .validator
            .validate_with_timestamp(payload, signature, timestamp)
            .map_err(|e| {
                tracing::debug!("Rejected webhook: {}", e);
                e
            })?;

        let kind = event.kind();
        tracing::debug!(event = %event.event, ?kind, "Dispatching webhook");

        let res = match kind {
            WebhookEventKind::Nip => self.handler.on_nip(event.data_as()?).await,
            WebhookEventKind::Payout => self.handler.on_payout(event.data_as()?).await,
            WebhookEventKind::Checkout => self.handler.on_checkout(event.data_as()?).await,
            WebhookEventKind::CardTransaction => {
                self.handler.on_card_transaction(event.data_as()?).await
            }
            WebhookEventKind::Unknown => self.handler.on_unknown(event.clone()).await,
        };
        res.map_err(WebhookError::Handler)?;

        Ok(event)
    }
}
