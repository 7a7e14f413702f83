//! Deserializable settings to build an [`EmbedlyClient`](crate::EmbedlyClient) from configuration
//! files or environment variables.
//!
//! ```rust,no_run
//! # use embedly_rust::config::EmbedlyConfig;
//! # fn load() -> EmbedlyConfig { unimplemented!() }
//! # fn main() -> Result<(), embedly_rust::Error> {
//! let config: EmbedlyConfig = load(); // e.g. with the `config` crate
//! let embedly = config.into_client()?;
//! # Ok(())
//! # }
//! ```

use crate::{
    client::{EmbedlyClient, EmbedlyClientBuilder, Environment},
    webhook::WebhookValidator,
    Error,
};
use reqwest_retry::{policies::ExponentialBackoff, RetryPolicy};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::{sync::Arc, time::Duration};

/// Embedly client settings.
#[derive(Deserialize, Debug, Clone)]
pub struct EmbedlyConfig {
    pub api_key: SecretString,
    #[serde(default = "default_environment")]
    pub environment: Environment,
    /// Embedly organization the API key belongs to.
    #[serde(default)]
    pub organization_id: Option<String>,
    /// PEM encoded RSA public key used to encrypt card PINs.
    #[serde(default)]
    pub pin_public_key: Option<String>,
    /// Secret used to sign webhooks. Defaults to the API key.
    #[serde(default)]
    pub webhook_secret: Option<SecretString>,
    /// Maximum tolerated age, in seconds, of a webhook timestamp.
    #[serde(default)]
    pub webhook_tolerance_secs: Option<u64>,
    /// Timeout, in seconds, of every HTTP request.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Maximum number of retries of transient failures. `0` disables retries.
    #[serde(default)]
    pub max_retries: Option<u32>,
}

fn default_environment() -> Environment {
    Environment::Production
}

impl EmbedlyConfig {
    /// Builds a client builder from these settings.
    pub fn to_builder(&self) -> Result<EmbedlyClientBuilder, Error> {
        let mut builder = EmbedlyClient::builder(self.api_key.expose_secret().as_str())
            .with_environment(self.environment.clone());

        if let Some(timeout_secs) = self.timeout_secs {
            let http_client = reqwest::Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()?;
            builder = builder.with_http_client(http_client);
        }

        match self.max_retries {
            Some(0) => builder = builder.with_retry_policy(None),
            Some(max_retries) => {
                let retry_policy: Arc<dyn RetryPolicy + Send + Sync> =
                    Arc::new(ExponentialBackoff::builder().build_with_max_retries(max_retries));
                builder = builder.with_retry_policy(retry_policy);
            }
            None => {}
        }

        if let Some(ref pin_public_key) = self.pin_public_key {
            builder = builder.with_pin_public_key(pin_public_key.as_bytes())?;
        }

        Ok(builder)
    }

    /// Builds an [`EmbedlyClient`](crate::EmbedlyClient) from these settings.
    pub fn into_client(self) -> Result<EmbedlyClient, Error> {
        Ok(self.to_builder()?.build())
    }

    /// Builds a [`WebhookValidator`](crate::webhook::WebhookValidator) from these settings.
    pub fn webhook_validator(&self) -> WebhookValidator {
        let secret = self
            .webhook_secret
            .as_ref()
            .unwrap_or(&self.api_key)
            .expose_secret()
            .clone();

        let validator = WebhookValidator::new(secret);
        match self.webhook_tolerance_secs {
            Some(secs) => validator.with_tolerance(Duration::from_secs(secs)),
            None => validator,
        }
    }
}
