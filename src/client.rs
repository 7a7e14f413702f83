//! Module containing the main Embedly API client.

use crate::{
    apis::{
        cards::CardsApi, checkout::CheckoutApi, corporate_customers::CorporateCustomersApi,
        customers::CustomersApi, payouts::PayoutsApi, products::ProductsApi,
        wallet_groups::WalletGroupsApi, wallets::WalletsApi, EmbedlyClientInner,
    },
    common::{
        DEFAULT_CARDS_URL, DEFAULT_CHECKOUT_URL, DEFAULT_PAYOUT_URL, DEFAULT_STAGING_CARDS_URL,
        DEFAULT_STAGING_CHECKOUT_URL, DEFAULT_STAGING_PAYOUT_URL, DEFAULT_STAGING_WAAS_URL,
        DEFAULT_WAAS_URL,
    },
    middlewares::{
        api_key::ApiKeyMiddleware,
        error_handling::ErrorHandlingMiddleware,
        retry_idempotent::{BoxedRetryPolicy, RetryIdempotentMiddleware},
        user_agent::InjectUserAgentMiddleware,
    },
    pin::{PinEncryptor, PinError},
};
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::{policies::ExponentialBackoff, RetryPolicy};
use reqwest_tracing::TracingMiddleware;
use secrecy::SecretString;
use serde::Deserialize;
use std::{fmt, sync::Arc};

/// Client for Embedly public APIs.
///
/// Requests are retried on transient failures (timeouts, 5xx, 429) only when they are idempotent:
/// reads, `PUT`s and `DELETE`s, plus money movement `POST`s, which carry their transaction
/// reference as `Idempotency-Key`.
#[derive(Debug, Clone)]
pub struct EmbedlyClient {
    /// Individual customers APIs client.
    pub customers: CustomersApi,
    /// Corporate customers APIs client.
    pub corporate_customers: CorporateCustomersApi,
    /// Wallets APIs client.
    pub wallets: WalletsApi,
    /// Wallet groups APIs client.
    pub wallet_groups: WalletGroupsApi,
    /// Cards APIs client.
    pub cards: CardsApi,
    /// Payouts APIs client.
    pub payouts: PayoutsApi,
    /// Checkout APIs client.
    pub checkout: CheckoutApi,
    /// Products APIs client.
    pub products: ProductsApi,
}

impl EmbedlyClient {
    /// Builds a new [`EmbedlyClient`](crate::client::EmbedlyClient) with the default configuration.
    pub fn new(api_key: impl Into<String>) -> EmbedlyClient {
        EmbedlyClientBuilder::new(api_key).build()
    }

    /// Returns a new builder to configure a new [`EmbedlyClient`](crate::client::EmbedlyClient).
    pub fn builder(api_key: impl Into<String>) -> EmbedlyClientBuilder {
        EmbedlyClientBuilder::new(api_key)
    }
}

/// Builder for an [`EmbedlyClient`](crate::client::EmbedlyClient).
pub struct EmbedlyClientBuilder {
    client: reqwest::Client,
    retry_policy: Option<BoxedRetryPolicy>,
    environment: Environment,
    api_key: SecretString,
    pin_encryptor: Option<PinEncryptor>,
}

impl fmt::Debug for EmbedlyClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbedlyClientBuilder")
            .field("retry_policy", &self.retry_policy)
            .field("environment", &self.environment)
            .field("pin_encryptor", &self.pin_encryptor)
            .finish_non_exhaustive()
    }
}

impl EmbedlyClientBuilder {
    /// Creates a new builder to configure an [`EmbedlyClient`](crate::client::EmbedlyClient).
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            retry_policy: Some(BoxedRetryPolicy(Arc::new(
                ExponentialBackoff::builder().build_with_max_retries(3),
            ))),
            environment: Environment::Production,
            api_key: SecretString::new(api_key.into()),
            pin_encryptor: None,
        }
    }

    /// Consumes the builder and builds a new [`EmbedlyClient`](crate::client::EmbedlyClient).
    pub fn build(self) -> EmbedlyClient {
        let mut builder = reqwest_middleware::ClientBuilder::new(self.client)
            .with(TracingMiddleware::default())
            .with(ErrorHandlingMiddleware);

        if let Some(retry_policy) = self.retry_policy {
            builder = builder.with(RetryIdempotentMiddleware::new(retry_policy));
        }

        let client: ClientWithMiddleware = builder
            .with(ApiKeyMiddleware {
                api_key: self.api_key,
            })
            .with(InjectUserAgentMiddleware::new())
            .build();

        let inner = Arc::new(EmbedlyClientInner {
            client,
            environment: self.environment,
            pin_encryptor: self.pin_encryptor,
        });

        EmbedlyClient {
            customers: CustomersApi::new(inner.clone()),
            corporate_customers: CorporateCustomersApi::new(inner.clone()),
            wallets: WalletsApi::new(inner.clone()),
            wallet_groups: WalletGroupsApi::new(inner.clone()),
            cards: CardsApi::new(inner.clone()),
            payouts: PayoutsApi::new(inner.clone()),
            checkout: CheckoutApi::new(inner.clone()),
            products: ProductsApi::new(inner),
        }
    }

    /// Sets a specific reqwest [`Client`](reqwest::Client) to use.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Sets a specific [`RetryPolicy`](retry_policies::RetryPolicy) to use when retrying transient failures.
    ///
    /// To disable automatic retrying of failed requests, use `None`.
    pub fn with_retry_policy(
        mut self,
        retry_policy: impl Into<Option<Arc<dyn RetryPolicy + Send + Sync + 'static>>>,
    ) -> Self {
        self.retry_policy = retry_policy.into().map(BoxedRetryPolicy);
        self
    }

    /// Sets the environment to which this client should connect.
    ///
    /// Defaults to [`Environment::Production`](crate::client::Environment::Production).
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Configures the RSA public key (PEM) used to encrypt card PINs before they leave the process.
    ///
    /// Required by the [`CardsApi`](crate::apis::cards::CardsApi) operations which send a PIN.
    pub fn with_pin_public_key(mut self, public_key_pem: &[u8]) -> Result<Self, PinError> {
        self.pin_encryptor = Some(PinEncryptor::from_pem(public_key_pem)?);
        Ok(self)
    }
}

/// Embedly environment to which an [`EmbedlyClient`](crate::client::EmbedlyClient) connects.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Embedly Staging environment.
    Staging,
    /// Embedly Production environment.
    Production,
    /// Custom environment. This variant is mainly used for tests.
    Custom {
        waas_url: Url,
        payout_url: Url,
        checkout_url: Url,
        cards_url: Url,
    },
}

impl Environment {
    /// Builds a custom environment where all the services share the same base url.
    ///
    /// Any path of `url` is kept as a prefix of every endpoint, which allows going through a
    /// reverse proxy mounted under a sub-path.
    pub fn from_single_url(url: &Url) -> Environment {
        Environment::Custom {
            waas_url: url.clone(),
            payout_url: url.clone(),
            checkout_url: url.clone(),
            cards_url: url.clone(),
        }
    }

    /// Base URL of the wallet-as-a-service APIs (customers, wallets, products).
    pub fn waas_url(&self) -> Url {
        match self {
            Environment::Staging => parse_default(DEFAULT_STAGING_WAAS_URL),
            Environment::Production => parse_default(DEFAULT_WAAS_URL),
            Environment::Custom { waas_url, .. } => waas_url.clone(),
        }
    }

    /// Base URL of the payouts APIs.
    pub fn payout_url(&self) -> Url {
        match self {
            Environment::Staging => parse_default(DEFAULT_STAGING_PAYOUT_URL),
            Environment::Production => parse_default(DEFAULT_PAYOUT_URL),
            Environment::Custom { payout_url, .. } => payout_url.clone(),
        }
    }

    /// Base URL of the checkout APIs.
    pub fn checkout_url(&self) -> Url {
        match self {
            Environment::Staging => parse_default(DEFAULT_STAGING_CHECKOUT_URL),
            Environment::Production => parse_default(DEFAULT_CHECKOUT_URL),
            Environment::Custom { checkout_url, .. } => checkout_url.clone(),
        }
    }

    /// Base URL of the cards APIs.
    pub fn cards_url(&self) -> Url {
        match self {
            Environment::Staging => parse_default(DEFAULT_STAGING_CARDS_URL),
            Environment::Production => parse_default(DEFAULT_CARDS_URL),
            Environment::Custom { cards_url, .. } => cards_url.clone(),
        }
    }
}

// The defaults are compile-time constants known to be valid URLs
fn parse_default(url: &str) -> Url {
    Url::parse(url).expect("Invalid default URL")
}
