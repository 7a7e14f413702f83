// Default URLs
pub static DEFAULT_WAAS_URL: &str = "https://waas-prod.embedly.ng";
pub static DEFAULT_PAYOUT_URL: &str = "https://payout-prod.embedly.ng";
pub static DEFAULT_CHECKOUT_URL: &str = "https://checkout-prod.embedly.ng";
pub static DEFAULT_CARDS_URL: &str = "https://waas-card-middleware-api-prod.embedly.ng";
pub static DEFAULT_STAGING_WAAS_URL: &str = "https://waas-staging.embedly.ng";
pub static DEFAULT_STAGING_PAYOUT_URL: &str = "https://payout-staging.embedly.ng";
pub static DEFAULT_STAGING_CHECKOUT_URL: &str = "https://checkout-staging.embedly.ng";
pub static DEFAULT_STAGING_CARDS_URL: &str = "https://waas-card-middleware-api-staging.embedly.ng";

// Header names
pub static API_KEY_HEADER: &str = "x-api-key";
pub static IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";
pub static REQUEST_ID_HEADER: &str = "x-request-id";
pub static WEBHOOK_SIGNATURE_HEADER: &str = "x-embedly-signature";
pub static WEBHOOK_TIMESTAMP_HEADER: &str = "x-embedly-timestamp";
