use crate::{
    apis::{
        checkout::{CheckoutTransaction, CheckoutWallet, GenerateCheckoutWalletRequest},
        endpoint, ensure_not_empty, ensure_path_segment, read_data, read_optional,
        EmbedlyClientInner,
    },
    Error,
};
use std::sync::Arc;
use urlencoding::encode;

/// Embedly checkout APIs client.
#[derive(Clone, Debug)]
pub struct CheckoutApi {
    inner: Arc<EmbedlyClientInner>,
}

impl CheckoutApi {
    pub(crate) fn new(inner: Arc<EmbedlyClientInner>) -> Self {
        Self { inner }
    }

    /// Generates a temporary account to collect a single payment.
    #[tracing::instrument(
        name = "Generate Checkout Wallet",
        skip(self, request),
        fields(
            expected_amount = %request.expected_amount,
            reference = %request.reference,
        )
    )]
    pub async fn generate_wallet(
        &self,
        request: &GenerateCheckoutWalletRequest,
    ) -> Result<CheckoutWallet, Error> {
        ensure_not_empty("organization_id", &request.organization_id)?;
        ensure_not_empty("reference", &request.reference)?;

        let res = self
            .inner
            .client
            .post(endpoint(
                &self.inner.environment.checkout_url(),
                "/api/v1/checkout-wallet",
            )?)
            .json(request)
            .send()
            .await?;

        read_data(res).await
    }

    /// Gets a checkout wallet.
    ///
    /// If there's no checkout wallet with the given id, `None` is returned.
    #[tracing::instrument(name = "Get Checkout Wallet", skip(self))]
    pub async fn get_wallet(&self, wallet_id: &str) -> Result<Option<CheckoutWallet>, Error> {
        ensure_path_segment("wallet_id", wallet_id)?;

        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.checkout_url(),
                &format!("/api/v1/checkout-wallet/{}", encode(wallet_id)),
            )?)
            .send()
            .await;

        read_optional(res).await
    }

    /// Lists the transfers received by a checkout wallet.
    #[tracing::instrument(name = "List Checkout Transactions", skip(self))]
    pub async fn list_transactions(
        &self,
        wallet_id: &str,
    ) -> Result<Vec<CheckoutTransaction>, Error> {
        ensure_path_segment("wallet_id", wallet_id)?;

        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.checkout_url(),
                &format!(
                    "/api/v1/checkout-wallet/{}/transactions",
                    encode(wallet_id)
                ),
            )?)
            .send()
            .await?;

        read_data(res).await
    }
}
