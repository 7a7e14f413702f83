use crate::{
    apis::{
        endpoint, ensure_not_empty, ensure_path_segment, read_data, read_optional,
        wallets::{
            CreateWalletRequest, RestrictWalletRequest, Wallet, WalletHistoryRequest,
            WalletToWalletTransferRequest, WalletTransaction, WalletTransferResponse,
            WalletTransferStatus,
        },
        EmbedlyClientInner,
    },
    common::IDEMPOTENCY_KEY_HEADER,
    Error,
};
use std::sync::Arc;
use urlencoding::encode;

/// Embedly wallets APIs client.
#[derive(Clone, Debug)]
pub struct WalletsApi {
    inner: Arc<EmbedlyClientInner>,
}

impl WalletsApi {
    pub(crate) fn new(inner: Arc<EmbedlyClientInner>) -> Self {
        Self { inner }
    }

    /// Opens a new wallet for an existing customer.
    #[tracing::instrument(
        name = "Create Wallet",
        skip(self, request),
        fields(
            customer_id = %request.customer_id,
            currency_id = %request.currency_id,
        )
    )]
    pub async fn create(&self, request: &CreateWalletRequest) -> Result<Wallet, Error> {
        ensure_not_empty("customer_id", &request.customer_id)?;
        ensure_not_empty("currency_id", &request.currency_id)?;

        let res = self
            .inner
            .client
            .post(endpoint(
                &self.inner.environment.waas_url(),
                "/api/v1/wallets/add",
            )?)
            .json(request)
            .send()
            .await?;

        read_data(res).await
    }

    /// Gets the details of an existing wallet.
    ///
    /// If there's no wallet with the given id, `None` is returned.
    #[tracing::instrument(name = "Get Wallet by ID", skip(self))]
    pub async fn get_by_id(&self, wallet_id: &str) -> Result<Option<Wallet>, Error> {
        ensure_path_segment("wallet_id", wallet_id)?;

        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.waas_url(),
                &format!("/api/v1/wallets/get/wallet/{}", encode(wallet_id)),
            )?)
            .send()
            .await;

        read_optional(res).await
    }

    /// Gets a wallet by the number of its virtual account.
    #[tracing::instrument(name = "Get Wallet by Account Number", skip(self))]
    pub async fn get_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<Wallet>, Error> {
        ensure_path_segment("account_number", account_number)?;

        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.waas_url(),
                &format!(
                    "/api/v1/wallets/get/wallet/account/{}",
                    encode(account_number)
                ),
            )?)
            .send()
            .await;

        read_optional(res).await
    }

    /// Lists all the wallets owned by a customer.
    #[tracing::instrument(name = "List Customer Wallets", skip(self))]
    pub async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<Wallet>, Error> {
        ensure_path_segment("customer_id", customer_id)?;

        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.waas_url(),
                &format!("/api/v1/wallets/get/customer/{}", encode(customer_id)),
            )?)
            .send()
            .await?;

        read_data(res).await
    }

    /// Moves funds between two wallets.
    ///
    /// The transaction reference is sent as idempotency key, so the request is safely retried
    /// and submitting the same request twice results in a single transfer.
    #[tracing::instrument(
        name = "Wallet to Wallet Transfer",
        skip(self, request),
        fields(
            amount = %request.amount,
            transaction_reference = %request.transaction_reference,
        )
    )]
    pub async fn transfer(
        &self,
        request: &WalletToWalletTransferRequest,
    ) -> Result<WalletTransferResponse, Error> {
        ensure_not_empty("from_account", &request.from_account)?;
        ensure_not_empty("to_account", &request.to_account)?;
        ensure_not_empty("transaction_reference", &request.transaction_reference)?;
        if request.amount.is_sign_negative() || request.amount.is_zero() {
            return Err(Error::invalid_argument("amount", "must be greater than zero"));
        }

        let res = self
            .inner
            .client
            .post(endpoint(
                &self.inner.environment.waas_url(),
                "/api/v1/wallets/wallet/transaction/v2/wallet-to-wallet",
            )?)
            .header(IDEMPOTENCY_KEY_HEADER, &request.transaction_reference)
            .json(request)
            .send()
            .await?;

        let mut response: WalletTransferResponse = read_data(res).await?;
        if response.transaction_reference.is_empty() {
            response.transaction_reference = request.transaction_reference.clone();
        }

        Ok(response)
    }

    /// Gets the status of a wallet to wallet transfer.
    ///
    /// If there's no transfer with the given reference, `None` is returned.
    #[tracing::instrument(name = "Get Wallet Transfer Status", skip(self))]
    pub async fn get_transfer_status(
        &self,
        transaction_reference: &str,
    ) -> Result<Option<WalletTransferStatus>, Error> {
        ensure_path_segment("transaction_reference", transaction_reference)?;

        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.waas_url(),
                &format!(
                    "/api/v1/wallets/wallet/transaction/wallet-to-wallet/status/{}",
                    encode(transaction_reference)
                ),
            )?)
            .send()
            .await;

        read_optional(res).await
    }

    /// Lists the transactions of a wallet within a time window.
    #[tracing::instrument(
        name = "Get Wallet History",
        skip(self, request),
        fields(wallet_id = %request.wallet_id)
    )]
    pub async fn history(
        &self,
        request: &WalletHistoryRequest,
    ) -> Result<Vec<WalletTransaction>, Error> {
        ensure_not_empty("wallet_id", &request.wallet_id)?;
        if request.from > request.to {
            return Err(Error::invalid_argument("from", "must not be after `to`"));
        }

        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.waas_url(),
                "/api/v1/wallets/history",
            )?)
            .query(request)
            .send()
            .await?;

        read_data(res).await
    }

    /// Restricts debits and/or credits on a wallet, or lifts an existing restriction.
    #[tracing::instrument(name = "Restrict Wallet", skip(self, request))]
    pub async fn restrict(
        &self,
        wallet_id: &str,
        request: &RestrictWalletRequest,
    ) -> Result<Wallet, Error> {
        ensure_path_segment("wallet_id", wallet_id)?;

        let res = self
            .inner
            .client
            .put(endpoint(
                &self.inner.environment.waas_url(),
                &format!("/api/v1/wallets/{}/restrictions", encode(wallet_id)),
            )?)
            .json(request)
            .send()
            .await?;

        read_data(res).await
    }
}
