use crate::{
    apis::{
        endpoint, ensure_not_empty, ensure_path_segment,
        payouts::{
            Bank, InterBankTransferRequest, InterBankTransferResponse, NameEnquiry,
            NameEnquiryRequest, PayoutTransaction,
        },
        read_data, read_optional, EmbedlyClientInner,
    },
    common::IDEMPOTENCY_KEY_HEADER,
    Error,
};
use std::sync::Arc;
use urlencoding::encode;

/// Embedly payouts APIs client.
#[derive(Clone, Debug)]
pub struct PayoutsApi {
    inner: Arc<EmbedlyClientInner>,
}

impl PayoutsApi {
    pub(crate) fn new(inner: Arc<EmbedlyClientInner>) -> Self {
        Self { inner }
    }

    /// Lists the banks payouts can be sent to.
    #[tracing::instrument(name = "List Banks", skip(self))]
    pub async fn list_banks(&self) -> Result<Vec<Bank>, Error> {
        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.payout_url(),
                "/api/Payout/banks",
            )?)
            .send()
            .await?;

        read_data(res).await
    }

    /// Resolves the name of the holder of a bank account.
    #[tracing::instrument(
        name = "Name Enquiry",
        skip(self, request),
        fields(bank_code = %request.bank_code)
    )]
    pub async fn name_enquiry(&self, request: &NameEnquiryRequest) -> Result<NameEnquiry, Error> {
        ensure_not_empty("bank_code", &request.bank_code)?;
        ensure_not_empty("account_number", &request.account_number)?;

        let res = self
            .inner
            .client
            .post(endpoint(
                &self.inner.environment.payout_url(),
                "/api/Payout/name-enquiry",
            )?)
            .json(request)
            .send()
            .await?;

        read_data(res).await
    }

    /// Pays out from a wallet to an account at another bank.
    ///
    /// The customer transaction reference is sent as idempotency key.
    #[tracing::instrument(
        name = "Inter-bank Transfer",
        skip(self, request),
        fields(
            amount = %request.amount,
            currency_id = %request.currency_id,
            customer_transaction_reference = %request.customer_transaction_reference,
        )
    )]
    pub async fn inter_bank_transfer(
        &self,
        request: &InterBankTransferRequest,
    ) -> Result<InterBankTransferResponse, Error> {
        ensure_not_empty("destination_bank_code", &request.destination_bank_code)?;
        ensure_not_empty(
            "destination_account_number",
            &request.destination_account_number,
        )?;
        ensure_not_empty("source_account_number", &request.source_account_number)?;
        ensure_not_empty(
            "customer_transaction_reference",
            &request.customer_transaction_reference,
        )?;
        if request.amount.is_sign_negative() || request.amount.is_zero() {
            return Err(Error::invalid_argument("amount", "must be greater than zero"));
        }

        let res = self
            .inner
            .client
            .post(endpoint(
                &self.inner.environment.payout_url(),
                "/api/Payout/inter-bank-transfer",
            )?)
            .header(
                IDEMPOTENCY_KEY_HEADER,
                &request.customer_transaction_reference,
            )
            .json(request)
            .send()
            .await?;

        let mut response: InterBankTransferResponse = read_data(res).await?;
        if response.payment_reference.is_empty() {
            response.payment_reference = request.customer_transaction_reference.clone();
        }

        Ok(response)
    }

    /// Gets the status of a payout.
    ///
    /// If there's no payout with the given reference, `None` is returned.
    #[tracing::instrument(name = "Get Payout Status", skip(self))]
    pub async fn get_status(
        &self,
        payment_reference: &str,
    ) -> Result<Option<PayoutTransaction>, Error> {
        ensure_path_segment("payment_reference", payment_reference)?;

        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.payout_url(),
                &format!("/api/Payout/status/{}", encode(payment_reference)),
            )?)
            .send()
            .await;

        read_optional(res).await
    }
}
