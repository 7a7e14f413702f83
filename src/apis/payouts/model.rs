use crate::{pollable::IsInTerminalState, EmbedlyClient, Error, Pollable};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    pub bank_code: String,
    pub bank_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NameEnquiryRequest {
    pub bank_code: String,
    pub account_number: String,
}

/// Holder of a bank account, as resolved by the bank.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NameEnquiry {
    pub account_number: String,
    pub account_name: String,
    pub bank_code: Option<String>,
    pub bank_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct InterBankTransferRequest {
    pub destination_bank_code: String,
    pub destination_account_number: String,
    pub destination_account_name: String,
    /// Account number of the wallet to debit.
    pub source_account_number: String,
    pub source_account_name: String,
    pub amount: Decimal,
    #[builder(default = "\"NGN\".to_string()")]
    pub currency_id: String,
    pub remarks: String,
    /// Unique reference of this payout, also used as idempotency key.
    ///
    /// Defaults to a random UUID.
    #[builder(default = "Uuid::new_v4().to_string()")]
    pub customer_transaction_reference: String,
    /// Overrides the organization webhook URL for notifications about this payout.
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InterBankTransferResponse {
    /// Reference under which the status of the payout can be queried.
    #[serde(default)]
    pub payment_reference: String,
    pub session_id: Option<String>,
    pub status: Option<PayoutStatus>,
}

#[async_trait]
impl Pollable for InterBankTransferResponse {
    type Output = PayoutTransaction;

    async fn poll_once(&self, embedly: &EmbedlyClient) -> Result<Self::Output, Error> {
        embedly
            .payouts
            .get_status(&self.payment_reference)
            .await
            .transpose()
            .unwrap_or_else(|| Err(Error::Other(anyhow!("Payout returned 404 while polling"))))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PayoutTransaction {
    pub payment_reference: String,
    pub status: PayoutStatus,
    pub amount: Decimal,
    pub destination_account_number: Option<String>,
    pub destination_bank_code: Option<String>,
    pub failure_reason: Option<String>,
    pub date_created: Option<DateTime<Utc>>,
}

#[async_trait]
impl Pollable for PayoutTransaction {
    type Output = PayoutTransaction;

    async fn poll_once(&self, embedly: &EmbedlyClient) -> Result<Self::Output, Error> {
        embedly
            .payouts
            .get_status(&self.payment_reference)
            .await
            .transpose()
            .unwrap_or_else(|| Err(Error::Other(anyhow!("Payout returned 404 while polling"))))
    }
}

impl IsInTerminalState for PayoutTransaction {
    /// A payout is considered to be in a terminal state if it is `Successful`, `Failed` or `Reversed`.
    fn is_in_terminal_state(&self) -> bool {
        matches!(
            self.status,
            PayoutStatus::Successful | PayoutStatus::Failed | PayoutStatus::Reversed
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum PayoutStatus {
    #[serde(alias = "pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "processing", alias = "PROCESSING")]
    Processing,
    #[serde(alias = "Success", alias = "successful", alias = "SUCCESSFUL")]
    Successful,
    #[serde(alias = "failed", alias = "FAILED")]
    Failed,
    #[serde(alias = "reversed", alias = "REVERSED")]
    Reversed,
}
