use crate::{pollable::IsInTerminalState, EmbedlyClient, Error, Pollable};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use derive_builder::Builder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct CreateWalletRequest {
    pub customer_id: String,
    pub currency_id: String,
    pub name: String,
    #[builder(default, setter(into, strip_option))]
    #[serde(rename = "mobNum", skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub customer_id: Option<String>,
    pub wallet_group_id: Option<String>,
    pub currency_id: Option<String>,
    pub name: Option<String>,
    pub available_balance: Decimal,
    pub ledger_balance: Decimal,
    pub wallet_restriction_id: Option<String>,
    #[serde(default)]
    pub is_internal: bool,
    #[serde(default)]
    pub is_default: bool,
    pub virtual_account: Option<VirtualAccount>,
}

/// NUBAN account through which a wallet can receive bank transfers.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualAccount {
    pub account_number: String,
    pub bank_code: String,
    pub bank_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct WalletToWalletTransferRequest {
    /// Account number of the wallet to debit.
    pub from_account: String,
    /// Account number of the wallet to credit.
    pub to_account: String,
    pub amount: Decimal,
    /// Unique reference of this transfer, also used as idempotency key.
    ///
    /// Defaults to a random UUID.
    #[builder(default = "Uuid::new_v4().to_string()")]
    pub transaction_reference: String,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransferResponse {
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub transaction_reference: String,
}

#[async_trait]
impl Pollable for WalletTransferResponse {
    type Output = WalletTransferStatus;

    async fn poll_once(&self, embedly: &EmbedlyClient) -> Result<Self::Output, Error> {
        embedly
            .wallets
            .get_transfer_status(&self.transaction_reference)
            .await
            .transpose()
            .unwrap_or_else(|| Err(Error::Other(anyhow!("Transfer returned 404 while polling"))))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransferStatus {
    pub transaction_reference: String,
    pub status: TransferStatus,
    pub amount: Decimal,
    pub from_account: Option<String>,
    pub to_account: Option<String>,
    pub failure_reason: Option<String>,
    pub date_created: Option<DateTime<Utc>>,
}

#[async_trait]
impl Pollable for WalletTransferStatus {
    type Output = WalletTransferStatus;

    async fn poll_once(&self, embedly: &EmbedlyClient) -> Result<Self::Output, Error> {
        embedly
            .wallets
            .get_transfer_status(&self.transaction_reference)
            .await
            .transpose()
            .unwrap_or_else(|| Err(Error::Other(anyhow!("Transfer returned 404 while polling"))))
    }
}

impl IsInTerminalState for WalletTransferStatus {
    /// A transfer is considered to be in a terminal state if it is `Successful` or `Failed`.
    fn is_in_terminal_state(&self) -> bool {
        matches!(self.status, TransferStatus::Successful | TransferStatus::Failed)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum TransferStatus {
    #[serde(alias = "pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "processing", alias = "PROCESSING")]
    Processing,
    #[serde(alias = "Success", alias = "successful", alias = "SUCCESSFUL")]
    Successful,
    #[serde(alias = "failed", alias = "FAILED")]
    Failed,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletHistoryRequest {
    pub wallet_id: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub from: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub to: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransaction {
    pub id: String,
    pub wallet_id: String,
    pub amount: Decimal,
    pub debit_credit: DebitCredit,
    pub balance: Option<Decimal>,
    pub transaction_reference: Option<String>,
    pub remarks: Option<String>,
    pub date_created: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum DebitCredit {
    #[serde(rename = "C", alias = "credit", alias = "Credit")]
    Credit,
    #[serde(rename = "D", alias = "debit", alias = "Debit")]
    Debit,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestrictWalletRequest {
    pub restriction: WalletRestriction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum WalletRestriction {
    /// Lifts any restriction.
    None,
    NoDebit,
    NoCredit,
    NoDebitNoCredit,
}

fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}
