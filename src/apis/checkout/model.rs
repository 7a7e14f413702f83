use chrono::{DateTime, Utc};
use derive_builder::Builder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct GenerateCheckoutWalletRequest {
    pub organization_id: String,
    /// Amount the payer is expected to transfer.
    pub expected_amount: Decimal,
    #[builder(default = "\"NGN\".to_string()")]
    pub currency_id: String,
    /// Your own reference for the order being paid.
    pub reference: String,
    /// How long the account accepts transfers, in minutes.
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_in_minutes: Option<u32>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

/// Temporary account a payer transfers to during checkout.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutWallet {
    pub id: String,
    pub account_number: String,
    pub account_name: Option<String>,
    pub bank_name: Option<String>,
    pub expected_amount: Decimal,
    pub reference: Option<String>,
    pub status: CheckoutWalletStatus,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum CheckoutWalletStatus {
    #[serde(alias = "active", alias = "ACTIVE")]
    Active,
    #[serde(alias = "paid", alias = "PAID")]
    Paid,
    #[serde(alias = "expired", alias = "EXPIRED")]
    Expired,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTransaction {
    pub id: String,
    pub checkout_wallet_id: Option<String>,
    pub amount: Decimal,
    pub sender_account_number: Option<String>,
    pub sender_name: Option<String>,
    pub sender_bank_name: Option<String>,
    pub session_id: Option<String>,
    pub date_created: DateTime<Utc>,
}
