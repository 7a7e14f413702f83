use derive_builder::Builder;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct IssueCardRequest {
    pub customer_id: String,
    /// Account number of the wallet the card draws funds from.
    pub wallet_account_number: String,
    pub name_on_card: String,
    #[builder(default)]
    pub card_type: CardType,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub account_number: String,
    pub masked_pan: String,
    pub name_on_card: Option<String>,
    pub status: CardStatus,
    /// Expiry in `MM/YY` format.
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub card_type: CardType,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum CardType {
    #[default]
    #[serde(alias = "physical", alias = "PHYSICAL")]
    Physical,
    #[serde(alias = "virtual", alias = "VIRTUAL")]
    Virtual,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum CardStatus {
    #[serde(alias = "inactive", alias = "INACTIVE")]
    Inactive,
    #[serde(alias = "active", alias = "ACTIVE")]
    Active,
    #[serde(alias = "blocked", alias = "BLOCKED")]
    Blocked,
    #[serde(alias = "expired", alias = "EXPIRED")]
    Expired,
}

/// Activation of a newly issued card, setting its first PIN.
///
/// The PIN is encrypted with the configured public key before leaving the process.
#[derive(Debug, Clone)]
pub struct ActivateCardRequest {
    pub account_number: String,
    pub pin: SecretString,
}

#[derive(Debug, Clone)]
pub struct ChangePinRequest {
    pub account_number: String,
    pub old_pin: SecretString,
    pub new_pin: SecretString,
}

#[derive(Debug, Clone)]
pub struct ResetPinRequest {
    pub account_number: String,
    pub new_pin: SecretString,
}

/// Request to block or unblock a card.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardActionRequest {
    pub account_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
