use chrono::NaiveDate;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct CreateCustomerRequest {
    pub organization_id: String,
    pub first_name: String,
    pub last_name: String,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(rename = "dob")]
    pub date_of_birth: NaiveDate,
    pub customer_type_id: String,
    pub country_id: String,
    pub mobile_number: String,
    pub email_address: String,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub organization_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    /// Date of birth as returned by Embedly (usually `YYYY-MM-DDT00:00:00`).
    #[serde(rename = "dob")]
    pub date_of_birth: Option<String>,
    pub customer_type_id: Option<String>,
    pub country_id: Option<String>,
    pub mobile_number: Option<String>,
    pub email_address: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    /// KYC tier, from 1 (unverified) to 3 (fully verified).
    pub customer_tier_id: Option<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerNameRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerContactRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
}

/// Verification of a customer through their National Identification Number.
///
/// Sent as query parameters.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NinKycRequest {
    pub nin: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "dob")]
    pub date_of_birth: NaiveDate,
}

/// Verification of a customer through their Bank Verification Number.
///
/// Sent as query parameters.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BvnKycRequest {
    pub bvn: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KycUpgradeResult {
    pub customer_id: Option<String>,
    pub customer_tier_id: Option<u8>,
    #[serde(default)]
    pub verified: bool,
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerType {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: String,
    pub name: String,
    pub country_code_two: Option<String>,
    pub country_code_three: Option<String>,
}
