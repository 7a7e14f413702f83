use chrono::NaiveDate;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct CreateCorporateCustomerRequest {
    pub organization_id: String,
    /// Registration number issued by the Corporate Affairs Commission.
    pub rc_number: String,
    /// Tax identification number.
    pub tin: String,
    pub full_business_name: String,
    pub business_address: String,
    pub country_id: String,
    pub city: String,
    pub email: String,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_prefer_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CorporateCustomer {
    pub id: String,
    pub organization_id: Option<String>,
    pub rc_number: String,
    pub tin: Option<String>,
    pub full_business_name: String,
    pub business_address: Option<String>,
    pub country_id: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct AddDirectorRequest {
    pub first_name: String,
    pub last_name: String,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub email: String,
    pub phone_number: String,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub bvn: String,
    pub nin: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Director {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCorporateWalletRequest {
    pub name: String,
    pub currency_id: String,
}
