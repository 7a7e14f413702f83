use crate::{
    apis::{
        customers::{
            BvnKycRequest, Country, CreateCustomerRequest, Customer, CustomerType,
            KycUpgradeResult, NinKycRequest, UpdateCustomerContactRequest,
            UpdateCustomerNameRequest,
        },
        endpoint, ensure_not_empty, ensure_path_segment, read_data, read_optional,
        EmbedlyClientInner,
    },
    Error,
};
use std::sync::Arc;
use urlencoding::encode;

/// Embedly customers APIs client.
#[derive(Clone, Debug)]
pub struct CustomersApi {
    inner: Arc<EmbedlyClientInner>,
}

impl CustomersApi {
    pub(crate) fn new(inner: Arc<EmbedlyClientInner>) -> Self {
        Self { inner }
    }

    /// Creates a new individual customer.
    #[tracing::instrument(
        name = "Create Customer",
        skip(self, request),
        fields(organization_id = %request.organization_id)
    )]
    pub async fn create(&self, request: &CreateCustomerRequest) -> Result<Customer, Error> {
        ensure_not_empty("organization_id", &request.organization_id)?;
        ensure_not_empty("customer_type_id", &request.customer_type_id)?;
        ensure_not_empty("country_id", &request.country_id)?;

        let res = self
            .inner
            .client
            .post(endpoint(
                &self.inner.environment.waas_url(),
                "/api/v1/customers/add",
            )?)
            .json(request)
            .send()
            .await?;

        read_data(res).await
    }

    /// Gets the details of an existing customer.
    ///
    /// If there's no customer with the given id, `None` is returned.
    #[tracing::instrument(name = "Get Customer by ID", skip(self))]
    pub async fn get_by_id(&self, customer_id: &str) -> Result<Option<Customer>, Error> {
        ensure_path_segment("customer_id", customer_id)?;

        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.waas_url(),
                &format!("/api/v1/customers/get/id/{}", encode(customer_id)),
            )?)
            .send()
            .await;

        read_optional(res).await
    }

    /// Lists all the customers of the organization.
    #[tracing::instrument(name = "List Customers", skip(self))]
    pub async fn list(&self) -> Result<Vec<Customer>, Error> {
        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.waas_url(),
                "/api/v1/customers/get/all",
            )?)
            .send()
            .await?;

        read_data(res).await
    }

    /// Updates the name of a customer.
    #[tracing::instrument(name = "Update Customer Name", skip(self, request))]
    pub async fn update_name(
        &self,
        customer_id: &str,
        request: &UpdateCustomerNameRequest,
    ) -> Result<Customer, Error> {
        ensure_path_segment("customer_id", customer_id)?;
        ensure_not_empty("first_name", &request.first_name)?;
        ensure_not_empty("last_name", &request.last_name)?;

        let res = self
            .inner
            .client
            .patch(endpoint(
                &self.inner.environment.waas_url(),
                &format!("/api/v1/customers/customer/{}/updatename", encode(customer_id)),
            )?)
            .json(request)
            .send()
            .await?;

        read_data(res).await
    }

    /// Updates the email address and/or mobile number of a customer.
    #[tracing::instrument(name = "Update Customer Contact", skip(self, request))]
    pub async fn update_contact(
        &self,
        customer_id: &str,
        request: &UpdateCustomerContactRequest,
    ) -> Result<Customer, Error> {
        ensure_path_segment("customer_id", customer_id)?;
        if request.email_address.is_none() && request.mobile_number.is_none() {
            return Err(Error::invalid_argument(
                "request",
                "at least one of email_address and mobile_number must be set",
            ));
        }

        let res = self
            .inner
            .client
            .patch(endpoint(
                &self.inner.environment.waas_url(),
                &format!(
                    "/api/v1/customers/customer/{}/updatecontact",
                    encode(customer_id)
                ),
            )?)
            .json(request)
            .send()
            .await?;

        read_data(res).await
    }

    /// Upgrades the KYC tier of a customer by verifying their NIN.
    #[tracing::instrument(name = "Upgrade Customer KYC with NIN", skip(self, request))]
    pub async fn upgrade_kyc_nin(
        &self,
        customer_id: &str,
        request: &NinKycRequest,
    ) -> Result<KycUpgradeResult, Error> {
        ensure_not_empty("customer_id", customer_id)?;
        ensure_not_empty("nin", &request.nin)?;

        let res = self
            .inner
            .client
            .post(endpoint(
                &self.inner.environment.waas_url(),
                "/api/v1/customers/kyc/customer/nin",
            )?)
            .query(&[("customerId", customer_id)])
            .query(request)
            .send()
            .await?;

        read_data(res).await
    }

    /// Upgrades the KYC tier of a customer by verifying their BVN.
    #[tracing::instrument(name = "Upgrade Customer KYC with BVN", skip(self, request))]
    pub async fn upgrade_kyc_bvn(
        &self,
        customer_id: &str,
        request: &BvnKycRequest,
    ) -> Result<KycUpgradeResult, Error> {
        ensure_not_empty("customer_id", customer_id)?;
        ensure_not_empty("bvn", &request.bvn)?;

        let res = self
            .inner
            .client
            .post(endpoint(
                &self.inner.environment.waas_url(),
                "/api/v1/customers/kyc/premium-kyc",
            )?)
            .query(&[("customerId", customer_id)])
            .query(request)
            .send()
            .await?;

        read_data(res).await
    }

    /// Lists the available customer types (e.g. individual, corporate).
    #[tracing::instrument(name = "List Customer Types", skip(self))]
    pub async fn list_types(&self) -> Result<Vec<CustomerType>, Error> {
        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.waas_url(),
                "/api/v1/customers/types/all",
            )?)
            .send()
            .await?;

        read_data(res).await
    }

    /// Lists the countries customers can be registered in.
    #[tracing::instrument(name = "List Countries", skip(self))]
    pub async fn list_countries(&self) -> Result<Vec<Country>, Error> {
        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.waas_url(),
                "/api/v1/utilities/countries/get",
            )?)
            .send()
            .await?;

        read_data(res).await
    }
}
