use crate::{
    apis::{
        corporate_customers::{
            AddDirectorRequest, CorporateCustomer, CreateCorporateCustomerRequest,
            CreateCorporateWalletRequest, Director,
        },
        endpoint, ensure_not_empty, ensure_path_segment, read_data, read_optional,
        wallets::Wallet,
        EmbedlyClientInner,
    },
    Error,
};
use std::sync::Arc;
use urlencoding::encode;

/// Embedly corporate customers APIs client.
#[derive(Clone, Debug)]
pub struct CorporateCustomersApi {
    inner: Arc<EmbedlyClientInner>,
}

impl CorporateCustomersApi {
    pub(crate) fn new(inner: Arc<EmbedlyClientInner>) -> Self {
        Self { inner }
    }

    /// Registers a new business as a corporate customer.
    #[tracing::instrument(
        name = "Create Corporate Customer",
        skip(self, request),
        fields(rc_number = %request.rc_number)
    )]
    pub async fn create(
        &self,
        request: &CreateCorporateCustomerRequest,
    ) -> Result<CorporateCustomer, Error> {
        ensure_not_empty("organization_id", &request.organization_id)?;
        ensure_not_empty("rc_number", &request.rc_number)?;

        let res = self
            .inner
            .client
            .post(endpoint(
                &self.inner.environment.waas_url(),
                "/api/v1/corporates/add",
            )?)
            .json(request)
            .send()
            .await?;

        read_data(res).await
    }

    /// Gets the details of an existing corporate customer.
    ///
    /// If there's no corporate customer with the given id, `None` is returned.
    #[tracing::instrument(name = "Get Corporate Customer by ID", skip(self))]
    pub async fn get_by_id(&self, corporate_id: &str) -> Result<Option<CorporateCustomer>, Error> {
        ensure_path_segment("corporate_id", corporate_id)?;

        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.waas_url(),
                &format!("/api/v1/corporates/get/{}", encode(corporate_id)),
            )?)
            .send()
            .await;

        read_optional(res).await
    }

    /// Adds a director to a corporate customer.
    #[tracing::instrument(name = "Add Corporate Director", skip(self, request))]
    pub async fn add_director(
        &self,
        corporate_id: &str,
        request: &AddDirectorRequest,
    ) -> Result<Director, Error> {
        ensure_path_segment("corporate_id", corporate_id)?;
        ensure_not_empty("bvn", &request.bvn)?;

        let res = self
            .inner
            .client
            .post(endpoint(
                &self.inner.environment.waas_url(),
                &format!("/api/v1/corporates/{}/directors", encode(corporate_id)),
            )?)
            .json(request)
            .send()
            .await?;

        read_data(res).await
    }

    /// Lists the directors of a corporate customer.
    #[tracing::instrument(name = "List Corporate Directors", skip(self))]
    pub async fn list_directors(&self, corporate_id: &str) -> Result<Vec<Director>, Error> {
        ensure_path_segment("corporate_id", corporate_id)?;

        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.waas_url(),
                &format!("/api/v1/corporates/{}/directors", encode(corporate_id)),
            )?)
            .send()
            .await?;

        read_data(res).await
    }

    /// Opens a wallet owned by a corporate customer.
    #[tracing::instrument(name = "Create Corporate Wallet", skip(self, request))]
    pub async fn create_wallet(
        &self,
        corporate_id: &str,
        request: &CreateCorporateWalletRequest,
    ) -> Result<Wallet, Error> {
        ensure_path_segment("corporate_id", corporate_id)?;
        ensure_not_empty("currency_id", &request.currency_id)?;

        let res = self
            .inner
            .client
            .post(endpoint(
                &self.inner.environment.waas_url(),
                &format!("/api/v1/corporates/{}/wallets", encode(corporate_id)),
            )?)
            .json(request)
            .send()
            .await?;

        read_data(res).await
    }
}
