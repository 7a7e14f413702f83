use crate::{
    apis::{
        endpoint, ensure_not_empty, ensure_path_segment,
        products::{CreateProductRequest, Product},
        read_ack, read_data, read_optional, EmbedlyClientInner,
    },
    Error,
};
use std::sync::Arc;
use urlencoding::encode;

/// Embedly products APIs client.
#[derive(Clone, Debug)]
pub struct ProductsApi {
    inner: Arc<EmbedlyClientInner>,
}

impl ProductsApi {
    pub(crate) fn new(inner: Arc<EmbedlyClientInner>) -> Self {
        Self { inner }
    }

    #[tracing::instrument(name = "List Products", skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, Error> {
        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.waas_url(),
                "/api/v1/products/get/all",
            )?)
            .send()
            .await?;

        read_data(res).await
    }

    /// Gets a product.
    ///
    /// If there's no product with the given id, `None` is returned.
    #[tracing::instrument(name = "Get Product by ID", skip(self))]
    pub async fn get_by_id(&self, product_id: &str) -> Result<Option<Product>, Error> {
        ensure_path_segment("product_id", product_id)?;

        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.waas_url(),
                &format!("/api/v1/products/get/{}", encode(product_id)),
            )?)
            .send()
            .await;

        read_optional(res).await
    }

    #[tracing::instrument(name = "Create Product", skip(self, request))]
    pub async fn create(&self, request: &CreateProductRequest) -> Result<Product, Error> {
        ensure_not_empty("name", &request.name)?;

        let res = self
            .inner
            .client
            .post(endpoint(
                &self.inner.environment.waas_url(),
                "/api/v1/products/add",
            )?)
            .json(request)
            .send()
            .await?;

        read_data(res).await
    }

    #[tracing::instrument(name = "Activate Product", skip(self))]
    pub async fn activate(&self, product_id: &str) -> Result<(), Error> {
        self.set_state(product_id, "activate").await
    }

    #[tracing::instrument(name = "Deactivate Product", skip(self))]
    pub async fn deactivate(&self, product_id: &str) -> Result<(), Error> {
        self.set_state(product_id, "deactivate").await
    }

    async fn set_state(&self, product_id: &str, action: &str) -> Result<(), Error> {
        ensure_path_segment("product_id", product_id)?;

        let res = self
            .inner
            .client
            .put(endpoint(
                &self.inner.environment.waas_url(),
                &format!("/api/v1/products/{}/{}", encode(product_id), action),
            )?)
            .send()
            .await?;

        read_ack(res).await
    }
}
