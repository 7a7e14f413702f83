use crate::{
    apis::{
        endpoint, ensure_not_empty, ensure_path_segment, read_ack, read_data, read_optional,
        wallet_groups::{CreateWalletGroupRequest, WalletGroup},
        EmbedlyClientInner,
    },
    Error,
};
use std::sync::Arc;
use urlencoding::encode;

/// Embedly wallet groups APIs client.
#[derive(Clone, Debug)]
pub struct WalletGroupsApi {
    inner: Arc<EmbedlyClientInner>,
}

impl WalletGroupsApi {
    pub(crate) fn new(inner: Arc<EmbedlyClientInner>) -> Self {
        Self { inner }
    }

    /// Creates an empty wallet group.
    #[tracing::instrument(name = "Create Wallet Group", skip(self, request))]
    pub async fn create(&self, request: &CreateWalletGroupRequest) -> Result<WalletGroup, Error> {
        ensure_not_empty("organization_id", &request.organization_id)?;
        ensure_not_empty("name", &request.name)?;

        let res = self
            .inner
            .client
            .post(endpoint(
                &self.inner.environment.waas_url(),
                "/api/v1/wallets/groups/add",
            )?)
            .json(request)
            .send()
            .await?;

        read_data(res).await
    }

    #[tracing::instrument(name = "List Wallet Groups", skip(self))]
    pub async fn list(&self) -> Result<Vec<WalletGroup>, Error> {
        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.waas_url(),
                "/api/v1/wallets/groups/get/all",
            )?)
            .send()
            .await?;

        read_data(res).await
    }

    /// Gets a wallet group.
    ///
    /// If there's no group with the given id, `None` is returned.
    #[tracing::instrument(name = "Get Wallet Group by ID", skip(self))]
    pub async fn get_by_id(&self, group_id: &str) -> Result<Option<WalletGroup>, Error> {
        ensure_path_segment("group_id", group_id)?;

        let res = self
            .inner
            .client
            .get(endpoint(
                &self.inner.environment.waas_url(),
                &format!("/api/v1/wallets/groups/get/{}", encode(group_id)),
            )?)
            .send()
            .await;

        read_optional(res).await
    }

    /// Adds a wallet to a group, returning the updated group.
    #[tracing::instrument(name = "Add Wallet to Group", skip(self))]
    pub async fn add_wallet(&self, group_id: &str, wallet_id: &str) -> Result<WalletGroup, Error> {
        ensure_path_segment("group_id", group_id)?;
        ensure_path_segment("wallet_id", wallet_id)?;

        let res = self
            .inner
            .client
            .post(endpoint(
                &self.inner.environment.waas_url(),
                &group_wallet_path(group_id, wallet_id),
            )?)
            .send()
            .await?;

        read_data(res).await
    }

    #[tracing::instrument(name = "Remove Wallet from Group", skip(self))]
    pub async fn remove_wallet(&self, group_id: &str, wallet_id: &str) -> Result<(), Error> {
        ensure_path_segment("group_id", group_id)?;
        ensure_path_segment("wallet_id", wallet_id)?;

        let res = self
            .inner
            .client
            .delete(endpoint(
                &self.inner.environment.waas_url(),
                &group_wallet_path(group_id, wallet_id),
            )?)
            .send()
            .await?;

        read_ack(res).await
    }
}

fn group_wallet_path(group_id: &str, wallet_id: &str) -> String {
    format!(
        "/api/v1/wallets/groups/{}/wallets/{}",
        encode(group_id),
        encode(wallet_id)
    )
}
