use crate::{
    apis::{
        cards::{
            ActivateCardRequest, Card, CardActionRequest, ChangePinRequest, IssueCardRequest,
            ResetPinRequest,
        },
        endpoint, ensure_not_empty, ensure_path_segment, read_ack, read_data, read_optional,
        EmbedlyClientInner,
    },
    Error,
};
use secrecy::ExposeSecret;
use serde::Serialize;
use std::sync::Arc;
use urlencoding::encode;

const CARDS_PATH: &str = "/api/v1/operations/cards/afrigo";

/// Embedly cards APIs client.
///
/// Operations that carry a PIN require the client to be configured with the card middleware
/// public key (see [`EmbedlyClientBuilder::with_pin_public_key`](crate::client::EmbedlyClientBuilder::with_pin_public_key)).
#[derive(Clone, Debug)]
pub struct CardsApi {
    inner: Arc<EmbedlyClientInner>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EncryptedPinBody<'a> {
    account_number: &'a str,
    pin: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EncryptedChangePinBody<'a> {
    account_number: &'a str,
    old_pin: String,
    new_pin: String,
}

impl CardsApi {
    pub(crate) fn new(inner: Arc<EmbedlyClientInner>) -> Self {
        Self { inner }
    }

    /// Issues a new card linked to a customer wallet.
    #[tracing::instrument(
        name = "Issue Card",
        skip(self, request),
        fields(customer_id = %request.customer_id, card_type = ?request.card_type)
    )]
    pub async fn issue(&self, request: &IssueCardRequest) -> Result<Card, Error> {
        ensure_not_empty("customer_id", &request.customer_id)?;
        ensure_not_empty("wallet_account_number", &request.wallet_account_number)?;

        let res = self
            .inner
            .client
            .post(self.url("/create")?)
            .json(request)
            .send()
            .await?;

        read_data(res).await
    }

    /// Gets the card linked to a wallet account number.
    ///
    /// If there's no card for the given account, `None` is returned.
    #[tracing::instrument(name = "Get Card by Account Number", skip(self))]
    pub async fn get_by_account_number(&self, account_number: &str) -> Result<Option<Card>, Error> {
        ensure_path_segment("account_number", account_number)?;

        let res = self
            .inner
            .client
            .get(self.url(&format!("/get/{}", encode(account_number)))?)
            .send()
            .await;

        read_optional(res).await
    }

    /// Activates a card and sets its PIN.
    #[tracing::instrument(name = "Activate Card", skip(self, request))]
    pub async fn activate(&self, request: &ActivateCardRequest) -> Result<(), Error> {
        ensure_not_empty("account_number", &request.account_number)?;
        let body = EncryptedPinBody {
            account_number: &request.account_number,
            pin: self
                .inner
                .pin_encryptor()?
                .encrypt(request.pin.expose_secret())?,
        };

        self.put_ack("/activate", &body).await
    }

    #[tracing::instrument(name = "Block Card", skip(self, request))]
    pub async fn block(&self, request: &CardActionRequest) -> Result<(), Error> {
        ensure_not_empty("account_number", &request.account_number)?;
        self.put_ack("/block", request).await
    }

    #[tracing::instrument(name = "Unblock Card", skip(self, request))]
    pub async fn unblock(&self, request: &CardActionRequest) -> Result<(), Error> {
        ensure_not_empty("account_number", &request.account_number)?;
        self.put_ack("/unblock", request).await
    }

    /// Changes the PIN of a card, given the current one.
    #[tracing::instrument(name = "Change Card PIN", skip(self, request))]
    pub async fn change_pin(&self, request: &ChangePinRequest) -> Result<(), Error> {
        ensure_not_empty("account_number", &request.account_number)?;
        let encryptor = self.inner.pin_encryptor()?;
        let body = EncryptedChangePinBody {
            account_number: &request.account_number,
            old_pin: encryptor.encrypt(request.old_pin.expose_secret())?,
            new_pin: encryptor.encrypt(request.new_pin.expose_secret())?,
        };

        self.put_ack("/pin/change", &body).await
    }

    /// Sets a new PIN on a card without knowing the current one.
    #[tracing::instrument(name = "Reset Card PIN", skip(self, request))]
    pub async fn reset_pin(&self, request: &ResetPinRequest) -> Result<(), Error> {
        ensure_not_empty("account_number", &request.account_number)?;
        let body = EncryptedPinBody {
            account_number: &request.account_number,
            pin: self
                .inner
                .pin_encryptor()?
                .encrypt(request.new_pin.expose_secret())?,
        };

        self.put_ack("/pin/reset", &body).await
    }

    fn url(&self, path: &str) -> Result<reqwest::Url, Error> {
        endpoint(
            &self.inner.environment.cards_url(),
            &format!("{}{}", CARDS_PATH, path),
        )
    }

    async fn put_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), Error> {
        let res = self
            .inner
            .client
            .put(self.url(path)?)
            .json(body)
            .send()
            .await?;

        read_ack(res).await
    }
}
