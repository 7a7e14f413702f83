use crate::common::API_KEY_HEADER;
use async_trait::async_trait;
use reqwest::{header::HeaderValue, Request, Response};
use reqwest_middleware::{Middleware, Next};
use secrecy::{ExposeSecret, SecretString};
use task_local_extensions::Extensions;

/// Reqwest middleware to inject the Embedly API key into outgoing HTTP requests.
pub struct ApiKeyMiddleware {
    pub(crate) api_key: SecretString,
}

#[async_trait]
impl Middleware for ApiKeyMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let mut header_value = HeaderValue::from_str(self.api_key.expose_secret())
            .map_err(|e| reqwest_middleware::Error::Middleware(e.into()))?;
        header_value.set_sensitive(true);
        req.headers_mut().insert(API_KEY_HEADER, header_value);

        next.run(req, extensions).await
    }
}
