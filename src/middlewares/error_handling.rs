use crate::{
    common::REQUEST_ID_HEADER,
    error::{ApiError, Error},
};
use async_trait::async_trait;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use std::collections::HashMap;
use task_local_extensions::Extensions;

/// Reqwest middleware which translates error responses returned from Embedly APIs
/// into [`Error::ApiError`](crate::error::Error)s.
pub struct ErrorHandlingMiddleware;

#[async_trait]
impl Middleware for ErrorHandlingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        // Capture the response
        let response = next.run(req, extensions).await?;

        // Build an ApiError if the response is not a success
        if !response.status().is_success() {
            tracing::debug!("Failed HTTP request. Status code: {}", response.status());

            let api_error = api_error_from_response(response).await?;
            return Err(Error::ApiError(api_error).into());
        }

        Ok(response)
    }
}

/// Body of an error response from Embedly APIs.
#[derive(serde::Deserialize, Debug)]
#[serde(untagged)]
enum ErrorResponseBody {
    /// The standard `{ code, success, message, data }` envelope.
    Envelope {
        code: Option<String>,
        message: String,
        #[serde(default)]
        errors: Option<HashMap<String, Vec<String>>>,
    },
    /// RFC 7807 problem details, returned by model validation.
    Problem {
        title: String,
        #[serde(rename = "traceId")]
        trace_id: Option<String>,
        detail: Option<String>,
        #[serde(default)]
        errors: Option<HashMap<String, Vec<String>>>,
    },
    Unknown,
}

async fn api_error_from_response(response: Response) -> reqwest_middleware::Result<ApiError> {
    let status = response.status().as_u16();
    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    // Parse the response body as JSON
    let bytes = response.bytes().await?;
    let error_response: ErrorResponseBody =
        serde_json::from_slice(&bytes).unwrap_or(ErrorResponseBody::Unknown);

    let api_error = match error_response {
        ErrorResponseBody::Envelope {
            code,
            message,
            errors,
        } => ApiError {
            status,
            code,
            message,
            request_id,
            errors: errors.unwrap_or_default(),
        },
        ErrorResponseBody::Problem {
            title,
            trace_id,
            detail,
            errors,
        } => ApiError {
            status,
            code: None,
            message: detail.map_or(title.clone(), |detail| format!("{}: {}", title, detail)),
            request_id: request_id.or(trace_id),
            errors: errors.unwrap_or_default(),
        },
        ErrorResponseBody::Unknown => ApiError {
            status,
            code: None,
            message: "server_error".to_string(),
            request_id,
            errors: Default::default(),
        },
    };

    Ok(api_error)
}
