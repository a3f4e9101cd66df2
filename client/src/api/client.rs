use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::types::{ApiEnvelope, ApiErrorBody};
use crate::{config::Config, error::ClientError};

/// Characters left as-is inside one path segment (RFC 3986 unreserved).
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Encodes an opaque identifier for use as a single path segment.
pub(crate) fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = Self::new(config.api_base_url.clone());
        match &config.api_token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and unwraps the `data` member of the envelope.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        self.send_envelope(request)
            .await?
            .data
            .ok_or_else(|| ClientError::Decode("response carried no data".into()))
    }

    /// Sends the request and checks status and `success`. An empty 2xx body
    /// counts as success without data.
    pub(crate) async fn send_envelope<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiEnvelope<T>, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(Self::error_from_body(status, &bytes));
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ApiEnvelope {
                success: true,
                data: None,
                message: None,
            });
        }

        let envelope: ApiEnvelope<T> =
            serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))?;
        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "request was not successful".to_string());
            tracing::warn!(%message, "backend rejected request");
            return Err(ClientError::Rejected(message));
        }
        Ok(envelope)
    }

    fn error_from_body(status: StatusCode, bytes: &[u8]) -> ClientError {
        let body: ApiErrorBody = serde_json::from_slice(bytes).unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("backend rejected credentials; API_TOKEN may be missing or expired");
        }
        let message = body
            .text()
            .map(str::to_owned)
            .or_else(|| status.canonical_reason().map(str::to_owned))
            .unwrap_or_else(|| "Request failed".to_string());
        tracing::warn!(status = %status, %message, "API request failed");
        ClientError::Api {
            status,
            message,
            code: body.code,
        }
    }
}
