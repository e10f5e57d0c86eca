//! HTTP client for PocketBase API requests.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, trace};

use crate::Result;
use crate::auth::AuthToken;
use crate::error::{Error, InvalidInputError};
use crate::types::BaseUrl;

/// HTTP client bound to one PocketBase origin.
#[derive(Debug, Clone)]
pub(crate) struct ApiClient {
    client: reqwest::Client,
    url: BaseUrl,
}

impl ApiClient {
    /// Create a new API client for the given origin.
    pub fn new(url: BaseUrl, timeout: Option<Duration>, user_agent: Option<&str>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(
            user_agent.unwrap_or(concat!("pocketbase-rs/", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| InvalidInputError::Client {
            message: e.to_string(),
        })?;

        Ok(Self { client, url })
    }

    /// Returns the origin this client is configured for.
    pub fn url(&self) -> &BaseUrl {
        &self.url
    }

    /// Start a request against an API path, attaching the bearer token if any.
    pub fn request(&self, method: Method, path: &str, token: Option<&AuthToken>) -> RequestBuilder {
        let url = self.url.api_url(path);
        debug!(%method, %url, authed = token.is_some(), "API request");

        let request = self.client.request(method, url);
        match token {
            Some(token) => request.header(AUTHORIZATION, token.bearer()),
            None => request,
        }
    }

    /// Send a request, mapping failures to reach the server to transport errors.
    pub async fn execute(&self, operation: &'static str, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(operation, e))?;
        trace!(operation, status = %response.status(), "API response");
        Ok(response)
    }

    /// Send a request and decode a 2xx JSON body.
    pub async fn send_json<R>(&self, operation: &'static str, request: RequestBuilder) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = self.execute(operation, request).await?;
        let body = read_body(operation, response).await?;
        serde_json::from_slice(&body).map_err(|e| Error::decode(operation, e))
    }

    /// Send a request whose 2xx body is ignored.
    pub async fn send_empty(&self, operation: &'static str, request: RequestBuilder) -> Result<()> {
        let response = self.execute(operation, request).await?;
        read_body(operation, response).await?;
        Ok(())
    }
}

/// Attach a JSON body, encoding it up front so encoding failures are reported
/// as invalid input rather than as transport errors.
pub(crate) fn json_body<B>(request: RequestBuilder, body: &B) -> Result<RequestBuilder>
where
    B: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec(body).map_err(InvalidInputError::Encode)?;
    Ok(request
        .header(CONTENT_TYPE, "application/json")
        .body(bytes))
}

/// Read the body of a response, turning non-2xx statuses into protocol errors
/// that carry the raw body text.
async fn read_body(operation: &'static str, response: Response) -> Result<Vec<u8>> {
    let status = response.status();
    if status.is_success() {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::transport(operation, e))?;
        Ok(bytes.to_vec())
    } else {
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(operation, e))?;
        Err(Error::protocol(operation, status.as_u16(), body))
    }
}
