//! Protected file access.

use reqwest::Method;
use tracing::instrument;

use crate::Result;
use crate::api::{FILES_TOKEN, TokenResponse};
use crate::client::Client;

/// Accessor for the file endpoints of a [`Client`].
#[derive(Debug, Clone)]
pub struct Files {
    client: Client,
}

impl Files {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Request a short-lived token for downloading protected files.
    ///
    /// The token is passed as the `token` query parameter of a file URL.
    #[instrument(skip(self))]
    pub async fn get_token(&self) -> Result<String> {
        let request = self.client.authorized(Method::POST, FILES_TOKEN).await?;
        let response: TokenResponse = self.client.api().send_json("files.token", request).await?;
        Ok(response.token)
    }
}
