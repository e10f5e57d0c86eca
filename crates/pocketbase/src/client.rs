//! The shared client session and its authorizer.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument};

use crate::Result;
use crate::api::{
    ADMIN_AUTH_WITH_PASSWORD, AUTH_WITH_PASSWORD, ApiClient, PasswordLoginRequest,
    PasswordLoginResponse, collection_path, json_body,
};
use crate::auth::{AuthToken, CredentialSource, Credentials};
use crate::backups::Backups;
use crate::error::{AuthError, Error};
use crate::files::Files;
use crate::records::Collection;
use crate::types::BaseUrl;

/// A session with one PocketBase server.
///
/// `Client` is a cheap handle (it wraps an `Arc`). Every [`Collection`],
/// [`Files`] and [`Backups`] accessor created from it shares the same bearer
/// token, so a login or token refresh through one accessor is seen by all of
/// them.
///
/// # Example
///
/// ```no_run
/// use pocketbase::Client;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct Post {
///     title: String,
/// }
///
/// # async fn example() -> Result<(), pocketbase::Error> {
/// let client = Client::builder("http://127.0.0.1:8090")
///     .admin("admin@example.com", "secret")
///     .build()?;
///
/// let posts = client.collection::<Post>("posts");
/// let created = posts.create(&Post { title: "hello".into() }).await?;
/// let post = posts.one(&created.id).await?;
/// println!("{}", post.title);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    api: ApiClient,
    credentials: CredentialSource,
    token: RwLock<Option<AuthToken>>,
    // Serializes login exchanges so concurrent first use logs in once.
    login_gate: Mutex<()>,
}

impl Client {
    /// Create an anonymous client for the given server.
    pub fn new(url: impl AsRef<str>) -> Result<Self> {
        ClientBuilder::new(url).build()
    }

    /// Start configuring a client for the given server.
    pub fn builder(url: impl AsRef<str>) -> ClientBuilder {
        ClientBuilder::new(url)
    }

    /// Returns the server origin.
    pub fn url(&self) -> &BaseUrl {
        self.inner.api.url()
    }

    /// Returns the configured credential source.
    pub fn credentials(&self) -> &CredentialSource {
        &self.inner.credentials
    }

    /// Typed accessor for the named collection.
    pub fn collection<T>(&self, name: impl Into<String>) -> Collection<T>
    where
        T: Serialize + DeserializeOwned,
    {
        Collection::new(self.clone(), name.into())
    }

    /// Accessor for the private file token endpoint.
    pub fn files(&self) -> Files {
        Files::new(self.clone())
    }

    /// Accessor for the backup endpoints.
    pub fn backups(&self) -> Backups {
        Backups::new(self.clone())
    }

    /// Make sure a bearer token is available before a privileged call.
    ///
    /// Returns immediately when a token is already held, or when the client has
    /// no password credentials (anonymous and pre-supplied token sources).
    /// Otherwise performs the login exchange once and stores the token for every
    /// accessor sharing this client. A failed login leaves the session untouched.
    ///
    /// This does not detect expiry and never logs in again once a token is held;
    /// use [`Collection::auth_refresh`] or [`Client::set_token`] for that.
    pub async fn authorize(&self) -> Result<()> {
        if self.has_token().await {
            return Ok(());
        }

        let (path, credentials) = match &self.inner.credentials {
            CredentialSource::Admin(credentials) => {
                (ADMIN_AUTH_WITH_PASSWORD.to_string(), credentials)
            }
            CredentialSource::Record {
                collection,
                credentials,
            } => (
                format!("{}{AUTH_WITH_PASSWORD}", collection_path(collection)),
                credentials,
            ),
            CredentialSource::Anonymous | CredentialSource::Token(_) => return Ok(()),
        };

        let _gate = self.inner.login_gate.lock().await;

        // Another task may have logged in while we waited for the gate.
        if self.has_token().await {
            return Ok(());
        }

        let token = self.login(&path, credentials).await?;
        *self.inner.token.write().await = Some(token);

        debug!("Session authorized");
        Ok(())
    }

    #[instrument(skip(self, credentials), fields(url = %self.url(), identity = %credentials.identity()))]
    async fn login(&self, path: &str, credentials: &Credentials) -> Result<AuthToken> {
        const OP: &str = "authorize";
        info!("Logging in");

        let body = PasswordLoginRequest {
            identity: credentials.identity(),
            password: credentials.password(),
        };
        let request = json_body(self.inner.api.request(Method::POST, path, None), &body)?;
        let response = self.inner.api.execute(OP, request).await?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::transport(OP, e))?;
        if !status.is_success() {
            return Err(AuthError::LoginRejected {
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        let response: PasswordLoginResponse =
            serde_json::from_str(&text).map_err(|e| Error::decode(OP, e))?;
        let token = AuthToken::new(response.token);
        if token.is_empty() {
            return Err(AuthError::EmptyToken.into());
        }
        Ok(token)
    }

    /// Returns the token currently held by the session.
    pub async fn token(&self) -> Option<AuthToken> {
        self.inner.token.read().await.clone()
    }

    /// Replace the session token, e.g. with one restored from storage.
    pub async fn set_token(&self, token: AuthToken) {
        *self.inner.token.write().await = Some(token);
    }

    /// Drop the session token. With password credentials the next privileged
    /// call logs in again.
    pub async fn clear_token(&self) {
        *self.inner.token.write().await = None;
    }

    async fn has_token(&self) -> bool {
        self.inner
            .token
            .read()
            .await
            .as_ref()
            .is_some_and(|t| !t.is_empty())
    }

    /// Store a token returned by an auth flow; the newest token always wins.
    /// An empty token is rejected and leaves the session untouched.
    pub(crate) async fn store_token(&self, token: &str) -> Result<()> {
        let token = AuthToken::new(token);
        if token.is_empty() {
            return Err(AuthError::EmptyToken.into());
        }
        *self.inner.token.write().await = Some(token);
        Ok(())
    }

    /// Authorize, then start a request carrying the session token.
    pub(crate) async fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        self.authorize().await?;
        let token = self.token().await;
        Ok(self.inner.api.request(method, path, token.as_ref()))
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.inner.api
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("url", self.url())
            .field("credentials", &self.inner.credentials)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for a [`Client`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    url: String,
    credentials: CredentialSource,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Start from an anonymous configuration for the given server.
    pub fn new(url: impl AsRef<str>) -> Self {
        Self {
            url: url.as_ref().to_string(),
            credentials: CredentialSource::Anonymous,
            timeout: None,
            user_agent: None,
        }
    }

    /// Log in as an admin on first privileged call.
    pub fn admin(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials(CredentialSource::Admin(Credentials::new(email, password)))
    }

    /// Log in as a record of the given auth collection on first privileged call.
    pub fn record_auth(
        self,
        collection: impl Into<String>,
        identity: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials(CredentialSource::Record {
            collection: collection.into(),
            credentials: Credentials::new(identity, password),
        })
    }

    /// Use a token obtained elsewhere; no login is performed.
    pub fn token(self, token: impl Into<String>) -> Self {
        self.credentials(CredentialSource::Token(AuthToken::new(token)))
    }

    /// Set the credential source directly.
    pub fn credentials(mut self, credentials: CredentialSource) -> Self {
        self.credentials = credentials;
        self
    }

    /// Per-request timeout applied by the HTTP transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validate the configuration and build the client.
    pub fn build(self) -> Result<Client> {
        let url = BaseUrl::new(&self.url)?;
        let api = ApiClient::new(url, self.timeout, self.user_agent.as_deref())?;

        let token = match &self.credentials {
            CredentialSource::Token(token) if !token.is_empty() => Some(token.clone()),
            _ => None,
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                api,
                credentials: self.credentials,
                token: RwLock::new(token),
                login_gate: Mutex::new(()),
            }),
        })
    }
}
