//! Session resolution: turn global flags and the stored session into a client.

pub mod storage;

use anyhow::{Context, Result};
use pocketbase::{BaseUrl, Client};
use tracing::debug;

use crate::cli::{DEFAULT_URL, ServerArgs};

/// Build a client from the global flags.
///
/// Explicit credentials win: a `--token`, then `--admin-email` with
/// `--admin-password`. Without either the session stored by `pb login` is
/// used, and without that the client is anonymous. The session file is only
/// read in that last case.
pub fn connect(server: &ServerArgs) -> Result<Client> {
    if let Some(token) = &server.token {
        debug!("Using token from flags");
        return Client::builder(flag_url(server)?.as_str())
            .token(token)
            .build()
            .context("Invalid server configuration");
    }

    if let (Some(email), Some(password)) = (&server.admin_email, &server.admin_password) {
        debug!(email, "Using admin credentials from flags");
        return Client::builder(flag_url(server)?.as_str())
            .admin(email, password)
            .build()
            .context("Invalid server configuration");
    }

    let stored = storage::load_session().context("Failed to load session")?;
    let url = match (&server.url, &stored) {
        (Some(url), _) => url.as_str(),
        (None, Some(stored)) => stored.url.as_str(),
        (None, None) => DEFAULT_URL,
    };
    let url = BaseUrl::new(url).context("Invalid server URL")?;

    let builder = Client::builder(url.as_str());
    let builder = match stored.filter(|s| s.url == url.as_str()) {
        Some(stored) => {
            debug!("Using stored session");
            builder.token(stored.token)
        }
        None => {
            debug!("No credentials, connecting anonymously");
            builder
        }
    };

    builder.build().context("Invalid server configuration")
}

fn flag_url(server: &ServerArgs) -> Result<BaseUrl> {
    let url = server.url.as_deref().unwrap_or(DEFAULT_URL);
    BaseUrl::new(url).context("Invalid server URL")
}
