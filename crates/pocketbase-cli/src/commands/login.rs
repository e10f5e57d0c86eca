//! Login command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use pocketbase::Client;

use crate::cli::{DEFAULT_URL, ServerArgs};
use crate::output;
use crate::session::storage::{self, StoredSession};

#[derive(Args, Debug)]
pub struct LoginArgs {}

pub async fn run(server: &ServerArgs, _args: LoginArgs) -> Result<()> {
    let (Some(email), Some(password)) = (&server.admin_email, &server.admin_password) else {
        bail!("Login needs --admin-email and --admin-password (or PB_ADMIN_EMAIL/PB_ADMIN_PASSWORD)");
    };
    let url = server.url.as_deref().unwrap_or(DEFAULT_URL);

    let client = Client::builder(url)
        .admin(email, password)
        .build()
        .context("Invalid server URL")?;

    output::note("Logging in...");
    client.authorize().await.context("Failed to login")?;
    let token = client
        .token()
        .await
        .context("Login returned no token")?;

    storage::save_session(&StoredSession {
        url: client.url().as_str().to_string(),
        token: token.as_str().to_string(),
    })
    .context("Failed to save session")?;

    output::success("Logged in successfully");
    output::field("URL", client.url().as_str());
    output::field("Admin", email);

    Ok(())
}
