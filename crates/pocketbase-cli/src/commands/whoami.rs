//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs) -> Result<()> {
    let session = storage::load_session()
        .context("Failed to load session")?
        .context("No active session. Run 'pb login' first.")?;

    output::field("URL", &session.url);
    let token = if session.token.is_empty() {
        "missing"
    } else {
        "present"
    };
    output::field("Token", token);

    Ok(())
}
