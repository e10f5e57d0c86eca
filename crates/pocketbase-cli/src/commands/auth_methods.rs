//! Auth methods command implementation.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use crate::cli::ServerArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct AuthMethodsArgs {
    /// Auth collection name
    #[arg(long, default_value = "users")]
    pub collection: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(server: &ServerArgs, args: AuthMethodsArgs) -> Result<()> {
    let client = session::connect(server)?;
    let methods = client
        .collection::<Value>(args.collection)
        .list_auth_methods()
        .await
        .context("Failed to list auth methods")?;

    output::json(&methods, args.pretty)
}
