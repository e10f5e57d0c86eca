//! Files subcommand implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::cli::ServerArgs;
use crate::session;

#[derive(Args, Debug)]
pub struct FilesCommand {
    #[command(subcommand)]
    pub command: FilesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum FilesSubcommand {
    /// Request a token for downloading protected files
    Token,
}

pub async fn handle(server: &ServerArgs, cmd: FilesCommand) -> Result<()> {
    let client = session::connect(server)?;
    match cmd.command {
        FilesSubcommand::Token => {
            let token = client
                .files()
                .get_token()
                .await
                .context("Failed to get file token")?;
            println!("{}", token);
        }
    }
    Ok(())
}
