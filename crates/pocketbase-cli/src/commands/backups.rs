//! Backups subcommand implementations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::cli::ServerArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct BackupsCommand {
    #[command(subcommand)]
    pub command: BackupsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BackupsSubcommand {
    /// List backups
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Start a new backup
    Create {
        /// Backup name; `.zip` is appended when missing
        #[arg(long)]
        name: Option<String>,
    },

    /// Upload an existing backup archive
    Upload {
        /// Key to store the archive under
        #[arg(long)]
        key: String,

        /// Local archive to upload
        #[arg(long)]
        file: PathBuf,
    },

    /// Delete a backup
    Delete {
        /// Backup key
        key: String,
    },

    /// Restore the server from a backup
    Restore {
        /// Backup key
        key: String,
    },

    /// Print a download URL for a backup
    DownloadUrl {
        /// Backup key
        key: String,
    },
}

pub async fn handle(server: &ServerArgs, cmd: BackupsCommand) -> Result<()> {
    let client = session::connect(server)?;
    let backups = client.backups();

    match cmd.command {
        BackupsSubcommand::List { json } => {
            let list = backups.full_list().await.context("Failed to list backups")?;
            if json {
                output::json(&list, false)?;
            } else if list.is_empty() {
                output::note("No backups found.");
            } else {
                for backup in &list {
                    println!("{}\t{}\t{}", backup.key, backup.size, backup.modified);
                }
            }
        }
        BackupsSubcommand::Create { name } => {
            backups
                .create(name.as_deref())
                .await
                .context("Failed to create backup")?;
            output::success("Backup created");
        }
        BackupsSubcommand::Upload { key, file } => {
            backups
                .upload_file(&key, &file)
                .await
                .context("Failed to upload backup")?;
            output::success("Backup uploaded");
        }
        BackupsSubcommand::Delete { key } => {
            backups
                .delete(&key)
                .await
                .context("Failed to delete backup")?;
            output::success("Backup deleted");
        }
        BackupsSubcommand::Restore { key } => {
            backups
                .restore(&key)
                .await
                .context("Failed to restore backup")?;
            output::success("Restore started");
        }
        BackupsSubcommand::DownloadUrl { key } => {
            let token = client
                .files()
                .get_token()
                .await
                .context("Failed to get file token")?;
            let url = backups.download_url(&token, &key)?;
            println!("{}", url);
        }
    }

    Ok(())
}
