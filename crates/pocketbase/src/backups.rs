//! Backup management.
//!
//! All backup endpoints require an admin session. Backups are addressed by
//! their key, which is the archive file name on the server (`name.zip`).

use std::path::Path;

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::Result;
use crate::api::{BACKUPS, BACKUPS_UPLOAD, backup_path};
use crate::client::Client;
use crate::error::InvalidInputError;
use crate::types::encode;

/// A backup archive stored on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupInfo {
    pub key: String,
    pub size: i64,
    pub modified: String,
}

/// Normalize a backup name to the archive key the server stores it under.
///
/// The name is lowercased and `.zip` is appended unless already present, so
/// `zip_name(&zip_name(x)) == zip_name(x)`.
pub fn zip_name(name: &str) -> String {
    let name = name.to_lowercase();
    if name.ends_with(".zip") {
        name
    } else {
        format!("{name}.zip")
    }
}

/// Accessor for the backup endpoints of a [`Client`].
#[derive(Debug, Clone)]
pub struct Backups {
    client: Client,
}

impl Backups {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List every backup on the server.
    #[instrument(skip(self))]
    pub async fn full_list(&self) -> Result<Vec<BackupInfo>> {
        let request = self.client.authorized(Method::GET, BACKUPS).await?;
        self.client.api().send_json("backups.list", request).await
    }

    /// Start a new backup. Without a name the server picks one.
    #[instrument(skip(self))]
    pub async fn create(&self, name: Option<&str>) -> Result<()> {
        info!("Creating backup");
        let mut request = self.client.authorized(Method::POST, BACKUPS).await?;
        if let Some(name) = name {
            request = request.multipart(Form::new().text("name", zip_name(name)));
        }
        self.client.api().send_empty("backups.create", request).await
    }

    /// Upload an existing archive under `key`.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn upload(&self, key: &str, data: Vec<u8>) -> Result<()> {
        info!("Uploading backup");
        let form = Form::new()
            .text("name", key.to_string())
            .part("file", Part::bytes(data).file_name(key.to_string()));
        let request = self
            .client
            .authorized(Method::POST, BACKUPS_UPLOAD)
            .await?
            .multipart(form);
        self.client.api().send_empty("backups.upload", request).await
    }

    /// Read a local archive and upload it under `key`.
    pub async fn upload_file(&self, key: &str, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| InvalidInputError::File {
                path: path.display().to_string(),
                source,
            })?;
        debug!(path = %path.display(), "Read backup archive");
        self.upload(key, data).await
    }

    /// Delete the backup with this key.
    #[instrument(skip(self))]
    pub async fn delete(&self, key: &str) -> Result<()> {
        let request = self
            .client
            .authorized(Method::DELETE, &backup_path(key))
            .await?;
        self.client.api().send_empty("backups.delete", request).await
    }

    /// Restore the server from the backup with this key.
    ///
    /// The server restarts once the restore completes.
    #[instrument(skip(self))]
    pub async fn restore(&self, key: &str) -> Result<()> {
        info!("Restoring backup");
        let path = format!("{}/restore", backup_path(key));
        let request = self.client.authorized(Method::POST, &path).await?;
        self.client.api().send_empty("backups.restore", request).await
    }

    /// Build the download URL of a backup.
    ///
    /// `token` is a file token from [`Files::get_token`](crate::Files::get_token).
    /// No request is made.
    pub fn download_url(&self, token: &str, key: &str) -> Result<String> {
        if token.trim().is_empty() {
            return Err(InvalidInputError::Missing { field: "token" }.into());
        }
        if key.trim().is_empty() {
            return Err(InvalidInputError::Missing { field: "key" }.into());
        }
        Ok(format!(
            "{}?token={}",
            self.client.url().api_url(&backup_path(key)),
            encode(token)
        ))
    }
}
