//! pocketbase - Typed client for the PocketBase HTTP API
//!
//! All calls flow through a [`Client`], which owns the HTTP session and the
//! bearer token. Accessors created from it ([`Collection`], [`Files`],
//! [`Backups`]) share that token: the first privileged call logs in with the
//! configured credentials, and every later call reuses the result.
//!
//! # Example
//!
//! ```no_run
//! use pocketbase::{Client, ListParams};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Post {
//!     title: String,
//! }
//!
//! # async fn example() -> Result<(), pocketbase::Error> {
//! let client = Client::builder("http://127.0.0.1:8090")
//!     .admin("admin@example.com", "secret")
//!     .build()?;
//!
//! let posts = client.collection::<Post>("posts");
//! let page = posts.list(&ListParams::new().sort("-created")).await?;
//! for post in page.items {
//!     println!("{}", post.title);
//! }
//! # Ok(())
//! # }
//! ```

mod api;
pub mod auth;
pub mod backups;
pub mod client;
pub mod error;
pub mod files;
pub mod records;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{AuthToken, CredentialSource, Credentials};
pub use backups::{BackupInfo, Backups, zip_name};
pub use client::{Client, ClientBuilder};
pub use error::{Error, ErrorKind};
pub use files::Files;
pub use records::{
    AuthMethods, AuthProviderInfo, AuthRecord, AuthResponse, Collection, ExternalAuth,
    ListParams, ListResult, OAuth2Response, RecordMeta,
};
pub use types::BaseUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
