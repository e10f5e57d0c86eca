//! Typed access to collections and their records.

mod auth;
mod collection;
mod models;
mod params;

pub use collection::{Collection, FULL_LIST_BATCH};
pub use models::{
    AuthMethods, AuthProviderInfo, AuthRecord, AuthResponse, ExternalAuth, ListResult,
    OAuth2Response, RecordMeta,
};
pub use params::ListParams;
