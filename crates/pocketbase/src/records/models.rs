//! Response shapes for record and auth collection endpoints.

use serde::{Deserialize, Serialize};

/// One page of records.
///
/// `total_items` and `total_pages` are `-1` when the server was asked to skip
/// counting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    pub total_items: i64,
    pub total_pages: i64,
    pub items: Vec<T>,
}

/// Metadata of a newly created record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordMeta {
    pub id: String,
    pub collection_id: String,
    pub collection_name: String,
    pub created: String,
    pub updated: String,
}

/// Auth methods enabled on an auth collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthMethods {
    pub auth_providers: Vec<AuthProviderInfo>,
    pub username_password: bool,
    pub email_password: bool,
    pub only_verified: bool,
}

/// An OAuth2 provider as advertised by `auth-methods`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthProviderInfo {
    pub name: String,
    pub display_name: String,
    pub state: String,
    pub auth_url: String,
    pub code_verifier: String,
    pub code_challenge: String,
    pub code_challenge_method: String,
}

/// The authenticated record returned by auth flows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthRecord {
    pub id: String,
    pub collection_id: String,
    pub collection_name: String,
    pub created: String,
    pub updated: String,
    pub email: String,
    pub email_visibility: bool,
    pub username: String,
    pub name: String,
    pub avatar: String,
    pub verified: bool,
}

/// `{token, record}` envelope of password login and token refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub record: AuthRecord,
}

/// `{token}` envelope of the OAuth2 code exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2Response {
    pub token: String,
}

/// An external (OAuth2) identity linked to an auth record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalAuth {
    pub id: String,
    pub created: String,
    pub updated: String,
    pub record_id: String,
    pub collection_id: String,
    pub provider: String,
    pub provider_id: String,
}
