//! API paths and login request/response types.
//!
//! Paths are relative to `{base}/api`.

use serde::{Deserialize, Serialize};

use crate::types::encode_segment;

// ============================================================================
// Paths
// ============================================================================

/// Admin password login.
pub const ADMIN_AUTH_WITH_PASSWORD: &str = "/admins/auth-with-password";

/// Private file access token.
pub const FILES_TOKEN: &str = "/files/token";

/// Backup list and creation.
pub const BACKUPS: &str = "/backups";

/// Backup archive upload.
pub const BACKUPS_UPLOAD: &str = "/backups/upload";

pub const AUTH_METHODS: &str = "/auth-methods";
pub const AUTH_WITH_PASSWORD: &str = "/auth-with-password";
pub const AUTH_WITH_OAUTH2: &str = "/auth-with-oauth2";
pub const AUTH_REFRESH: &str = "/auth-refresh";
pub const REQUEST_VERIFICATION: &str = "/request-verification";
pub const CONFIRM_VERIFICATION: &str = "/confirm-verification";
pub const REQUEST_PASSWORD_RESET: &str = "/request-password-reset";
pub const CONFIRM_PASSWORD_RESET: &str = "/confirm-password-reset";
pub const REQUEST_EMAIL_CHANGE: &str = "/request-email-change";
pub const CONFIRM_EMAIL_CHANGE: &str = "/confirm-email-change";

/// `/collections/{name}`
pub fn collection_path(name: &str) -> String {
    format!("/collections/{}", encode_segment(name))
}

/// `/backups/{key}`
pub fn backup_path(key: &str) -> String {
    format!("{BACKUPS}/{}", encode_segment(key))
}

// ============================================================================
// Login
// ============================================================================

/// Request body for the admin and auth record password logins.
#[derive(Debug, Serialize)]
pub struct PasswordLoginRequest<'a> {
    pub identity: &'a str,
    pub password: &'a str,
}

/// The part of a login response the authorizer needs.
#[derive(Debug, Deserialize)]
pub struct PasswordLoginResponse {
    #[serde(default)]
    pub token: String,
}

/// Response carrying only a token (file tokens).
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
