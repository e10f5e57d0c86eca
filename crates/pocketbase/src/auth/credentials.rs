//! Login credentials and credential sources.

use std::fmt;

use super::AuthToken;

/// Identity and password for a login exchange.
///
/// The identity is an email (admins) or an email/username (auth records).
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use pocketbase::Credentials;
///
/// let creds = Credentials::new("admin@example.com", "secret");
/// assert_eq!(creds.identity(), "admin@example.com");
/// ```
#[derive(Clone)]
pub struct Credentials {
    identity: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(identity: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            password: password.into(),
        }
    }

    /// Returns the identity (email or username).
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing authentication requests.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

// Intentionally hide password in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identity", &self.identity)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Where a client gets its bearer token from.
#[derive(Debug, Clone, Default)]
pub enum CredentialSource {
    /// No login; requests are sent without a token.
    #[default]
    Anonymous,

    /// Admin email and password, exchanged for a token on first use.
    Admin(Credentials),

    /// Auth record identity and password in the given auth collection,
    /// exchanged for a token on first use.
    Record {
        collection: String,
        credentials: Credentials,
    },

    /// A token obtained elsewhere; no login is ever performed.
    Token(AuthToken),
}

impl CredentialSource {
    /// Returns `true` when this source performs a login exchange.
    pub fn needs_login(&self) -> bool {
        matches!(self, Self::Admin(_) | Self::Record { .. })
    }
}
