//! Credentials, tokens and the credential source a client logs in with.

mod credentials;
mod tokens;

pub use credentials::{CredentialSource, Credentials};
pub use tokens::AuthToken;
