//! Error types for the pocketbase client.
//!
//! Every failure is returned to the caller with enough context to diagnose it:
//! the operation that failed, and for server rejections the status code and the
//! raw response body. Use [`Error::kind`] to branch on the failure class.

use std::fmt;
use thiserror::Error;

/// The unified error type for client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response (DNS, TLS, connection, timeout).
    #[error("[{operation}] transport error: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: TransportError,
    },

    /// The login exchange performed by the authorizer failed, or an auth flow
    /// (password, OAuth2 code, refresh) answered 2xx without a usable token.
    /// The session token is left unchanged in both cases.
    #[error("authorization failed: {0}")]
    Auth(#[from] AuthError),

    /// The server answered with a non-2xx status.
    #[error("[{operation}] server rejected request: {source}")]
    Protocol {
        operation: &'static str,
        #[source]
        source: ProtocolError,
    },

    /// The response body did not match the expected shape.
    #[error("[{operation}] can't decode response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The caller supplied an argument the client cannot work with.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AuthorizationFailed,
    TransportFailed,
    ServerRejected,
    DecodeFailed,
    InvalidArgument,
}

impl Error {
    pub(crate) fn transport(operation: &'static str, err: reqwest::Error) -> Self {
        Error::Transport {
            operation,
            source: TransportError::from(err),
        }
    }

    pub(crate) fn protocol(operation: &'static str, status: u16, body: String) -> Self {
        Error::Protocol {
            operation,
            source: ProtocolError::new(status, body),
        }
    }

    pub(crate) fn decode(operation: &'static str, err: serde_json::Error) -> Self {
        Error::Decode {
            operation,
            source: err,
        }
    }

    /// Returns the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport { .. } => ErrorKind::TransportFailed,
            Error::Auth(_) => ErrorKind::AuthorizationFailed,
            Error::Protocol { .. } => ErrorKind::ServerRejected,
            Error::Decode { .. } => ErrorKind::DecodeFailed,
            Error::InvalidInput(_) => ErrorKind::InvalidArgument,
        }
    }

    /// HTTP status of a rejected request or login, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Protocol { source, .. } => Some(source.status),
            Error::Auth(AuthError::LoginRejected { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Raw response body of a rejected request or login.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Protocol { source, .. } => Some(source.body.as_str()),
            Error::Auth(AuthError::LoginRejected { body, .. }) => Some(body.as_str()),
            _ => None,
        }
    }

    /// The operation that produced this error, when known.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Error::Transport { operation, .. }
            | Error::Protocol { operation, .. }
            | Error::Decode { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Any other failure while sending the request or reading the body.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

/// Errors raised by the authorizer's login exchange.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server refused the credentials.
    #[error("login rejected with HTTP {status}: {body}")]
    LoginRejected { status: u16, body: String },

    /// The server accepted a login or auth flow but returned no token.
    #[error("authentication succeeded but returned an empty token")]
    EmptyToken,
}

/// A non-2xx response from the server.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body, verbatim.
    pub body: String,
    /// The `message` field of a PocketBase error envelope, when present.
    pub message: Option<String>,
}

#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
}

impl ProtocolError {
    /// Create a new protocol error from a status code and raw body.
    pub fn new(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|e| e.message);
        Self {
            status,
            body,
            message,
        }
    }

    /// Check if the server refused the request for lack of authorization.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// A value required to build a URL or request was empty.
    #[error("missing {field}")]
    Missing { field: &'static str },

    /// The request payload could not be encoded.
    #[error("can't encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A local file could not be read.
    #[error("can't read '{path}': {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be configured.
    #[error("can't build HTTP client: {message}")]
    Client { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_keeps_body_verbatim() {
        let body = r#"{"code":400,"message":"Failed to authenticate.","data":{}}"#;
        let err = Error::protocol("records.one", 400, body.to_string());

        assert_eq!(err.kind(), ErrorKind::ServerRejected);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.body(), Some(body));
        assert!(err.to_string().contains("Failed to authenticate."));
        assert!(err.to_string().contains("records.one"));
    }

    #[test]
    fn protocol_error_parses_envelope_message() {
        let err = ProtocolError::new(
            403,
            r#"{"code":403,"message":"Admins only.","data":{}}"#.to_string(),
        );
        assert_eq!(err.message.as_deref(), Some("Admins only."));
        assert!(err.is_auth_error());
    }

    #[test]
    fn protocol_error_tolerates_plain_text() {
        let err = ProtocolError::new(502, "Bad Gateway".to_string());
        assert!(err.message.is_none());
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn decode_error_is_its_own_kind() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = Error::decode("files.token", source);
        assert_eq!(err.kind(), ErrorKind::DecodeFailed);
        assert_eq!(err.operation(), Some("files.token"));
        assert!(err.status().is_none());
    }

    #[test]
    fn login_rejection_is_authorization_failure() {
        let err = Error::from(AuthError::LoginRejected {
            status: 400,
            body: "bad".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::AuthorizationFailed);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.body(), Some("bad"));
    }

    #[test]
    fn empty_token_is_authorization_failure() {
        let err = Error::from(AuthError::EmptyToken);
        assert_eq!(err.kind(), ErrorKind::AuthorizationFailed);
        assert!(err.status().is_none());
        assert!(err.to_string().contains("empty token"));
    }
}
