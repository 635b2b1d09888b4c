//! Wire channels for exchanging serialized JSON-RPC payloads with a node.

mod http;
pub use self::http::Http;

#[cfg(unix)]
#[cfg_attr(docsrs, doc(cfg(unix)))]
mod ipc;
#[cfg(unix)]
pub use ipc::Ipc;

mod mock;
pub use mock::Mock;

use std::fmt::{self, Debug};

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine};

use crate::errors::TransportError;

/// A channel able to exchange one serialized JSON-RPC payload for another.
///
/// The payload may be a single request object or a batch array; the
/// transport treats it as opaque text. Implementations own connection
/// handling, timeouts and any retry policy; the client core never retries.
#[async_trait]
pub trait Transport: Debug + Send + Sync {
    /// Sends a serialized request and returns the serialized response.
    async fn send(&self, request: &str) -> Result<String, TransportError>;
}

/// Basic or bearer authentication in the HTTP transport
///
/// Use to inject username and password or an auth token into requests
#[derive(Clone, Debug)]
pub enum Authorization {
    /// HTTP Basic Auth
    Basic(String),
    /// Bearer Auth
    Bearer(String),
    /// If you need to override the Authorization header value
    Raw(String),
}

impl Authorization {
    /// Make a new basic auth
    pub fn basic(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let username = username.as_ref();
        let password = password.as_ref();
        let auth_secret = general_purpose::STANDARD.encode(format!("{username}:{password}"));
        Self::Basic(auth_secret)
    }

    /// Make a new bearer auth
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    /// Override the Authorization header with your own string
    pub fn raw(token: impl Into<String>) -> Self {
        Self::Raw(token.into())
    }
}

impl fmt::Display for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authorization::Basic(auth_secret) => write!(f, "Basic {auth_secret}"),
            Authorization::Bearer(token) => write!(f, "Bearer {token}"),
            Authorization::Raw(s) => write!(f, "{s}"),
        }
    }
}
