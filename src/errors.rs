use thiserror::Error;

use crate::jsonrpc::JsonRpcError;

/// An error thrown by a [`Client`](crate::Client) operation.
///
/// Note that a well-formed JSON-RPC error object returned by the node is
/// *not* an error at this level: it is handed back to the caller as data
/// inside [`Reply`](crate::Reply), mirroring the wire protocol's own
/// result-vs-error duality. The one exception is [`ClientError::Rpc`],
/// raised when an internal lookup such as
/// [`default_account`](crate::Client::default_account) cannot proceed
/// without a result.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The connection string matches neither the IPC nor the HTTP shape.
    /// Fatal at construction, never retried.
    #[error("unable to detect transport for endpoint: {0}")]
    UnrecognizedTransport(String),

    /// The endpoint looked like an HTTP(S) URL but does not parse as one.
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    /// The transport failed to exchange the payload.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response is not a well-formed JSON-RPC payload.
    #[error("invalid JSON-RPC response: {err}. Response: {text}")]
    Protocol {
        /// Underlying error
        err: serde_json::Error,
        /// The response text that could not be interpreted
        text: String,
    },

    /// The method name is not part of the catalog.
    #[error("unknown RPC method: {0}")]
    UnknownMethod(String),

    /// A batch operation was attempted in the wrong state.
    #[error("batch state error: {0}")]
    BatchState(&'static str),

    /// The node answered an internal lookup with a JSON-RPC error object.
    #[error(transparent)]
    Rpc(#[from] JsonRpcError),

    /// `eth_accounts` returned no entries to pick a default account from.
    #[error("node manages no accounts")]
    NoAccounts,
}

/// An error thrown by a [`Transport`](crate::Transport) while exchanging
/// one serialized payload.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Thrown if the HTTP exchange failed
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Thrown if credentials cannot be encoded as an HTTP header
    #[error(transparent)]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Thrown on socket I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Custom error from a user-supplied transport
    #[error("transport error: {0}")]
    Custom(String),
}
