//! Wire types for the JSON-RPC 2.0 envelope and the request-construction
//! rules shared by single calls and batches.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::{
    errors::ClientError,
    methods::{MethodDescriptor, DEFAULT_BLOCK_TAG},
};

/// A JSON-RPC 2.0 error object
#[derive(Clone, Debug, Deserialize, PartialEq, Error)]
pub struct JsonRpcError {
    /// The error code
    pub code: i64,
    /// The error message
    pub message: String,
    /// Additional data
    pub data: Option<Value>,
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(code: {}, message: {}, data: {:?})", self.code, self.message, self.data)
    }
}

/// A JSON-RPC 2.0 request envelope.
#[derive(Clone, Debug, Serialize)]
pub struct Request {
    id: u64,
    jsonrpc: &'static str,
    method: &'static str,
    params: Vec<Value>,
}

impl Request {
    pub(crate) fn new(id: u64, method: &'static str, params: Vec<Value>) -> Self {
        Self { id, jsonrpc: "2.0", method, params }
    }

    /// The identifier correlating this request with its reply.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The literal method string sent on the wire.
    pub fn method(&self) -> &str {
        self.method
    }

    /// The encoded positional parameters.
    pub fn params(&self) -> &[Value] {
        self.params.as_slice()
    }
}

/// A parsed JSON-RPC reply, carrying either a result or an error object.
///
/// Which of the two is present follows the wire protocol; both are exposed
/// as data so callers can inspect error code and message without an
/// unwinding error path. [`Reply::into_result`] converts into the usual
/// `Result` shape.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Reply {
    /// The id of the request this reply answers.
    pub id: u64,
    /// The result value, if the call succeeded. `Some(Value::Null)` when
    /// the node explicitly returned `null`.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub result: Option<Value>,
    /// The error object, if the call failed node-side.
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// Keeps an explicit JSON `null` distinguishable from an absent field.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Reply {
    /// Parses a single reply object.
    pub(crate) fn parse(text: &str) -> Result<Self, ClientError> {
        let reply: Reply = serde_json::from_str(text)
            .map_err(|err| ClientError::Protocol { err, text: text.to_owned() })?;
        reply.validate(text)
    }

    /// Enforces that the reply carries a result or an error.
    pub(crate) fn validate(self, text: &str) -> Result<Self, ClientError> {
        if self.result.is_none() && self.error.is_none() {
            return Err(ClientError::Protocol {
                err: serde::de::Error::custom("reply carries neither result nor error"),
                text: text.to_owned(),
            })
        }
        Ok(self)
    }

    /// Splits the reply into the protocol's result-or-error duality.
    pub fn into_result(self) -> Result<Value, JsonRpcError> {
        match (self.result, self.error) {
            (_, Some(error)) => Err(error),
            (result, None) => Ok(result.unwrap_or(Value::Null)),
        }
    }
}

/// Monotonic request id source, scoped to one logical conversation.
///
/// Ids restart from 1 after every completed single call and after every
/// completed batch submission, so numbering is per unit of work rather than
/// global across the client's lifetime.
#[derive(Debug, Default)]
pub(crate) struct RequestIdSequence {
    current: u64,
}

impl RequestIdSequence {
    /// Increments and returns the counter; the first id after a reset is 1.
    pub(crate) fn next(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    /// Sets the counter back to 0.
    pub(crate) fn reset(&mut self) {
        self.current = 0;
    }
}

/// Rewrites a non-negative integer as its minimal lowercase hex form.
/// <https://github.com/ethereum/wiki/wiki/JSON-RPC#output-hex-values>
fn int_to_hex(n: u64) -> String {
    format!("0x{n:x}")
}

/// Applies the quantity-encoding rule to positional parameters: integers
/// become `0x`-prefixed hex strings, everything else passes through
/// verbatim. The encoder does not recurse into objects or arrays.
pub(crate) fn encode_params(params: Vec<Value>) -> Vec<Value> {
    params
        .into_iter()
        .map(|param| match param.as_u64() {
            Some(n) => Value::String(int_to_hex(n)),
            None => param,
        })
        .collect()
}

/// Builds the request envelope for a catalog method: injects the default
/// block tag where the descriptor calls for one, encodes the parameters
/// and stamps the next request id.
pub(crate) fn build_request(
    ids: &mut RequestIdSequence,
    descriptor: &'static MethodDescriptor,
    mut params: Vec<Value>,
) -> Request {
    // Injection happens before encoding.
    if let Some(at) = descriptor.block_tag_at {
        if params.len() <= at {
            params.push(Value::String(DEFAULT_BLOCK_TAG.to_owned()));
        }
    }
    Request::new(ids.next(), descriptor.wire, encode_params(params))
}
