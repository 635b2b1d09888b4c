//! The client facade: transport selection, method dispatch, batching and
//! the default-account cache.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{
    errors::ClientError,
    jsonrpc::{build_request, Reply, Request, RequestIdSequence},
    methods,
    transports::{Http, Transport},
};

#[cfg(unix)]
use crate::transports::Ipc;

const SERIALIZE_MSG: &str = "failed to serialize JSON-RPC request";

/// What a dispatched call produced.
#[derive(Debug)]
pub enum CallOutcome {
    /// The request joined the active batch. Its reply only becomes
    /// available through [`Client::submit_batch`]; this is an acceptance
    /// signal, never the eventual RPC result.
    Queued,
    /// The parsed reply of an immediate single call.
    Reply(Reply),
}

/// A JSON-RPC client over a pluggable transport.
///
/// One instance serves one logical caller at a time: the request id
/// sequence, the batch state and the default-account cache are plain
/// unsynchronized fields, so every operation takes `&mut self`. Construct
/// one instance per thread of execution instead of sharing; instances are
/// fully independent of each other.
#[derive(Debug)]
pub struct Client {
    transport: Box<dyn Transport>,
    ids: RequestIdSequence,
    log: bool,
    default_account: Option<String>,
    batch: Option<Vec<Request>>,
}

impl Client {
    /// Connects to a node, picking the transport from the shape of the
    /// connection string: a filesystem path ending in `.ipc` selects the
    /// socket transport, an `http`/`https` URL selects the HTTP transport.
    /// Anything else fails with [`ClientError::UnrecognizedTransport`].
    ///
    /// When `log` is set, the exact outgoing and incoming payloads are
    /// emitted at DEBUG level under the `ethrpc` target.
    pub async fn connect(endpoint: &str, log: bool) -> Result<Self, ClientError> {
        if endpoint.ends_with(".ipc") {
            #[cfg(unix)]
            return Ok(Self::new(Ipc::connect(endpoint).await?, log));
            #[cfg(not(unix))]
            return Err(ClientError::UnrecognizedTransport(endpoint.to_owned()));
        }
        if endpoint.starts_with("http") {
            let url = Url::parse(endpoint)?;
            return Ok(Self::new(Http::new(url), log));
        }
        Err(ClientError::UnrecognizedTransport(endpoint.to_owned()))
    }

    /// Wraps an already constructed transport.
    pub fn new<T: Transport + 'static>(transport: T, log: bool) -> Self {
        Self {
            transport: Box::new(transport),
            ids: RequestIdSequence::default(),
            log,
            default_account: None,
            batch: None,
        }
    }

    /// Dispatches one catalog method by name, in wire form
    /// (`eth_getBalance`) or as its snake_case alias (`eth_get_balance`),
    /// with positional parameters.
    ///
    /// Outside a batch this performs one transport round trip and returns
    /// the parsed reply; a JSON-RPC error object comes back as data inside
    /// the reply, not as `Err`. While a batch is collecting, the request
    /// is queued instead and the outcome is [`CallOutcome::Queued`].
    pub async fn call(
        &mut self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<CallOutcome, ClientError> {
        let descriptor = methods::resolve(method)
            .ok_or_else(|| ClientError::UnknownMethod(method.to_owned()))?;
        let request = build_request(&mut self.ids, descriptor, params);

        if let Some(batch) = self.batch.as_mut() {
            batch.push(request);
            return Ok(CallOutcome::Queued)
        }

        let reply = self.send_single(request).await?;
        Ok(CallOutcome::Reply(reply))
    }

    /// Opens a batch scope. Requests issued through [`Client::call`] are
    /// collected instead of sent until [`Client::submit_batch`]. Batches
    /// do not nest.
    pub fn begin_batch(&mut self) -> Result<(), ClientError> {
        if self.batch.is_some() {
            return Err(ClientError::BatchState("a batch is already collecting"))
        }
        self.batch = Some(Vec::new());
        Ok(())
    }

    /// Whether a batch scope is currently collecting.
    pub fn batching(&self) -> bool {
        self.batch.is_some()
    }

    /// Sends every collected request as one JSON array in a single round
    /// trip and returns the replies in the order the requests were issued.
    /// Submitting an empty batch sends an empty array and returns an empty
    /// vector.
    ///
    /// Replies are correlated by id rather than by array position, since
    /// the protocol does not promise that response ordering matches
    /// request ordering. The batch is discarded whether submission
    /// succeeds or fails; the id sequence restarts only after a completed
    /// submission.
    pub async fn submit_batch(&mut self) -> Result<Vec<Reply>, ClientError> {
        let requests =
            self.batch.take().ok_or(ClientError::BatchState("no batch is collecting"))?;

        let ids: Vec<u64> = requests.iter().map(Request::id).collect();
        let body = serde_json::to_string(&requests).expect(SERIALIZE_MSG);
        if self.log {
            debug!(target: "ethrpc", request = %body, "sending batch");
        }
        let text = self.transport.send(&body).await?;
        if self.log {
            debug!(target: "ethrpc", response = %text, "received batch");
        }

        let replies: Vec<Reply> = serde_json::from_str(&text)
            .map_err(|err| ClientError::Protocol { err, text: text.clone() })?;

        let mut by_id = HashMap::with_capacity(replies.len());
        for reply in replies {
            let reply = reply.validate(&text)?;
            if by_id.insert(reply.id, reply).is_some() {
                return Err(ClientError::Protocol {
                    err: serde::de::Error::custom("duplicate reply id in batch"),
                    text: text.clone(),
                })
            }
        }

        let mut ordered = Vec::with_capacity(ids.len());
        for id in ids {
            let reply = by_id.remove(&id).ok_or_else(|| ClientError::Protocol {
                err: serde::de::Error::custom("batch reply missing for a request id"),
                text: text.clone(),
            })?;
            ordered.push(reply);
        }

        self.ids.reset();
        Ok(ordered)
    }

    /// Returns the default account, resolving and caching it through one
    /// `eth_accounts` round trip on first use. This needs an immediate
    /// result, so calling it while a batch is collecting is a
    /// [`ClientError::BatchState`] error.
    pub async fn default_account(&mut self) -> Result<String, ClientError> {
        if let Some(account) = &self.default_account {
            return Ok(account.clone())
        }
        if self.batch.is_some() {
            return Err(ClientError::BatchState(
                "cannot resolve the default account while a batch is collecting",
            ))
        }

        let descriptor =
            methods::resolve("eth_accounts").expect("eth_accounts is part of the catalog");
        let request = build_request(&mut self.ids, descriptor, Vec::new());
        let reply = self.send_single(request).await?;

        let result = reply.into_result()?;
        let account = result
            .as_array()
            .and_then(|accounts| accounts.first())
            .and_then(Value::as_str)
            .ok_or(ClientError::NoAccounts)?
            .to_owned();
        self.default_account = Some(account.clone());
        Ok(account)
    }

    /// Pre-seeds the default-account cache, skipping the `eth_accounts`
    /// lookup.
    pub fn set_default_account(&mut self, account: impl Into<String>) {
        self.default_account = Some(account.into());
    }

    async fn send_single(&mut self, request: Request) -> Result<Reply, ClientError> {
        let body = serde_json::to_string(&request).expect(SERIALIZE_MSG);
        if self.log {
            debug!(target: "ethrpc", request = %body, "sending");
        }
        let text = self.transport.send(&body).await?;
        if self.log {
            debug!(target: "ethrpc", response = %text, "received");
        }
        let reply = Reply::parse(&text)?;
        self.ids.reset();
        Ok(reply)
    }
}
