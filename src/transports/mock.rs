use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use super::Transport;
use crate::errors::TransportError;

/// Canned-response transport used in test environments.
///
/// Responses are handed out in FIFO order and every request payload is
/// recorded verbatim for later assertions.
#[derive(Clone, Debug, Default)]
pub struct Mock {
    requests: Arc<Mutex<Vec<String>>>,
    responses: Arc<Mutex<VecDeque<String>>>,
}

impl Mock {
    /// Instantiates an empty mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response payload
    pub fn push(&self, response: impl Into<String>) {
        self.responses.lock().unwrap().push_back(response.into());
    }

    /// The request payloads sent so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for Mock {
    async fn send(&self, request: &str) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(request.to_owned());
        self.responses.lock().unwrap().pop_front().ok_or_else(|| {
            TransportError::Custom("mock transport has no queued responses".to_owned())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_requests_and_replays_responses() {
        let mock = Mock::new();
        mock.push(r#"{"jsonrpc":"2.0","id":1,"result":"0x0"}"#);

        let response = mock.send(r#"{"id":1}"#).await.unwrap();
        assert_eq!(response, r#"{"jsonrpc":"2.0","id":1,"result":"0x0"}"#);
        assert_eq!(mock.requests(), vec![r#"{"id":1}"#.to_owned()]);
    }

    #[tokio::test]
    async fn errors_when_exhausted() {
        let mock = Mock::new();
        let err = mock.send("{}").await.unwrap_err();
        assert!(matches!(err, TransportError::Custom(_)));
    }
}
