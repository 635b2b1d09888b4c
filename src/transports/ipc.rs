use std::{io, path::Path};

use async_trait::async_trait;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::UnixStream,
    sync::Mutex,
};

use super::Transport;
use crate::errors::TransportError;

/// JSON-RPC over a persistent Unix domain socket.
///
/// Framing is newline-delimited: one request document is written per
/// exchange and the node's reply is read up to the terminating newline
/// (geth writes one JSON document per line). Exchanges are serialized on
/// the single underlying stream.
#[derive(Debug)]
pub struct Ipc {
    stream: Mutex<BufReader<UnixStream>>,
}

impl Ipc {
    /// Connects to the node's IPC socket at the given filesystem path.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, TransportError> {
        let stream = UnixStream::connect(path.as_ref()).await?;
        Ok(Self { stream: Mutex::new(BufReader::new(stream)) })
    }
}

#[async_trait]
impl Transport for Ipc {
    async fn send(&self, request: &str) -> Result<String, TransportError> {
        let mut stream = self.stream.lock().await;

        stream.get_mut().write_all(request.as_bytes()).await?;
        stream.get_mut().write_all(b"\n").await?;
        stream.get_mut().flush().await?;

        let mut response = String::new();
        let read = stream.read_line(&mut response).await?;
        if read == 0 {
            return Err(TransportError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "socket closed before a response arrived",
            )))
        }
        Ok(response)
    }
}
