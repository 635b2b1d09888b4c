//! Socket round-trip tests for the IPC transport.

#![cfg(unix)]

use ethrpc::{CallOutcome, Client, ClientError};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::UnixListener,
};

#[tokio::test]
async fn ipc_round_trip_over_a_local_socket() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("geth.ipc");
    let listener = UnixListener::bind(&path).unwrap();

    // one-shot node: read a newline-framed request, answer it
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut stream = BufReader::new(stream);

        let mut request = String::new();
        stream.read_line(&mut request).await.unwrap();
        assert!(request.contains(r#""method":"eth_coinbase""#));
        assert!(request.contains(r#""id":1"#));

        stream
            .get_mut()
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"result\":\"0xc0ffee\"}\n")
            .await
            .unwrap();
    });

    let endpoint = path.to_str().unwrap().to_owned();
    let mut client = Client::connect(&endpoint, false).await.unwrap();

    let outcome = client.call("eth_coinbase", vec![]).await.unwrap();
    match outcome {
        CallOutcome::Reply(reply) => {
            assert_eq!(reply.into_result().unwrap(), serde_json::json!("0xc0ffee"))
        }
        CallOutcome::Queued => panic!("expected an immediate reply"),
    }

    server.await.unwrap();
}

#[tokio::test]
async fn missing_socket_is_a_transport_error() {
    let err = Client::connect("/tmp/definitely-not-a-node.ipc", false).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
