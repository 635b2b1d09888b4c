#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]
//! # Generic Ethereum JSON-RPC client
//!
//! This crate provides an asynchronous client for the
//! [Ethereum JSON-RPC](https://github.com/ethereum/wiki/wiki/JSON-RPC) and
//! [go-ethereum management](https://github.com/ethereum/go-ethereum/wiki/Management-APIs)
//! APIs. Every node method is dispatched by name through a fixed catalog of
//! known methods, multiple calls can be batched into a single round trip,
//! and the wire channel is pluggable between HTTP and a local IPC socket.
//!
//! # Examples
//!
//! ```no_run
//! use ethrpc::{CallOutcome, Client};
//! use serde_json::json;
//!
//! # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = Client::connect("http://localhost:8545", false).await?;
//!
//! if let CallOutcome::Reply(reply) = client.call("eth_block_number", vec![]).await? {
//!     println!("head: {:?}", reply.result);
//! }
//!
//! let balance = client
//!     .call("eth_getBalance", vec![json!("0x407d73d8a49eeb85d32cf465507dd71d507100c1")])
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Batching
//!
//! Any sequence of calls can be collected into one transport round trip:
//!
//! ```no_run
//! # use ethrpc::Client;
//! # async fn foo(client: &mut Client) -> Result<(), Box<dyn std::error::Error>> {
//! client.begin_batch()?;
//! client.call("eth_block_number", vec![]).await?;
//! client.call("eth_gas_price", vec![]).await?;
//! let replies = client.submit_batch().await?;
//! assert_eq!(replies.len(), 2);
//! # Ok(())
//! # }
//! ```

mod client;
pub use client::{CallOutcome, Client};

mod errors;
pub use errors::{ClientError, TransportError};

mod jsonrpc;
pub use jsonrpc::{JsonRpcError, Reply, Request};

mod methods;
pub use methods::{MethodDescriptor, DEFAULT_BLOCK_TAG, MANAGEMENT, STANDARD};

pub mod transports;
pub use transports::{Authorization, Http, Mock, Transport};
#[cfg(unix)]
pub use transports::Ipc;
