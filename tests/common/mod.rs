//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use crossword_stub::{StubConfig, StubServer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Config bound to an ephemeral loopback port.
pub fn ephemeral_config() -> StubConfig {
    let mut config = StubConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config
}

/// Start the crossword stub on an ephemeral port.
pub async fn start_stub() -> (StubServer, SocketAddr) {
    let mut server = StubServer::new(&ephemeral_config()).unwrap();
    let addr = server.start().await.unwrap();
    (server, addr)
}

/// HTTP client that never goes through a proxy and never pools.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// A response read straight off the socket.
pub struct RawResponse {
    pub status: u16,
    pub head: String,
    pub body: Vec<u8>,
}

/// Send `request_target` verbatim, bypassing any client-side URL handling.
pub async fn raw_get(addr: SocketAddr, request_target: &str) -> RawResponse {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {request_target} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"
    );
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    socket.read_to_end(&mut raw).await.unwrap();

    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    let head = String::from_utf8_lossy(&raw[..split]).into_owned();
    let body = raw[split + 4..].to_vec();
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .expect("malformed status line");

    RawResponse { status, head, body }
}
