//! Failure statuses produced while forwarding to an upstream.

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use mtb_site::config::MountConfig;
use mtb_site::{Shutdown, SiteConfig};

mod common;

async fn start_with_stalling_app(configure: impl FnOnce(&mut SiteConfig)) -> (SocketAddr, Shutdown) {
    let app = common::start_stalling_upstream().await;

    let mut config = SiteConfig::default();
    config.mounts = vec![MountConfig::new("app", "", app.to_string())];
    configure(&mut config);

    let shutdown = Shutdown::new();
    let addr = common::start_site(config, &shutdown).await;
    (addr, shutdown)
}

#[tokio::test]
async fn test_silent_upstream_is_gateway_timeout() {
    let (addr, shutdown) = start_with_stalling_app(|config| config.timeouts.request_secs = 1).await;

    let res = common::client()
        .get(format!("http://{}/events/", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 504);

    let json: serde_json::Value = res.json().await.unwrap();
    assert!(json["message"].as_str().unwrap().starts_with("Upstream timed out"), "{}", json);

    shutdown.trigger();
}

#[tokio::test]
async fn test_declared_oversized_body_is_rejected() {
    let (addr, shutdown) = start_with_stalling_app(|config| config.security.max_body_size = 16).await;

    let res = common::client()
        .post(format!("http://{}/upload/", addr))
        .body(vec![0u8; 64])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 413);

    shutdown.trigger();
}

#[tokio::test]
async fn test_chunked_oversized_body_is_rejected() {
    let (addr, shutdown) = start_with_stalling_app(|config| {
        config.security.max_body_size = 16;
        config.timeouts.request_secs = 5;
    })
    .await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    let chunk = "x".repeat(64);
    let request = format!(
        "POST /upload/ HTTP/1.1\r\nHost: {}\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n{:x}\r\n{}\r\n0\r\n\r\n",
        addr,
        chunk.len(),
        chunk
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    let _ = stream.read_to_end(&mut response).await;
    let response = String::from_utf8_lossy(&response);
    let status_line = response.lines().next().unwrap_or_default();
    assert!(status_line.contains("413"), "{}", response);

    shutdown.trigger();
}
