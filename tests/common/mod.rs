//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use signature_mvc::config::{self, AppConfig};
use signature_mvc::{demo, Application, HttpServer};

/// Default configuration with the demo routes installed.
pub fn demo_config() -> AppConfig {
    let mut config = AppConfig::default();
    demo::install_routes(&mut config);
    config
}

/// Demo application over `config`.
pub fn demo_app_with(config: AppConfig) -> Application {
    let shared = config::shared(config);
    let container = demo::build_container(shared.clone());
    Application::new(Arc::new(container), shared)
}

pub fn demo_app() -> Application {
    demo_app_with(demo_config())
}

/// Serve `app` on an ephemeral port. Dropping the sender stops the server.
pub async fn spawn_server(app: Application) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown = async {
            let _ = rx.await;
        };
        HttpServer::new(app).run(listener, shutdown).await.unwrap();
    });

    (addr, tx)
}

/// Send a raw HTTP/1.1 request and return the full response text.
pub async fn raw_request(addr: SocketAddr, request: &str) -> String {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    socket.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

/// `GET path` with `Connection: close`.
pub async fn get(addr: SocketAddr, path: &str) -> String {
    raw_request(
        addr,
        &format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"),
    )
    .await
}
