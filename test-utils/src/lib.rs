//! Test utilities for integration tests
//! Runs the service on an ephemeral port and provides downstream fixtures

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Test fixture serving a router on 127.0.0.1 with a random port
pub struct TestServer {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Bind an ephemeral port and start serving `app` in the background
    pub async fn spawn(app: Router) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind test server")?;
        let addr = listener.local_addr()?;

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Test server stopped: {}", e);
            }
        });

        Ok(Self { addr, task })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// A downstream that accepts connections, reads the request and never answers.
///
/// Every connection the client closes is reported, so tests can observe that
/// a timed-out call really released its socket.
pub struct StallingDownstream {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    aborts: tokio::sync::Mutex<mpsc::UnboundedReceiver<Instant>>,
    task: JoinHandle<()>,
}

impl StallingDownstream {
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind stalling downstream")?;
        let addr = listener.local_addr()?;
        let requests = Arc::new(Mutex::new(Vec::new()));
        let (abort_tx, abort_rx) = mpsc::unbounded_channel();

        let task = {
            let requests = Arc::clone(&requests);
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    let requests = Arc::clone(&requests);
                    let abort_tx = abort_tx.clone();
                    tokio::spawn(async move {
                        hold_connection(stream, requests, abort_tx).await;
                    });
                }
            })
        };

        Ok(Self {
            addr,
            requests,
            aborts: tokio::sync::Mutex::new(abort_rx),
            task,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Raw request heads received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Wait until a client closes one of its connections
    pub async fn wait_for_abort(&self, within: Duration) -> Result<Instant> {
        let mut aborts = self.aborts.lock().await;
        tokio::time::timeout(within, aborts.recv())
            .await
            .context("No connection was aborted in time")?
            .context("Stalling downstream stopped")
    }
}

impl Drop for StallingDownstream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn hold_connection(
    mut stream: TcpStream,
    requests: Arc<Mutex<Vec<String>>>,
    abort_tx: mpsc::UnboundedSender<Instant>,
) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    let mut recorded = false;

    loop {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => {
                let _ = abort_tx.send(Instant::now());
                return;
            }
            Ok(n) if !recorded => {
                head.extend_from_slice(&buf[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") {
                    requests
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .push(String::from_utf8_lossy(&head).into_owned());
                    recorded = true;
                }
            }
            Ok(_) => {}
        }
    }
}

/// Address nothing is listening on, for connection-refused scenarios
pub async fn unused_addr() -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("Failed to reserve a port")?;
    listener.local_addr().context("Failed to read reserved port")
}

/// Find a header value in a raw request head, matching the name case-insensitively
pub fn header_value<'a>(request_head: &'a str, name: &str) -> Option<&'a str> {
    request_head.lines().skip(1).find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[test]
    fn test_header_value_is_case_insensitive() {
        let head = "GET /x HTTP/1.1\r\nHost: a\r\nX-Request-Id: abc\r\n\r\n";

        assert_eq!(header_value(head, "x-request-id"), Some("abc"));
        assert_eq!(header_value(head, "missing"), None);
    }

    #[tokio::test]
    async fn test_stalling_downstream_reports_close() {
        let downstream = StallingDownstream::start().await.unwrap();

        let mut stream = TcpStream::connect(downstream.addr).await.unwrap();
        stream
            .write_all(b"GET /slow HTTP/1.1\r\nhost: test\r\nx-request-id: r1\r\n\r\n")
            .await
            .unwrap();

        // Give the fixture a moment to record the head before hanging up
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(stream);

        downstream
            .wait_for_abort(Duration::from_secs(5))
            .await
            .unwrap();
        let requests = downstream.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(header_value(&requests[0], "x-request-id"), Some("r1"));
    }
}
