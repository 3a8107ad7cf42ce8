//! Shared fakes for unit tests: a capturing writer, a recording notifier,
//! a scripted transport, and tiny one-shot HTTP servers.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use url::Url;

use crate::config::diagnose_url;
use crate::diagnose_client::{DiagnoseTransport, TransportError};
use crate::notify::{Notifier, Severity};

/// `Write` sink whose contents stay readable after it is boxed away.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub fn recorded(&self) -> Vec<(Severity, String)> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, title: &str, _description: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((severity, title.to_string()));
    }
}

/// Transport that replays queued results and records every message sent.
#[derive(Default)]
pub struct MockTransport {
    results: Mutex<VecDeque<Result<String, TransportError>>>,
    pub messages: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn queue_reply(&self, reply: &str) {
        self.results.lock().unwrap().push_back(Ok(reply.to_string()));
    }

    pub fn queue_error(&self, error: TransportError) {
        self.results.lock().unwrap().push_back(Err(error));
    }

    pub fn sent(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl DiagnoseTransport for MockTransport {
    async fn diagnose(&self, message: &str) -> Result<String, TransportError> {
        self.messages.lock().unwrap().push(message.to_string());
        self.results.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(TransportError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: "no mock reply queued".to_string(),
            })
        })
    }
}

/// Serves exactly one HTTP response and hands back the raw request it saw.
pub async fn spawn_stub_server(
    status_line: &'static str,
    body: &'static str,
) -> (Url, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (diagnose_url(&format!("http://{addr}")).unwrap(), handle)
}

/// Accepts a connection and never answers.
pub async fn spawn_silent_server() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    diagnose_url(&format!("http://{addr}")).unwrap()
}

/// A local address nothing is listening on.
pub async fn unused_endpoint() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    diagnose_url(&format!("http://{addr}")).unwrap()
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}
