//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Mutex};

use render_service::config::AppConfig;
use render_service::HttpServer;

/// The request head a mock backend saw: the request target plus its
/// headers, lowercased.
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub target: String,
    pub headers: Vec<(String, String)>,
}

impl RequestHead {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Start a mock JSON backend on an ephemeral port.
///
/// Responses are consumed in order; the last one repeats once the script
/// is exhausted. Every observed request head is forwarded through the
/// returned channel.
pub async fn start_mock_backend(
    responses: Vec<(u16, String)>,
) -> (SocketAddr, mpsc::UnboundedReceiver<RequestHead>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    let responses = Arc::new(Mutex::new(responses));

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let tx = tx.clone();
                    let responses = responses.clone();
                    tokio::spawn(async move {
                        let head = read_request_head(&mut socket).await;
                        if let Some(head) = head {
                            let _ = tx.send(head);
                        }

                        let (status, body) = {
                            let mut responses = responses.lock().await;
                            if responses.len() > 1 {
                                responses.remove(0)
                            } else {
                                responses
                                    .first()
                                    .cloned()
                                    .unwrap_or((200, "{}".to_string()))
                            }
                        };
                        let response_str = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            status_text(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, rx)
}

/// Start a backend that sends response headers plus a partial body and
/// then stalls without ever finishing.
pub async fn start_stalling_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let _ = read_request_head(&mut socket).await;
                        let head = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 1000\r\n\r\n{\"data\":";
                        let _ = socket.write_all(head.as_bytes()).await;
                        // Hold the connection open with the body unfinished.
                        tokio::time::sleep(std::time::Duration::from_secs(60)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "OK",
    }
}

/// Read the raw request head (everything up to the blank line).
async fn read_request_head(socket: &mut tokio::net::TcpStream) -> Option<RequestHead> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    let head = String::from_utf8_lossy(&buf);
    let mut lines = head.split("\r\n");
    let request_line = lines.next()?;
    let target = request_line.split_whitespace().nth(1)?.to_string();
    let headers = lines
        .take_while(|line| !line.is_empty())
        .filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            Some((name.trim().to_ascii_lowercase(), value.trim().to_string()))
        })
        .collect();

    Some(RequestHead { target, headers })
}

/// Start the render service on an ephemeral port.
pub async fn start_render_server(config: AppConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}

/// A page-data body in the shape the content backend serves.
pub fn topic_body(title: &str, active_page: u32, page_count: u32) -> String {
    serde_json::json!({
        "data": {
            "title": title,
            "description": format!("{title} articles"),
            "summaries": [{
                "title": "First promo",
                "type": "article",
                "firstPublished": "2022-01-06T19:00:29.000Z",
                "imageUrl": "https://image.test/promo.jpg",
                "imageAlt": "promo alt",
                "link": "https://link.test/promo",
                "id": "11111"
            }],
            "activePage": active_page,
            "pageCount": page_count
        }
    })
    .to_string()
}

/// A toggle payload in the shape the toggle endpoint serves.
pub fn toggles_body() -> String {
    serde_json::json!({
        "toggles": {
            "mostRead": { "enabled": true },
            "ads": { "enabled": false }
        }
    })
    .to_string()
}
