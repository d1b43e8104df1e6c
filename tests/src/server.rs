//! Bare HTTP/1.1 responder on loopback. One request per connection.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

#[derive(Clone)]
struct Route {
    status: u16,
    reason: &'static str,
    body: String,
}

#[derive(Default)]
pub struct ListingServer {
    routes: HashMap<String, Route>,
}

pub struct RunningServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ListingServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn csv(mut self, path: &str, body: &str) -> Self {
        self.routes.insert(
            path.to_string(),
            Route {
                status: 200,
                reason: "OK",
                body: body.to_string(),
            },
        );
        self
    }

    pub fn status(mut self, path: &str, status: u16, reason: &'static str) -> Self {
        self.routes.insert(
            path.to_string(),
            Route {
                status,
                reason,
                body: String::new(),
            },
        );
        self
    }

    pub async fn start(self) -> RunningServer {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes = Arc::new(self.routes);

        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                tokio::spawn(respond(stream, Arc::clone(&routes)));
            }
        });

        RunningServer { addr, handle }
    }
}

impl RunningServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn respond(mut stream: TcpStream, routes: Arc<HashMap<String, Route>>) {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let head = String::from_utf8_lossy(&request);
    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
    let route = routes.get(&path).cloned().unwrap_or(Route {
        status: 404,
        reason: "Not Found",
        body: String::new(),
    });

    let response = format!(
        "HTTP/1.1 {} {}\r\n\
         Content-Type: text/csv\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{}",
        route.status,
        route.reason,
        route.body.len(),
        route.body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}
