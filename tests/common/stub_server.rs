use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use serde_json::{Value, json};

/// A request the stub received.
#[derive(Debug, Clone, PartialEq)]
pub struct Received {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct Route {
    method: &'static str,
    path: String,
    status: u16,
    body: Value,
}

/// Canned W3C WebDriver endpoint on a loopback port.
///
/// Each route answers one method + path with a fixed status and JSON body.
/// Anything else gets a 404 `unknown command` error. One request per
/// connection.
#[derive(Default)]
pub struct StubDriverBuilder {
    routes: Vec<Route>,
}

impl StubDriverBuilder {
    /// Answer with `{"value": value}` and status 200.
    pub fn ok(self, method: &'static str, path: &str, value: Value) -> Self {
        self.route(method, path, 200, json!({ "value": value }))
    }

    /// Answer with a W3C error body.
    pub fn error(self, method: &'static str, path: &str, status: u16, code: &str) -> Self {
        let body = json!({ "value": { "error": code, "message": "stub", "stacktrace": "" } });
        self.route(method, path, status, body)
    }

    pub fn route(mut self, method: &'static str, path: &str, status: u16, body: Value) -> Self {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            status,
            body,
        });
        self
    }

    pub fn start(self) -> StubDriver {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let received = Arc::new(Mutex::new(Vec::new()));
        let stop = Arc::new(AtomicBool::new(false));

        let handle = {
            let received = Arc::clone(&received);
            let stop = Arc::clone(&stop);
            let routes = self.routes;
            thread::spawn(move || {
                for stream in listener.incoming() {
                    if stop.load(Ordering::SeqCst) {
                        break;
                    }
                    if let Ok(stream) = stream {
                        serve(stream, &routes, &received);
                    }
                }
            })
        };

        StubDriver {
            addr,
            received,
            stop,
            handle: Some(handle),
        }
    }
}

pub struct StubDriver {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<Received>>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl StubDriver {
    pub fn builder() -> StubDriverBuilder {
        StubDriverBuilder::default()
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    /// `METHOD path` of every request, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.received()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }
}

impl Drop for StubDriver {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        // wake the accept loop
        let _ = TcpStream::connect(self.addr);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn serve(mut stream: TcpStream, routes: &[Route], received: &Mutex<Vec<Received>>) {
    let Some(request) = read_request(&mut stream) else {
        return;
    };

    let (status, body) = routes
        .iter()
        .find(|r| r.method == request.method && r.path == request.path)
        .map(|r| (r.status, r.body.clone()))
        .unwrap_or_else(|| {
            let message = format!("no stub for {} {}", request.method, request.path);
            (404, json!({ "value": { "error": "unknown command", "message": message } }))
        });

    received.lock().unwrap().push(request);

    let payload = body.to_string();
    let response = format!(
        "HTTP/1.1 {} STUB\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        payload.len(),
        payload
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn read_request(stream: &mut TcpStream) -> Option<Received> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let end = buf.len().min(header_end + length);
    let body = if end > header_end {
        serde_json::from_slice(&buf[header_end..end]).ok()
    } else {
        None
    };

    Some(Received { method, path, body })
}
