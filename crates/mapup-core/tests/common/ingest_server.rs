//! Minimal HTTP/1.1 server that accepts multipart POSTs for integration tests.
//!
//! Answers each request with the next status from a script (then a fallback
//! status) and records the raw request bytes so tests can inspect the form.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct IngestServerOptions {
    /// Statuses returned to the first requests, in order.
    pub script: Vec<u16>,
    /// Status returned once the script is exhausted.
    pub fallback: u16,
    /// If set, read the request then hold the connection open this long
    /// without answering (simulates a hung server).
    pub stall: Option<Duration>,
    /// If set, send the response body one byte per interval instead of at once
    /// (simulates a slow link that never goes fully idle).
    pub trickle: Option<Duration>,
}

impl Default for IngestServerOptions {
    fn default() -> Self {
        Self {
            script: Vec::new(),
            fallback: 200,
            stall: None,
            trickle: None,
        }
    }
}

/// Handle to a running server: endpoint URL plus captured requests.
pub struct IngestServer {
    pub url: String,
    requests: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl IngestServer {
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Raw request (headers and body) as lossy UTF-8.
    pub fn request_text(&self, index: usize) -> String {
        String::from_utf8_lossy(&self.requests.lock().unwrap()[index]).into_owned()
    }

    /// Request body only (after the blank line), as lossy UTF-8.
    pub fn body_text(&self, index: usize) -> String {
        let text = self.request_text(index);
        match text.split_once("\r\n\r\n") {
            Some((_, body)) => body.to_string(),
            None => String::new(),
        }
    }
}

/// Server answering 200 to everything.
pub fn start_ok() -> IngestServer {
    start(IngestServerOptions::default())
}

/// Starts a server in a background thread. Connections are handled one at a
/// time so the script is consumed in request order. Runs until process exit.
pub fn start(opts: IngestServerOptions) -> IngestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&requests);
    thread::spawn(move || {
        let mut script = opts.script.clone().into_iter();
        for stream in listener.incoming().flatten() {
            let status = script.next().unwrap_or(opts.fallback);
            handle(stream, status, &opts, &captured);
        }
    });
    IngestServer {
        url: format!("http://127.0.0.1:{}/upload", port),
        requests,
    }
}

fn handle(
    mut stream: TcpStream,
    status: u16,
    opts: &IngestServerOptions,
    captured: &Mutex<Vec<Vec<u8>>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let request = match read_request(&mut stream) {
        Some(r) => r,
        None => return,
    };
    captured.lock().unwrap().push(request);

    if let Some(d) = opts.stall {
        thread::sleep(d);
        return;
    }

    let body = format!("status {}", status);
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    if stream.write_all(head.as_bytes()).is_err() {
        return;
    }
    match opts.trickle {
        Some(interval) => {
            for byte in body.as_bytes() {
                thread::sleep(interval);
                if stream.write_all(std::slice::from_ref(byte)).is_err() {
                    return;
                }
            }
        }
        None => {
            let _ = stream.write_all(body.as_bytes());
        }
    }
}

/// Reads headers, answers `Expect: 100-continue`, then reads `Content-Length` bytes.
fn read_request(stream: &mut TcpStream) -> Option<Vec<u8>> {
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    let header_end = loop {
        if let Some(pos) = find(&data, b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
    };

    let headers = String::from_utf8_lossy(&data[..header_end]).into_owned();
    let mut content_length = 0usize;
    let mut expect_continue = false;
    for line in headers.lines().skip(1) {
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            }
            if name.eq_ignore_ascii_case("expect") && value.eq_ignore_ascii_case("100-continue") {
                expect_continue = true;
            }
        }
    }
    if expect_continue && data.len() == header_end {
        stream.write_all(b"HTTP/1.1 100 Continue\r\n\r\n").ok()?;
    }

    while data.len() < header_end + content_length {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }
    Some(data)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        409 => "Conflict",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
