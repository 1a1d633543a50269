//! Minimal HTTP/1.1 portal stand-in for integration tests.
//!
//! Serves a login page with an optional CSRF token input, a signin endpoint
//! that sets a session cookie, and per-id printable report routes. Counts GET
//! and POST hits so tests can assert that no request was issued.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Path the portal serves printable reports under, id appended.
pub const REPORT_PREFIX: &str = "/patrol/default/viewreportprintable/idreport/";

/// Canned response for one report id.
#[derive(Debug, Clone)]
pub struct ReportResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl ReportResponse {
    pub fn pdf(body: &[u8]) -> Self {
        Self {
            status: 200,
            body: body.to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PortalOptions {
    /// Status of the login page GET.
    pub page_status: u32,
    /// CSRF token embedded in the login page; None renders the form without one.
    pub csrf_token: Option<String>,
    /// Status of the signin POST response.
    pub signin_status: u32,
    /// Body of the signin POST response.
    pub signin_body: String,
    /// If true, report routes answer 403 unless the signin cookie is presented.
    pub reports_need_cookie: bool,
    /// Responses per report id; ids not listed answer 404.
    pub reports: HashMap<String, ReportResponse>,
}

impl Default for PortalOptions {
    fn default() -> Self {
        Self {
            page_status: 200,
            csrf_token: Some("tok-default".to_string()),
            signin_status: 200,
            signin_body: "<a href=\"/logout\">Logout</a>".to_string(),
            reports_need_cookie: false,
            reports: HashMap::new(),
        }
    }
}

/// Handle to a running portal. The server runs until the process exits.
pub struct PortalServer {
    pub base_url: String,
    get_hits: Arc<AtomicUsize>,
    post_hits: Arc<AtomicUsize>,
    last_post_body: Arc<Mutex<Option<String>>>,
}

impl PortalServer {
    pub fn get_hits(&self) -> usize {
        self.get_hits.load(Ordering::SeqCst)
    }

    pub fn post_hits(&self) -> usize {
        self.post_hits.load(Ordering::SeqCst)
    }

    /// Body of the most recent POST, form-encoded as received on the wire.
    pub fn last_post_body(&self) -> Option<String> {
        self.last_post_body.lock().unwrap().clone()
    }
}

/// Starts a portal in a background thread. Returns the handle with the base
/// URL (e.g. "http://127.0.0.1:12345/").
pub fn start(opts: PortalOptions) -> PortalServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let get_hits = Arc::new(AtomicUsize::new(0));
    let post_hits = Arc::new(AtomicUsize::new(0));
    let last_post_body = Arc::new(Mutex::new(None));

    let server = PortalServer {
        base_url: format!("http://127.0.0.1:{}/", port),
        get_hits: Arc::clone(&get_hits),
        post_hits: Arc::clone(&post_hits),
        last_post_body: Arc::clone(&last_post_body),
    };

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let opts = opts.clone();
            let get_hits = Arc::clone(&get_hits);
            let post_hits = Arc::clone(&post_hits);
            let last_post_body = Arc::clone(&last_post_body);
            thread::spawn(move || handle(stream, &opts, &get_hits, &post_hits, &last_post_body));
        }
    });

    server
}

struct Request {
    method: String,
    path: String,
    cookie: Option<String>,
    body: String,
}

fn handle(
    mut stream: TcpStream,
    opts: &PortalOptions,
    get_hits: &AtomicUsize,
    post_hits: &AtomicUsize,
    last_post_body: &Mutex<Option<String>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let request = match read_request(&mut stream) {
        Some(r) => r,
        None => return,
    };

    match request.method.as_str() {
        "GET" => {
            get_hits.fetch_add(1, Ordering::SeqCst);
            handle_get(stream, opts, &request);
        }
        "POST" => {
            post_hits.fetch_add(1, Ordering::SeqCst);
            *last_post_body.lock().unwrap() = Some(request.body.clone());
            handle_post(stream, opts, &request);
        }
        _ => {
            let _ = write_response(stream, 405, &[], b"");
        }
    }
}

fn handle_get(stream: TcpStream, opts: &PortalOptions, request: &Request) {
    if request.path == "/" {
        let _ = write_response(stream, opts.page_status, &[], login_page(opts).as_bytes());
        return;
    }
    if let Some(id) = request.path.strip_prefix(REPORT_PREFIX) {
        if opts.reports_need_cookie && !has_session_cookie(request) {
            let _ = write_response(stream, 403, &[], b"session required");
            return;
        }
        match opts.reports.get(id) {
            Some(report) => {
                let _ = write_response(stream, report.status, &[], &report.body);
            }
            None => {
                let _ = write_response(stream, 404, &[], b"no such report");
            }
        }
        return;
    }
    let _ = write_response(stream, 404, &[], b"not found");
}

fn handle_post(stream: TcpStream, opts: &PortalOptions, request: &Request) {
    if request.path != "/form/secursignin/signin" {
        let _ = write_response(stream, 404, &[], b"not found");
        return;
    }
    let headers = ["Set-Cookie: portal_session=integ; Path=/"];
    let _ = write_response(
        stream,
        opts.signin_status,
        &headers,
        opts.signin_body.as_bytes(),
    );
}

fn has_session_cookie(request: &Request) -> bool {
    request
        .cookie
        .as_deref()
        .map(|c| c.contains("portal_session="))
        .unwrap_or(false)
}

fn login_page(opts: &PortalOptions) -> String {
    let token_input = opts
        .csrf_token
        .as_deref()
        .map(|token| format!(r#"<input type="hidden" name="_csrf_token" value="{}"/>"#, token))
        .unwrap_or_default();
    format!(
        "<html><body><form method=\"post\" action=\"/form/secursignin/signin\">\
         {}<input name=\"email\"/><input type=\"password\" name=\"password\"/>\
         </form></body></html>",
        token_input
    )
}

fn write_response(
    mut stream: TcpStream,
    status: u32,
    headers: &[&str],
    body: &[u8],
) -> std::io::Result<()> {
    let mut response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        status,
        reason(status),
        body.len()
    );
    for header in headers {
        response.push_str(header);
        response.push_str("\r\n");
    }
    response.push_str("\r\n");
    stream.write_all(response.as_bytes())?;
    stream.write_all(body)
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

/// Reads the request line and headers, then drains the body per
/// Content-Length so POSTs arrive whole even when the client writes headers
/// and body in separate segments.
fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
        if buf.len() > 64 * 1024 {
            return None;
        }
    };

    let head = std::str::from_utf8(&buf[..header_end]).ok()?;
    let mut lines = head.lines();
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut content_length = 0usize;
    let mut cookie = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("cookie") {
                cookie = Some(value.to_string());
            }
        }
    }

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    Some(Request {
        method,
        path,
        cookie,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
