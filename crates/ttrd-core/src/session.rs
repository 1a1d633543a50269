//! Authenticated HTTP session over libcurl.
//!
//! One `Session` owns one curl Easy handle with the cookie engine enabled, so
//! cookies set during login ride along on every later request without any
//! header plumbing. Requests capture the full body in memory; report PDFs and
//! login pages are both small enough for that.

use std::time::Duration;

/// Captured HTTP response: final status code (after redirects) and body bytes.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

/// HTTP session with cookie persistence across requests.
#[derive(Debug)]
pub struct Session {
    easy: curl::easy::Easy,
}

impl Session {
    /// Creates a session that follows redirects and keeps cookies in memory.
    ///
    /// The empty cookie-file path enables libcurl's cookie engine without
    /// reading anything from disk; cookies live exactly as long as the handle.
    pub fn new() -> Result<Self, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.cookie_file("")?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        Ok(Self { easy })
    }

    /// GET `url`, capturing status and body. `timeout` bounds the whole transfer.
    pub fn get(&mut self, url: &str, timeout: Duration) -> Result<HttpResponse, curl::Error> {
        self.easy.url(url)?;
        // Reset the method: the handle may have done a POST earlier.
        self.easy.get(true)?;
        self.easy.timeout(timeout)?;
        self.perform()
    }

    /// POST `fields` form-encoded to `url`, capturing status and body.
    ///
    /// Redirects after the POST are followed; libcurl switches to GET on
    /// 301/302/303 like a browser would, so a post-login redirect lands on the
    /// destination page.
    pub fn post_form(
        &mut self,
        url: &str,
        fields: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<HttpResponse, curl::Error> {
        let mut encoded = url::form_urlencoded::Serializer::new(String::new());
        for &(name, value) in fields {
            encoded.append_pair(name, value);
        }
        let body = encoded.finish();

        self.easy.url(url)?;
        self.easy.timeout(timeout)?;
        self.easy.post(true)?;
        self.easy.post_fields_copy(body.as_bytes())?;
        self.perform()
    }

    fn perform(&mut self) -> Result<HttpResponse, curl::Error> {
        let mut body = Vec::new();
        {
            let mut transfer = self.easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }
        let status = self.easy.response_code()?;
        Ok(HttpResponse { status, body })
    }
}
