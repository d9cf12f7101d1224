//! Response value object.
//!
//! # Responsibilities
//! - Accumulate the body through set/append/prepend
//! - Hold headers (last write wins) and the status code
//! - Write the raw HTTP representation exactly once
//!
//! # Design Decisions
//! - Unknown status codes are accepted with a warning, never rejected
//! - Status line and headers are emitted at most once (`output` guard)

use std::collections::HashMap;
use std::io::{self, Write};

/// Status codes with a known reason phrase.
const STATUS_REASONS: &[(u16, &str)] = &[
    (100, "Continue"),
    (101, "Switching Protocols"),
    (200, "OK"),
    (201, "Created"),
    (202, "Accepted"),
    (203, "Non-Authoritative Information"),
    (204, "No Content"),
    (205, "Reset Content"),
    (206, "Partial Content"),
    (301, "Moved Permanently"),
    (302, "Found"),
    (303, "See Other"),
    (304, "Not Modified"),
    (305, "Use Proxy"),
    (307, "Temporary Redirect"),
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (405, "Method Not Allowed"),
    (406, "Not Acceptable"),
    (407, "Proxy Authentication Required"),
    (408, "Request Timeout"),
    (409, "Conflict"),
    (410, "Gone"),
    (411, "Length Required"),
    (412, "Precondition Failed"),
    (413, "Request Entity Too Large"),
    (414, "Request-URI Too Long"),
    (415, "Unsupported Media Type"),
    (416, "Request Range Not Satisfiable"),
    (417, "Expectation Failed"),
    (422, "Unprocessable Entity"),
    (500, "Internal Server Error"),
    (501, "Not Implemented"),
    (502, "Bad Gateway"),
    (503, "Service Unavailable"),
    (504, "Gateway Timeout"),
    (505, "HTTP Version Not Supported"),
];

/// Reason phrase of a known status code.
pub fn reason_phrase(status_code: u16) -> Option<&'static str> {
    STATUS_REASONS
        .iter()
        .find(|(code, _)| *code == status_code)
        .map(|(_, reason)| *reason)
}

/// The response built up by controllers during dispatch.
#[derive(Debug, Clone)]
pub struct Response {
    content: String,
    headers: HashMap<String, String>,
    status_code: u16,
    headers_sent: bool,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            content: String::new(),
            headers: HashMap::new(),
            status_code: 200,
            headers_sent: false,
        }
    }
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> &mut Self {
        self.content = content.into();
        self
    }

    pub fn append_content(&mut self, content: &str) -> &mut Self {
        self.content.push_str(content);
        self
    }

    pub fn prepend_content(&mut self, content: &str) -> &mut Self {
        self.content.insert_str(0, content);
        self
    }

    /// Set a header, replacing any previous value.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Header value, empty if the header is not set.
    pub fn header(&self, name: &str) -> &str {
        self.headers.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn remove_header(&mut self, name: &str) -> &mut Self {
        self.headers.remove(name);
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn set_status_code(&mut self, status_code: u16) -> &mut Self {
        if reason_phrase(status_code).is_none() {
            tracing::warn!(status_code, "Unknown HTTP status code given");
        }
        self.status_code = status_code;
        self
    }

    pub fn headers_sent(&self) -> bool {
        self.headers_sent
    }

    /// Write status line, headers and body as HTTP/1.1.
    ///
    /// The status line and headers are only written on the first call;
    /// an unknown status code produces no status line.
    pub fn output<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if !self.headers_sent {
            if let Some(reason) = reason_phrase(self.status_code) {
                write!(out, "HTTP/1.1 {} {}\r\n", self.status_code, reason)?;
            }

            let mut names: Vec<_> = self.headers.keys().collect();
            names.sort();
            for name in names {
                write!(out, "{}: {}\r\n", name, self.headers[name])?;
            }
            out.write_all(b"\r\n")?;
            self.headers_sent = true;
        }

        out.write_all(self.content.as_bytes())
    }
}
