//! HTTP transport types shared by the request builder and the adapter.
//!
//! # Design
//! Requests and responses are described as plain data. `MuseumClient` builds
//! `HttpRequest` values and parses `HttpResponse` values without touching the
//! network; the `Adapter` is the only place that performs I/O. This keeps
//! request construction and error classification deterministic and easy to
//! test against recorded responses.

/// Content type attached to every request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `MuseumClient::build_*` methods and executed by the `Adapter`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// `status_text` carries the reason phrase (`"Not Found"`), which is what the
/// normalized error falls back to when the server sends no message.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
