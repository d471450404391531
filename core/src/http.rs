//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `RobopostClient` builds
//! `HttpRequest` values and parses `HttpResponse` values; a `Transport`
//! (see `transport.rs`) performs the round-trip in between. Every Robopost
//! endpoint is a POST, so the method is not carried.
//!
//! The API key rides in `query`, never in `url`, so a URL can be logged
//! without leaking credentials.

/// A single file field of a multipart/form-data body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field_name: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpBody {
    Empty,
    Json(String),
    Multipart(FilePart),
}

impl HttpBody {
    /// The JSON text, if this is a JSON body.
    pub fn as_json(&self) -> Option<&str> {
        match self {
            HttpBody::Json(s) => Some(s),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            HttpBody::Empty => 0,
            HttpBody::Json(s) => s.len(),
            HttpBody::Multipart(part) => part.bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A POST request described as plain data.
///
/// Built by `RobopostClient::build_*` methods.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: HttpBody,
}

impl HttpRequest {
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport`, then passed to `RobopostClient::parse_*`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
