//! HTTP transport types shared by the gateway and its transports.
//!
//! # Design
//! Requests and responses are plain data. The gateway builds an
//! `HttpRequest`, hands it to a `Transport`, and interprets the returned
//! `HttpResponse`. Nothing here touches the network, so the whole
//! request/response contract can be tested with hand-built values.
//!
//! Response bodies are raw bytes because some endpoints (the CSV export)
//! return files rather than JSON.

use std::fmt;

use serde_json::Value;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute: the gateway has already joined the base URL and the
/// endpoint suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// `status_text` is the reason phrase ("Not Found"); it may be empty when
/// the transport cannot supply one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Body supplied by a caller of the gateway.
///
/// `Text` is sent verbatim; `Json` is serialized when the request is built.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Text(String),
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

/// Per-call overrides merged over the gateway defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Option<HttpMethod>,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Result of reading a response body as JSON.
///
/// Parsing never fails outright; a body that is not JSON is kept as
/// `Malformed` so callers can tell it apart from a real empty object.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Json(Value),
    Empty,
    Malformed(String),
}

impl ParseOutcome {
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return ParseOutcome::Empty;
        }
        match serde_json::from_slice(body) {
            Ok(value) => ParseOutcome::Json(value),
            Err(_) => ParseOutcome::Malformed(String::from_utf8_lossy(body).into_owned()),
        }
    }

    /// The parsed value, or `{}` when the body was empty or not JSON.
    pub fn into_value(self) -> Value {
        match self {
            ParseOutcome::Json(value) => value,
            ParseOutcome::Empty | ParseOutcome::Malformed(_) => Value::Object(Default::default()),
        }
    }

    /// The `error` field of a JSON object body as display text.
    ///
    /// Falsy values (`null`, `false`, `0`, `""`) count as absent. Other
    /// non-string values are rendered as compact JSON.
    pub fn error_field(&self) -> Option<String> {
        let ParseOutcome::Json(value) = self else {
            return None;
        };
        match value.get("error")? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}
