//! HTTP request and response descriptors.
//!
//! # Design
//! A request is described as plain data before any I/O happens: the client
//! façade builds an `HttpRequest`, the transport executes it and hands back an
//! `HttpResponse`, and the pure `read_response` / envelope functions interpret
//! that response. Every value is created per call and consumed once.

use std::fmt;

/// Content type attached to every outbound request.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// HTTP method supported by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully assembled request.
///
/// `url` already carries the substituted path and the encoded query string.
/// `body` is the serialized JSON payload and is only present for `POST`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: String) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            headers: json_headers(),
            body: None,
        }
    }

    pub fn post(url: String, body: String) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            headers: json_headers(),
            body: Some(body),
        }
    }
}

/// A raw response as returned by the transport.
///
/// `reason` is the HTTP reason phrase for `status` (e.g. "Bad Request").
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())]
}
