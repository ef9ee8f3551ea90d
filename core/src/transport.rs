//! HTTP transport.
//!
//! [`Transport::execute`] is the only suspension point of a call: it sends an
//! `HttpRequest` with reqwest and returns the raw `HttpResponse`.
//! [`read_response`] then decodes the body and maps non-2xx statuses to
//! `ApiError`. No retries happen here and no timeout is configured, so every
//! failure reaches the caller as soon as it occurs.

use reqwest::header;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ApiError, ClientError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method;
        debug!(http.method = %method, http.url = %request.url, "rest request");

        let mut builder = match method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            debug!(http.method = %method, error = %e, "rest request failed");
            ClientError::Transport {
                method,
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await.map_err(|e| ClientError::Decode {
            method,
            message: e.to_string(),
        })?;
        debug!(
            http.method = %method,
            %status,
            content_type = content_type.as_deref().unwrap_or(""),
            body_len = body.len(),
            "rest response"
        );
        trace!(http.method = %method, body = %body, "rest response body");

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// Decode a raw response and fail on non-2xx statuses.
///
/// The body is decoded before the status is inspected, so an error response
/// without a JSON body surfaces as a decode error.
pub fn read_response(method: HttpMethod, response: HttpResponse) -> Result<Value> {
    let body: Value = serde_json::from_str(&response.body).map_err(|e| {
        debug!(http.method = %method, status = response.status, error = %e, "undecodable response body");
        ClientError::Decode {
            method,
            message: e.to_string(),
        }
    })?;

    if !response.is_success() {
        let api_message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_owned);
        debug!(
            http.method = %method,
            status = response.status,
            api_message = api_message.as_deref().unwrap_or(""),
            "rest api error"
        );
        return Err(ApiError::new(response.status, response.reason, api_message).into());
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(status: u16, reason: &str, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            reason: reason.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn success_body_is_returned_decoded() {
        let body = read_response(
            HttpMethod::Post,
            response(200, "OK", r#"{"status":"success","data":{"assetInfo":{}}}"#),
        )
        .unwrap();
        assert_eq!(body, json!({"status": "success", "data": {"assetInfo": {}}}));
    }

    #[test]
    fn bad_request_with_message_is_api_error() {
        let err = read_response(
            HttpMethod::Post,
            response(400, "Bad Request", r#"{"message":"Invalid parameters"}"#),
        )
        .unwrap_err();
        let api = err.api_error().expect("api error");
        assert_eq!(api.http_status_code, 400);
        assert_eq!(api.http_status_message, "Bad Request");
        assert_eq!(api.api_error_message.as_deref(), Some("Invalid parameters"));
        assert_eq!(
            err.to_string(),
            "Error returned from REST API endpoint: [400] Invalid parameters"
        );
    }

    #[test]
    fn error_body_without_message_uses_reason() {
        let err = read_response(
            HttpMethod::Get,
            response(500, "Internal Server Error", r#"{"error":"boom"}"#),
        )
        .unwrap_err();
        let api = err.api_error().expect("api error");
        assert!(api.api_error_message.is_none());
        assert_eq!(
            err.to_string(),
            "Error returned from REST API endpoint: [500] Internal Server Error"
        );
    }

    #[test]
    fn non_string_message_is_ignored() {
        let err = read_response(HttpMethod::Get, response(422, "Unprocessable Entity", r#"{"message":12}"#))
            .unwrap_err();
        assert!(err.api_error().unwrap().api_error_message.is_none());
    }

    #[test]
    fn invalid_json_is_decode_error() {
        let err = read_response(HttpMethod::Get, response(200, "OK", "<html>")).unwrap_err();
        assert!(matches!(err, ClientError::Decode { method: HttpMethod::Get, .. }));
        assert!(err
            .to_string()
            .starts_with("Error reading GET request response: "));
    }

    #[test]
    fn invalid_json_wins_over_error_status() {
        let err = read_response(HttpMethod::Post, response(502, "Bad Gateway", "")).unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }
}
