//! Success envelope validation.
//!
//! A 2xx response must be `{"status": "success", "data": ...}`. Anything else
//! means the remote service broke its contract, and the raw body is reported.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::http::HttpMethod;

/// Unwrap the `data` field of a success envelope.
///
/// `data` may hold any JSON value, including `null`, but must be present.
pub fn parse_success_response(method: HttpMethod, body: Value) -> Result<Value> {
    let is_success = body.get("status").and_then(Value::as_str) == Some("success");
    match body {
        Value::Object(mut map) if is_success && map.contains_key("data") => {
            Ok(map.remove("data").unwrap_or(Value::Null))
        }
        other => Err(ClientError::Protocol {
            method,
            body: other.to_string(),
        }),
    }
}

/// Convert unwrapped `data` into the operation's result type.
pub fn parse_data<T: DeserializeOwned>(method: HttpMethod, data: Value) -> Result<T> {
    serde_json::from_value(data.clone()).map_err(|e| ClientError::UnexpectedData {
        method,
        message: format!("{e}; data={data}"),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[test]
    fn success_envelope_yields_data_unchanged() {
        let data = json!({"assetInfo": {"ticker": "TST1", "precision": 0}});
        let body = json!({"status": "success", "data": data.clone()});
        assert_eq!(parse_success_response(HttpMethod::Post, body).unwrap(), data);
    }

    #[test]
    fn null_data_is_accepted() {
        let body = json!({"status": "success", "data": null});
        assert_eq!(parse_success_response(HttpMethod::Get, body).unwrap(), Value::Null);
    }

    #[test]
    fn missing_data_is_protocol_error() {
        let body = json!({"status": "success"});
        let err = parse_success_response(HttpMethod::Post, body).unwrap_err();
        assert!(matches!(err, ClientError::Protocol { method: HttpMethod::Post, .. }));
        assert_eq!(
            err.to_string(),
            r#"Inconsistent successful POST request response: {"status":"success"}"#
        );
    }

    #[test]
    fn non_success_status_is_protocol_error() {
        let body = json!({"status": "error", "data": {}});
        let err = parse_success_response(HttpMethod::Get, body).unwrap_err();
        assert!(err.to_string().contains(r#""status":"error""#));
    }

    #[test]
    fn non_string_status_is_protocol_error() {
        let body = json!({"status": true, "data": 1});
        assert!(parse_success_response(HttpMethod::Get, body).is_err());
    }

    #[test]
    fn non_object_body_is_protocol_error() {
        let err = parse_success_response(HttpMethod::Get, json!([1, 2])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Inconsistent successful GET request response: [1,2]"
        );
    }

    #[derive(Debug, Deserialize)]
    struct Count {
        count: u32,
    }

    #[test]
    fn parse_data_maps_typed_result() {
        let count: Count = parse_data(HttpMethod::Get, json!({"count": 3})).unwrap();
        assert_eq!(count.count, 3);
    }

    #[test]
    fn parse_data_reports_shape_mismatch() {
        let err = parse_data::<Count>(HttpMethod::Get, json!({"count": "three"})).unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedData { .. }));
        assert!(err.to_string().contains(r#"data={"count":"three"}"#));
    }
}
