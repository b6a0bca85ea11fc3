use crate::api::error::{ApiError, ApiResult};
use crate::api::AppState;
use crate::domain::model::{SubdomainRequest, SubdomainResponse};
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 解析請求內容；只讀第一個 JSON 值，後面的資料忽略，欄位名稱不分大小寫
pub fn decode_request(body: &[u8]) -> ApiResult<SubdomainRequest> {
    let value = serde_json::Deserializer::from_slice(body)
        .into_iter::<Value>()
        .next()
        .unwrap_or_else(|| {
            Err(<serde_json::Error as serde::de::Error>::custom(
                "EOF while parsing a value",
            ))
        })
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    let mut fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(ApiError::Decode(format!(
                "request body must be a JSON object, found {}",
                json_kind(&other)
            )))
        }
    };

    // 完全相符的 key 優先，否則取第一個大小寫不同的 "domain"
    if !fields.contains_key("domain") {
        let folded = fields
            .keys()
            .find(|key| key.eq_ignore_ascii_case("domain"))
            .cloned();
        if let Some(key) = folded {
            if let Some(domain) = fields.remove(&key) {
                fields.insert("domain".to_string(), domain);
            }
        }
    }

    serde_json::from_value(Value::Object(fields)).map_err(|e| ApiError::Decode(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub async fn enumerate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<SubdomainResponse>> {
    let request = decode_request(&body)?;

    // 連線中斷時 handler future 被 drop，guard 會取消進行中的列舉
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    tracing::info!(domain = ?request.domain, "Enumerating subdomains");
    let subdomains = state.enumerator.enumerate(&request.domain, cancel).await?;
    tracing::info!(
        domain = ?request.domain,
        "✅ Enumeration returned {} subdomains",
        subdomains.len()
    );

    Ok(Json(SubdomainResponse { subdomains }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_request_reads_domain() {
        let request = decode_request(br#"{"domain": "example.com"}"#).unwrap();
        assert_eq!(request.domain, "example.com");
    }

    #[test]
    fn test_decode_request_missing_domain_is_empty() {
        let request = decode_request(b"{}").unwrap();
        assert_eq!(request.domain, "");
    }

    #[test]
    fn test_decode_request_rejects_malformed_bodies() {
        let bodies: [&[u8]; 6] = [
            b"",
            b"{\"domain\":",
            b"not json",
            b"[]",
            b"\"example.com\"",
            b"null",
        ];
        for body in bodies {
            let err = decode_request(body).unwrap_err();
            assert!(matches!(err, ApiError::Decode(_)));
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_decode_request_field_name_ignores_case() {
        let request = decode_request(br#"{"Domain": "example.com"}"#).unwrap();
        assert_eq!(request.domain, "example.com");

        let request =
            decode_request(br#"{"DOMAIN": "upper.com", "domain": "exact.com"}"#).unwrap();
        assert_eq!(request.domain, "exact.com");
    }

    #[test]
    fn test_decode_request_ignores_trailing_data() {
        let body = b"{\"domain\": \"example.com\"}\n{\"domain\": \"other.com\"}";
        let request = decode_request(body).unwrap();
        assert_eq!(request.domain, "example.com");

        let request = decode_request(br#"{"domain": "example.com"} trailing garbage"#).unwrap();
        assert_eq!(request.domain, "example.com");
    }

    #[test]
    fn test_decode_request_whitespace_only_is_error() {
        let err = decode_request(b"  \n").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(err.to_string().contains("EOF"));
    }

    #[test]
    fn test_decode_request_rejects_wrong_field_type() {
        let err = decode_request(br#"{"domain": 42}"#).unwrap_err();
        assert!(err.to_string().contains("invalid type"));
    }
}
