use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde_json::Value;

use super::{ParseMethod, TransportError};

/// A successful transport response with its decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: HeaderMap,
    pub body: Bytes,
    /// `None` when decoded with [`ParseMethod::Raw`].
    pub json: Option<Value>,
}

impl ClientResponse {
    pub fn decode(
        status: u16,
        status_text: String,
        headers: HeaderMap,
        body: Bytes,
        parse_method: ParseMethod,
    ) -> Result<Self, TransportError> {
        let json = match parse_method {
            ParseMethod::Json | ParseMethod::JsonBigint => Some(
                serde_json::from_slice(&body).map_err(|e| TransportError::Decode(e.to_string()))?,
            ),
            ParseMethod::Text => Some(Value::String(
                String::from_utf8(body.to_vec())
                    .map_err(|e| TransportError::Decode(e.to_string()))?,
            )),
            ParseMethod::Raw => None,
        };
        Ok(Self {
            status,
            status_text,
            headers,
            body,
            json,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn decode(body: &'static str, parse_method: ParseMethod) -> Result<ClientResponse, TransportError> {
        ClientResponse::decode(
            200,
            "OK".to_string(),
            HeaderMap::new(),
            Bytes::from_static(body.as_bytes()),
            parse_method,
        )
    }

    #[test]
    fn test_big_integers_survive() {
        let response = decode(r#"{"id": 9007199254740993}"#, ParseMethod::JsonBigint).unwrap();
        assert_eq!(response.json, Some(json!({"id": 9007199254740993u64})));
    }

    #[test]
    fn test_text_and_raw() {
        let text = decode("hello", ParseMethod::Text).unwrap();
        assert_eq!(text.json, Some(json!("hello")));

        let raw = decode("hello", ParseMethod::Raw).unwrap();
        assert_eq!(raw.json, None);
        assert_eq!(raw.body, Bytes::from_static(b"hello"));
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let err = decode("<html>", ParseMethod::Json).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }
}
