use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A failed request as seen by the transport.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("{status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        body: Bytes,
    },
    #[error("cannot decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// Uniform error shape for every failed backend call.
#[derive(Debug, Clone, Default, Error, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[error("{error}")]
pub struct ClientErrorObject {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

const GENERIC_ERROR: &str = "An error occurred";
const TOO_LARGE_ERROR: &str = "Request Entity Too Large";

pub fn get_client_error_object(err: &TransportError) -> ClientErrorObject {
    match err {
        TransportError::Network(cause) => ClientErrorObject {
            error: "Network error".to_string(),
            message: Some(cause.clone()),
            ..Default::default()
        },
        TransportError::Timeout => ClientErrorObject {
            error: "Request timed out".to_string(),
            status_text: Some("timeout".to_string()),
            ..Default::default()
        },
        TransportError::Decode(cause) => ClientErrorObject {
            error: "Unable to parse the response".to_string(),
            message: Some(cause.clone()),
            ..Default::default()
        },
        TransportError::Status {
            status,
            status_text,
            body,
        } => from_status(*status, status_text, body),
    }
}

fn from_status(status: u16, status_text: &str, body: &Bytes) -> ClientErrorObject {
    let fallback = if status == 413 {
        TOO_LARGE_ERROR.to_string()
    } else if status_text.is_empty() {
        GENERIC_ERROR.to_string()
    } else {
        status_text.to_string()
    };

    let mut object = ClientErrorObject {
        status: Some(status),
        status_text: (!status_text.is_empty()).then(|| status_text.to_string()),
        ..Default::default()
    };

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(body)) => {
            object.errors = match body.get("errors") {
                Some(Value::Array(errors)) => errors.clone(),
                _ => Vec::new(),
            };
            object.message = body.get("message").map(as_text);
            object.link = body.get("link").and_then(Value::as_str).map(str::to_string);
            object.error = first_error_message(&object.errors)
                .or_else(|| object.message.clone())
                .or_else(|| body.get("error").map(as_text))
                .unwrap_or(fallback);
        }
        _ => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            object.error = if text.is_empty() || status >= 500 || status == 413 {
                fallback
            } else {
                text
            };
        }
    }
    object
}

fn first_error_message(errors: &[Value]) -> Option<String> {
    errors
        .first()
        .and_then(Value::as_object)
        .and_then(|e: &Map<String, Value>| e.get("message"))
        .map(as_text)
}

/// Strings verbatim, anything else as compact JSON.
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
