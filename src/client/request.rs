use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a response body is decoded into [`super::ClientResponse::json`].
///
/// `Json` and `JsonBigint` decode identically: integers are kept exact up to
/// 64 bits either way.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ParseMethod {
    #[serde(rename = "json")]
    Json,
    #[default]
    #[serde(rename = "json-bigint")]
    JsonBigint,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "raw")]
    Raw,
}

impl ParseMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMethod::Json => "json",
            ParseMethod::JsonBigint => "json-bigint",
            ParseMethod::Text => "text",
            ParseMethod::Raw => "raw",
        }
    }
}

impl fmt::Display for ParseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Sent as `application/json`.
    Json(Value),
    /// Sent as form fields, one per top-level key.
    Form(Map<String, Value>),
}

impl Payload {
    /// Encodes form fields. With `stringify`, every value is JSON-encoded;
    /// without it strings go out verbatim and structured values are
    /// JSON-encoded once. `null` fields are skipped.
    pub fn form_fields(fields: &Map<String, Value>, stringify: bool) -> Vec<(String, String)> {
        fields
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| {
                let encoded = match value {
                    Value::String(s) if !stringify => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), encoded)
            })
            .collect()
    }
}

/// Per-call overrides applied on top of a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    pub endpoint: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub timeout: Option<Duration>,
    pub parse_method: Option<ParseMethod>,
}

impl RequestParams {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientRequest {
    pub method: Method,
    pub endpoint: String,
    pub payload: Option<Payload>,
    pub stringify: bool,
    pub parse_method: ParseMethod,
    pub params: RequestParams,
}

impl ClientRequest {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            endpoint: endpoint.into(),
            payload: None,
            stringify: true,
            parse_method: ParseMethod::default(),
            params: RequestParams::default(),
        }
    }

    pub fn json_payload(mut self, payload: Value) -> Self {
        self.payload = Some(Payload::Json(payload));
        self
    }

    pub fn post_payload(mut self, fields: Map<String, Value>) -> Self {
        self.payload = Some(Payload::Form(fields));
        self
    }

    pub fn stringify(mut self, stringify: bool) -> Self {
        self.stringify = stringify;
        self
    }

    pub fn parse_method(mut self, parse_method: ParseMethod) -> Self {
        self.parse_method = parse_method;
        self
    }

    pub fn params(mut self, params: RequestParams) -> Self {
        self.params = params;
        self
    }

    /// Endpoint after overrides.
    pub fn target(&self) -> &str {
        self.params.endpoint.as_deref().unwrap_or(&self.endpoint)
    }

    pub fn effective_parse_method(&self) -> ParseMethod {
        self.params.parse_method.unwrap_or(self.parse_method)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_form_fields_without_stringify() {
        let fields = json!({"form_data": {"viz_type": "table"}, "slice_id": "7", "skip": null});
        let Value::Object(fields) = fields else {
            unreachable!()
        };
        let mut encoded = Payload::form_fields(&fields, false);
        encoded.sort();
        assert_eq!(
            encoded,
            vec![
                ("form_data".to_string(), r#"{"viz_type":"table"}"#.to_string()),
                ("slice_id".to_string(), "7".to_string()),
            ]
        );
    }

    #[test]
    fn test_form_fields_with_stringify_quotes_strings() {
        let fields = Map::from_iter([("name".to_string(), json!("abc"))]);
        assert_eq!(
            Payload::form_fields(&fields, true),
            vec![("name".to_string(), r#""abc""#.to_string())]
        );
    }

    #[test]
    fn test_overrides_win() {
        let request = ClientRequest::new("/a").params(RequestParams {
            endpoint: Some("/b".to_string()),
            parse_method: Some(ParseMethod::Text),
            ..Default::default()
        });
        assert_eq!(request.target(), "/b");
        assert_eq!(request.effective_parse_method(), ParseMethod::Text);
    }

    #[test]
    fn test_parse_method_wire_names() {
        assert_eq!(ParseMethod::default().as_str(), "json-bigint");
        let parsed: ParseMethod = serde_json::from_str(r#""json-bigint""#).unwrap();
        assert_eq!(parsed, ParseMethod::JsonBigint);
    }
}
