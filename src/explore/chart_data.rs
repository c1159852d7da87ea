use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::{
    ClientErrorObject, ClientRequest, ClientResponse, HttpClient, RequestParams,
    get_client_error_object,
};

use super::FormData;

pub const CHART_DATA_ENDPOINT: &str = "/api/v1/chart/data";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartDataRequest {
    pub form_data: FormData,
    pub force: bool,
    pub request_params: RequestParams,
}

impl ChartDataRequest {
    pub fn new(form_data: FormData) -> Self {
        Self {
            form_data,
            ..Default::default()
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn request_params(mut self, params: RequestParams) -> Self {
        self.request_params = params;
        self
    }
}

/// Body sent to the chart data endpoint: a copy of the form data with
/// `force` set.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ChartDataPayload(FormData);

impl ChartDataPayload {
    pub fn new(form_data: &FormData, force: bool) -> Self {
        let mut payload = form_data.clone();
        payload.insert("force".to_string(), Value::Bool(force));
        Self(payload)
    }

    pub fn force(&self) -> bool {
        self.0.get("force").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn into_inner(self) -> FormData {
        self.0
    }
}

/// Decoded chart data response.
///
/// Object bodies are split into `result` and everything else. Any other
/// decoded body, including text and raw responses, is kept as is.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ChartDataBody {
    Structured {
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<Value>,
        #[serde(flatten)]
        rest: Map<String, Value>,
    },
    Other(Value),
}

impl ChartDataBody {
    pub fn result(&self) -> Option<&Value> {
        match self {
            ChartDataBody::Structured { result, .. } => result.as_ref(),
            ChartDataBody::Other(_) => None,
        }
    }
}

impl Default for ChartDataBody {
    fn default() -> Self {
        ChartDataBody::Structured {
            result: None,
            rest: Map::new(),
        }
    }
}

impl From<Value> for ChartDataBody {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut rest) => {
                let result = rest.shift_remove("result").filter(|v| !v.is_null());
                ChartDataBody::Structured { result, rest }
            }
            other => ChartDataBody::Other(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataResponse {
    pub json: ChartDataBody,
    pub response: ClientResponse,
}

/// POSTs a chart data query. Any failure, whether the server was unreachable
/// or answered with an error, comes back as a [`ClientErrorObject`].
pub async fn get_chart_data_request<C: HttpClient + ?Sized>(
    client: &C,
    request: ChartDataRequest,
) -> Result<ChartDataResponse, ClientErrorObject> {
    let payload = ChartDataPayload::new(&request.form_data, request.force);
    let client_request = ClientRequest::new(CHART_DATA_ENDPOINT)
        .json_payload(Value::Object(payload.into_inner()))
        .params(request.request_params);

    let response = client.post(client_request).await.map_err(|err| {
        let normalized = get_client_error_object(&err);
        warn!(error = normalized.error.as_str(); "chart data request failed: {err}");
        normalized
    })?;

    // Raw responses carry no decoded body.
    let json = ChartDataBody::from(response.json.clone().unwrap_or(Value::Null));
    Ok(ChartDataResponse { json, response })
}

/// Extracts the query results. Both API generations carry them under
/// `result`.
pub fn handle_chart_data_response(json: &ChartDataBody, use_legacy_api: bool) -> Option<&Value> {
    debug!(use_legacy_api = use_legacy_api; "handling chart data response");
    json.result()
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde_json::json;

    use super::*;
    use crate::client::{Method, ParseMethod, Payload, TransportError};
    use crate::testutil::RecordingClient;

    fn form_data() -> FormData {
        FormData::from_iter([
            ("viz_type".to_string(), json!("table")),
            ("datasource".to_string(), json!("1__table")),
        ])
    }

    #[test]
    fn test_payload_overrides_existing_force() {
        let mut input = form_data();
        input.insert("force".to_string(), json!(true));

        let payload = ChartDataPayload::new(&input, false);
        assert!(!payload.force());
        assert_eq!(input["force"], json!(true));
        assert_eq!(payload.into_inner().len(), 3);
    }

    #[test]
    fn test_payload_keeps_form_data_order() {
        let payload = ChartDataPayload::new(&form_data(), true);
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"viz_type":"table","datasource":"1__table","force":true}"#
        );
    }

    #[tokio::test]
    async fn test_posts_merged_payload() {
        let client = RecordingClient::responding(json!({"result": [{"rowcount": 2}]}));
        let request = ChartDataRequest::new(form_data())
            .force(true)
            .request_params(RequestParams::default().with_header("X-Dashboard", "3"));

        let response = get_chart_data_request(&client, request).await.unwrap();

        let sent = client.last_request().unwrap();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.endpoint, "/api/v1/chart/data");
        assert_eq!(sent.params.headers["X-Dashboard"], "3");
        assert_eq!(
            sent.payload,
            Some(Payload::Json(json!({
                "viz_type": "table",
                "datasource": "1__table",
                "force": true,
            })))
        );
        assert_eq!(response.json.result(), Some(&json!([{"rowcount": 2}])));
        assert_eq!(response.response.status, 200);
    }

    #[tokio::test]
    async fn test_status_error_is_normalized() {
        let client = RecordingClient::failing(TransportError::Status {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: Bytes::from_static(br#"{"message": "boom"}"#),
        });

        let err = get_chart_data_request(&client, ChartDataRequest::new(form_data()))
            .await
            .unwrap_err();
        assert_eq!(err.error, "boom");
        assert_eq!(err.status, Some(500));
    }

    #[tokio::test]
    async fn test_network_error_is_normalized() {
        let client = RecordingClient::failing(TransportError::Network("refused".to_string()));

        let err = get_chart_data_request(&client, ChartDataRequest::new(form_data()))
            .await
            .unwrap_err();
        assert_eq!(err.error, "Network error");
        assert_eq!(err.status, None);
    }

    #[tokio::test]
    async fn test_non_object_body_passes_through() {
        let client = RecordingClient::responding(json!([1, 2]));

        let response = get_chart_data_request(&client, ChartDataRequest::new(form_data()))
            .await
            .unwrap();
        assert_eq!(response.json, ChartDataBody::Other(json!([1, 2])));
        assert_eq!(response.response.json, Some(json!([1, 2])));
        assert_eq!(handle_chart_data_response(&response.json, false), None);
    }

    #[tokio::test]
    async fn test_text_body_passes_through() {
        let decoded = ClientResponse::decode(
            200,
            "OK".to_string(),
            Default::default(),
            Bytes::from_static(br#"{"result":[1]}"#),
            ParseMethod::Text,
        )
        .unwrap();
        let client = RecordingClient::with_response(decoded);

        let response = get_chart_data_request(&client, ChartDataRequest::new(form_data()))
            .await
            .unwrap();
        assert_eq!(response.json, ChartDataBody::Other(json!(r#"{"result":[1]}"#)));
    }

    #[tokio::test]
    async fn test_raw_body_has_no_result() {
        let decoded = ClientResponse::decode(
            200,
            "OK".to_string(),
            Default::default(),
            Bytes::from_static(b"\x00\x01"),
            ParseMethod::Raw,
        )
        .unwrap();
        let client = RecordingClient::with_response(decoded);

        let response = get_chart_data_request(&client, ChartDataRequest::new(form_data()))
            .await
            .unwrap();
        assert_eq!(response.json, ChartDataBody::Other(Value::Null));
        assert_eq!(response.response.body, Bytes::from_static(b"\x00\x01"));
    }

    #[test]
    fn test_handle_response_returns_result() {
        let body = ChartDataBody::from(json!({"result": [1, 2], "query_id": 7}));
        assert_eq!(handle_chart_data_response(&body, false), Some(&json!([1, 2])));
        assert_eq!(handle_chart_data_response(&body, true), Some(&json!([1, 2])));
        let ChartDataBody::Structured { rest, .. } = &body else {
            panic!("expected a structured body");
        };
        assert_eq!(rest["query_id"], json!(7));
        assert_eq!(handle_chart_data_response(&ChartDataBody::default(), false), None);
        assert_eq!(ChartDataBody::from(json!({"result": null})), ChartDataBody::default());
    }
}
