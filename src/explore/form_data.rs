use std::path::Path;

use serde_json::{Map, Value};

use crate::client::{ClientRequest, ClientResponse, HttpClient, TransportError};
use crate::core::ExploreError;

/// Explore form data: an open mapping describing a chart query.
pub type FormData = Map<String, Value>;

/// Controls that only live in the UI and must never reach the backend.
pub const TEMPORARY_CONTROLS: &[&str] = &["url_params"];

pub const EXPLORE_JSON_ENDPOINT: &str = "/explore_json/";

pub fn sanitize_form_data(form_data: &FormData) -> FormData {
    form_data
        .iter()
        .filter(|(key, _)| !TEMPORARY_CONTROLS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Reads form data from a JSON file. The document must be an object.
pub async fn read_form_data(path: &Path) -> Result<FormData, ExploreError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ExploreError::IoError(format!("reading {}: {e}", path.display())))?;
    match serde_json::from_str(&text)? {
        Value::Object(form_data) => Ok(form_data),
        other => Err(ExploreError::InvalidPayload(format!(
            "form data in {} must be an object, got {other}",
            path.display()
        ))),
    }
}

fn form_data_request(form_data: &FormData, endpoint: Option<&str>) -> ClientRequest {
    let sanitized = sanitize_form_data(form_data);
    let fields = Map::from_iter([("form_data".to_string(), Value::Object(sanitized))]);
    ClientRequest::new(endpoint.unwrap_or(EXPLORE_JSON_ENDPOINT))
        .post_payload(fields)
        .stringify(false)
}

/// POSTs sanitized form data; transport errors are returned as-is.
pub async fn post_form_data<C: HttpClient + ?Sized>(
    client: &C,
    form_data: &FormData,
    endpoint: Option<&str>,
) -> Result<ClientResponse, TransportError> {
    client.post(form_data_request(form_data, endpoint)).await
}

/// PUTs sanitized form data; transport errors are returned as-is.
pub async fn put_form_data<C: HttpClient + ?Sized>(
    client: &C,
    form_data: &FormData,
    endpoint: Option<&str>,
) -> Result<ClientResponse, TransportError> {
    client.put(form_data_request(form_data, endpoint)).await
}
