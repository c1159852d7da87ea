use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::conf::ClientConfig;
use crate::core::ExploreError;

use super::{ClientRequest, ClientResponse, HttpClient, Method, Payload, TransportError};

const CSRF_HEADER: &str = "X-CSRFToken";

/// [`HttpClient`] backed by `reqwest`, resolving endpoints against a base URL.
#[derive(Debug, Clone)]
pub struct SupersetClient {
    http: reqwest::Client,
    base_url: String,
}

impl SupersetClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ExploreError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            headers.insert(header_name(name)?, header_value(value)?);
        }
        if let Some(token) = &config.csrf_token {
            headers.insert(header_name(CSRF_HEADER)?, header_value(token)?);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ExploreError::ConfigParsingError(format!("building http client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute endpoints pass through untouched.
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
        }
    }
}

fn header_name(name: &str) -> Result<HeaderName, ExploreError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| ExploreError::ConfigParsingError(format!("header name '{name}': {e}")))
}

fn header_value(value: &str) -> Result<HeaderValue, ExploreError> {
    HeaderValue::from_str(value)
        .map_err(|e| ExploreError::ConfigParsingError(format!("header value: {e}")))
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl HttpClient for SupersetClient {
    async fn request(&self, request: ClientRequest) -> Result<ClientResponse, TransportError> {
        let url = self.url(request.target());
        let mut builder = self.http.request(request.method.into(), &url);

        for (name, value) in &request.params.headers {
            builder = builder.header(name, value);
        }
        if let Some(timeout) = request.params.timeout {
            builder = builder.timeout(timeout);
        }
        builder = match &request.payload {
            Some(Payload::Json(value)) => builder.json(value),
            Some(Payload::Form(fields)) => {
                builder.form(&Payload::form_fields(fields, request.stringify))
            }
            None => builder,
        };

        debug!(method = request.method.as_str(), url = url.as_str(); "sending request");
        let response = builder.send().await?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(); "received response");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                status_text,
                body,
            });
        }

        ClientResponse::decode(
            status.as_u16(),
            status_text,
            headers,
            body,
            request.effective_parse_method(),
        )
    }
}
