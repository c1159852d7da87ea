//! HTTP access to the backend.
//!
//! [`HttpClient`] is the seam every request goes through; [`SupersetClient`]
//! implements it with `reqwest`. Failures surface as [`TransportError`] and
//! are normalized for callers by [`get_client_error_object`].

mod error;
mod request;
mod response;
mod superset;

use async_trait::async_trait;

pub use error::{ClientErrorObject, TransportError, get_client_error_object};
pub use request::{ClientRequest, Method, ParseMethod, Payload, RequestParams};
pub use response::ClientResponse;
pub use superset::SupersetClient;

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a request. Non-2xx responses are returned as
    /// [`TransportError::Status`].
    async fn request(&self, request: ClientRequest) -> Result<ClientResponse, TransportError>;

    async fn post(&self, mut request: ClientRequest) -> Result<ClientResponse, TransportError> {
        request.method = Method::Post;
        self.request(request).await
    }

    async fn put(&self, mut request: ClientRequest) -> Result<ClientResponse, TransportError> {
        request.method = Method::Put;
        self.request(request).await
    }
}
