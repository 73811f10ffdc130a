use std::future::Future;
use std::time::Duration;

use nameth::NamedEnumValues as _;
use nameth::nameth;
use serde_json::Value;
use tracing::debug;
use tracing::warn;

use super::ErrorKind;
use super::IsApiError;
use crate::config::BackendConfig;
use crate::latest::Latest;

#[cfg(feature = "client")]
pub mod fetch;
pub mod health;
#[cfg(test)]
pub(crate) mod mock;
#[cfg(feature = "native")]
pub mod native;
pub mod reset;
pub mod spin;
pub mod view;

pub const CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";

#[nameth]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Method {
    GET,
    POST,
}

/// A request, as handed over to the [Transport].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends [HttpRequest]s over the wire.
///
/// The returned future is not required to be `Send`: in the browser it is backed by a JS promise.
pub trait Transport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>>;
}

/// Client for the backend: a [Transport], where to send requests, and which submission is the latest.
pub struct ViperClient<T> {
    transport: T,
    config: BackendConfig,
    latest: Latest,
}

impl<T: Transport> ViperClient<T> {
    pub fn new(transport: T, config: BackendConfig) -> Self {
        Self {
            transport,
            config,
            latest: Latest::default(),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn latest(&self) -> &Latest {
        &self.latest
    }
}

async fn send_request<T: Transport>(
    client: &ViperClient<T>,
    method: Method,
    path: &str,
    body: Option<String>,
) -> Result<HttpResponse, SendRequestError> {
    let config = &client.config;
    let timeout = match method {
        Method::GET => config.read_timeout,
        Method::POST => config.write_timeout,
    };
    let headers = match body {
        Some(_) => vec![(CONTENT_TYPE, APPLICATION_JSON)],
        None => vec![],
    };
    let url = config.url(path);
    debug!("{} {url}", method.name());
    let response = client
        .transport
        .send(HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        })
        .await?;
    if !response.ok() {
        warn!("Request failed: {}", response.status);
        return Err(SendRequestError::RequestFailed {
            code: response.status,
            message: response.status_text,
            body: response.body,
        });
    }
    return Ok(response);
}

/// Sends a request and parses the response body as JSON.
async fn call<T: Transport>(
    client: &ViperClient<T>,
    method: Method,
    path: &str,
    body: Option<String>,
) -> Result<Value, CallError> {
    let response = send_request(client, method, path, body).await?;
    serde_json::from_str(&response.body).map_err(CallError::InvalidResponse)
}

#[nameth]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("[{n}] Invalid url='{url}': {details}", n = self.name())]
    InvalidUrl { url: String, details: String },

    #[error("[{n}] {details}", n = self.name())]
    Network { details: String },

    #[error("[{n}] No response after {timeout:?}", n = self.name())]
    Timeout { timeout: Duration },

    #[error("[{n}] Unexpected {details}", n = self.name())]
    UnexpectedResponseObject { details: String },

    #[error("[{n}] Failed to download the response body: {details}", n = self.name())]
    ResponseBody { details: String },
}

#[nameth]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SendRequestError {
    #[error("[{n}] {0}", n = self.name())]
    Transport(#[from] TransportError),

    #[error("[{n}][{code}] {message}", n = self.name())]
    RequestFailed {
        code: u16,
        message: String,
        body: String,
    },
}

impl IsApiError for SendRequestError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::RequestFailed { .. } => ErrorKind::RequestFailed,
        }
    }

    fn response_body(&self) -> Option<&str> {
        match self {
            Self::Transport { .. } => None,
            Self::RequestFailed { body, .. } => Some(body),
        }
    }
}

#[nameth]
#[derive(thiserror::Error, Debug)]
pub enum CallError {
    #[error("[{n}] {0}", n = self.name())]
    SendRequest(#[from] SendRequestError),

    #[error("[{n}] The response body is not valid JSON: {0}", n = self.name())]
    InvalidResponse(serde_json::Error),
}

impl IsApiError for CallError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::SendRequest(error) => error.kind(),
            Self::InvalidResponse { .. } => ErrorKind::InvalidResponse,
        }
    }

    fn response_body(&self) -> Option<&str> {
        match self {
            Self::SendRequest(error) => error.response_body(),
            Self::InvalidResponse { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::CallError;
    use super::HttpRequest;
    use super::Method;
    use super::SendRequestError;
    use super::TransportError;
    use super::ViperClient;
    use super::call;
    use crate::api::ErrorKind;
    use crate::api::IsApiError as _;
    use crate::api::client::mock::MockTransport;
    use crate::config::BackendConfig;

    #[tokio::test]
    async fn post_with_body() -> Result<(), CallError> {
        let client = ViperClient::new(
            MockTransport::default().json(200, r#"{"a":1}"#),
            BackendConfig::new("http://backend:8000/"),
        );
        let value = call(&client, Method::POST, "spin", Some("{}".into())).await?;
        assert_eq!(json!({"a": 1}), value);
        assert_eq!(
            vec![HttpRequest {
                method: Method::POST,
                url: "http://backend:8000/spin".into(),
                headers: vec![("content-type", "application/json")],
                body: Some("{}".into()),
                timeout: Duration::from_secs(7),
            }],
            client.transport().requests()
        );
        Ok(())
    }

    #[tokio::test]
    async fn get_without_body() -> Result<(), CallError> {
        let client = ViperClient::new(
            MockTransport::default().json(200, "[]"),
            BackendConfig::default(),
        );
        let value = call(&client, Method::GET, "historico", None).await?;
        assert_eq!(json!([]), value);
        let requests = client.transport().requests();
        let [request] = &requests[..] else {
            panic!("Expected a single request");
        };
        assert_eq!(Method::GET, request.method);
        assert!(request.headers.is_empty());
        assert_eq!(None, request.body);
        assert_eq!(Duration::from_secs(4), request.timeout);
        Ok(())
    }

    #[tokio::test]
    async fn request_failed() {
        let client = ViperClient::new(
            MockTransport::default().json(422, r#"{"detail":"numero"}"#),
            BackendConfig::default(),
        );
        let error = call(&client, Method::POST, "spin", Some("{}".into()))
            .await
            .unwrap_err();
        assert_eq!(ErrorKind::RequestFailed, error.kind());
        assert!(matches!(
            error,
            CallError::SendRequest(SendRequestError::RequestFailed { code: 422, ref body, .. })
                if body == r#"{"detail":"numero"}"#
        ));
        assert_eq!(
            "[SendRequest] [RequestFailed][422] Unprocessable Entity",
            error.to_string()
        );
    }

    #[tokio::test]
    async fn transport_failure() {
        let client = ViperClient::new(
            MockTransport::default().fail(TransportError::Network {
                details: "connection refused".into(),
            }),
            BackendConfig::default(),
        );
        let error = call(&client, Method::GET, "health", None).await.unwrap_err();
        assert_eq!(ErrorKind::Transport, error.kind());
        assert_eq!(
            "[SendRequest] [Transport] [Network] connection refused",
            error.to_string()
        );
    }

    #[tokio::test]
    async fn invalid_response() {
        let client = ViperClient::new(
            MockTransport::default().json(200, "<html>"),
            BackendConfig::default(),
        );
        let error = call(&client, Method::GET, "stats", None).await.unwrap_err();
        assert_eq!(ErrorKind::InvalidResponse, error.kind());
        assert!(matches!(error, CallError::InvalidResponse(_)));
    }
}
