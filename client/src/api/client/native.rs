//! [Transport] backed by [reqwest].

use nameth::NamedEnumValues as _;
use nameth::nameth;

use super::HttpRequest;
use super::HttpResponse;
use super::Method;
use super::Transport;
use super::TransportError;
use super::ViperClient;
use crate::config::BackendConfig;

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, MakeHttpClientError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(MakeHttpClientError::Build)?;
        Ok(Self { client })
    }
}

impl ViperClient<ReqwestTransport> {
    pub fn native(config: BackendConfig) -> Result<Self, MakeHttpClientError> {
        Ok(Self::new(ReqwestTransport::new()?, config))
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;
        let method = match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
        };
        let mut builder = self.client.request(method, &url).timeout(timeout);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let response = builder.send().await.map_err(|error| {
            if error.is_builder() {
                TransportError::InvalidUrl {
                    url,
                    details: error.to_string(),
                }
            } else if error.is_timeout() {
                TransportError::Timeout { timeout }
            } else {
                TransportError::Network {
                    details: error.to_string(),
                }
            }
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|error| {
            if error.is_timeout() {
                TransportError::Timeout { timeout }
            } else {
                TransportError::ResponseBody {
                    details: error.to_string(),
                }
            }
        })?;
        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_owned(),
            body,
        })
    }
}

#[nameth]
#[derive(thiserror::Error, Debug)]
pub enum MakeHttpClientError {
    #[error("[{n}] {0}", n = self.name())]
    Build(reqwest::Error),
}
