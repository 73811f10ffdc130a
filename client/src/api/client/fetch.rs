//! [Transport] backed by the browser's `fetch`.

use nameth::NamedEnumValues as _;
use tracing::debug;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::AbortSignal;
use web_sys::DomException;
use web_sys::Headers;
use web_sys::Request;
use web_sys::RequestInit;
use web_sys::RequestMode;
use web_sys::Response;

use super::HttpRequest;
use super::HttpResponse;
use super::Transport;
use super::TransportError;

#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        let init = RequestInit::new();
        init.set_method(method.name());
        // The backend is not served from the same origin as the page.
        init.set_mode(RequestMode::Cors);
        let fetch_headers = Headers::new().map_err(network_error)?;
        for (name, value) in headers {
            fetch_headers.set(name, value).map_err(network_error)?;
        }
        init.set_headers(fetch_headers.as_ref());
        if let Some(body) = body {
            init.set_body(&JsValue::from_str(&body));
        }
        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        init.set_signal(Some(&AbortSignal::timeout_with_u32(millis)));

        let request = Request::new_with_str_and_init(&url, &init);
        let request = request.map_err(|error| TransportError::InvalidUrl {
            url,
            details: details(error),
        })?;
        let window = web_sys::window().ok_or_else(|| TransportError::Network {
            details: "window is not available".into(),
        })?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|error| {
                let timed_out = error
                    .dyn_ref::<DomException>()
                    .is_some_and(|error| error.name() == "TimeoutError");
                if timed_out {
                    TransportError::Timeout { timeout }
                } else {
                    network_error(error)
                }
            })?;
        let response: Response =
            response
                .dyn_into()
                .map_err(|error| TransportError::UnexpectedResponseObject {
                    details: details(error),
                })?;
        debug!("Response status: {}", response.status());

        let text = response.text().map_err(response_body_error)?;
        let text = JsFuture::from(text).await.map_err(response_body_error)?;
        let body = text.as_string().ok_or_else(|| TransportError::ResponseBody {
            details: "The response body is not a valid UTF-8 string".into(),
        })?;
        Ok(HttpResponse {
            status: response.status(),
            status_text: response.status_text(),
            body,
        })
    }
}

fn details(error: JsValue) -> String {
    error.as_string().unwrap_or_else(|| format!("{error:?}"))
}

fn network_error(error: JsValue) -> TransportError {
    TransportError::Network {
        details: details(error),
    }
}

fn response_body_error(error: JsValue) -> TransportError {
    TransportError::ResponseBody {
        details: details(error),
    }
}
