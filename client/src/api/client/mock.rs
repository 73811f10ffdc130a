//! A [Transport] replaying canned responses, and recording the requests it was sent.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::HttpRequest;
use super::HttpResponse;
use super::Transport;
use super::TransportError;

#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
}

impl MockTransport {
    pub fn json(self, status: u16, body: &str) -> Self {
        let status_text = match status {
            200 => "OK",
            404 => "Not Found",
            422 => "Unprocessable Entity",
            500 => "Internal Server Error",
            _ => "",
        };
        self.respond(Ok(HttpResponse {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }))
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.respond(Err(error))
    }

    fn respond(self, response: Result<HttpResponse, TransportError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The bodies of the requests sent so far.
    pub fn bodies(&self) -> Vec<Option<String>> {
        self.requests()
            .into_iter()
            .map(|request| request.body)
            .collect()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Network {
                    details: "No more mocked responses".into(),
                })
            })
    }
}
