use nameth::NamedEnumValues as _;
use nameth::nameth;
use serde::Serialize;
use serde_json::Value;
use tracing::Instrument as _;
use tracing::info_span;

use super::CallError;
use super::Method;
use super::Transport;
use super::ViperClient;
use super::call;
use crate::api::ErrorKind;
use crate::api::IsApiError;
use crate::numero::Numero;

/// The body of a spin: `{"numero": <number>, "modo": <string>}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpinRequest {
    pub numero: Numero,
    pub modo: String,
}

/// Posts a spin and returns whatever JSON the backend answers.
#[nameth]
pub async fn spin<T: Transport>(
    client: &ViperClient<T>,
    request: &SpinRequest,
) -> Result<Value, SpinError> {
    let data = serde_json::to_string(request).map_err(SpinError::SerializeRequest)?;
    let span = info_span!("Spin", numero = %request.numero, modo = %request.modo);
    Ok(call(client, Method::POST, SPIN, Some(data))
        .instrument(span)
        .await?)
}

#[nameth]
#[derive(thiserror::Error, Debug)]
pub enum SpinError {
    #[error("[{n}] {0}", n = self.name())]
    SerializeRequest(serde_json::Error),

    #[error("[{n}] {0}", n = self.name())]
    Call(#[from] CallError),
}

impl IsApiError for SpinError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::SerializeRequest { .. } => ErrorKind::InvalidInput,
            Self::Call(error) => error.kind(),
        }
    }

    fn response_body(&self) -> Option<&str> {
        match self {
            Self::SerializeRequest { .. } => None,
            Self::Call(error) => error.response_body(),
        }
    }
}
