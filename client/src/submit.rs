//! The submit handler: reads the form, posts the spin, and shows the outcome.

use nameth::NamedEnumValues as _;
use nameth::nameth;
use serde_json::Value;
use tracing::Instrument as _;
use tracing::debug;
use tracing::debug_span;

use crate::api::ErrorKind;
use crate::api::IsApiError;
use crate::api::client::Transport;
use crate::api::client::ViperClient;
use crate::api::client::spin::SpinError;
use crate::api::client::spin::spin;
use crate::form::FormError;
use crate::form::FormInput;
use crate::form::read_spin_request;

/// Where the outcome of a submission is displayed.
pub trait OutputSink {
    fn show_result(&self, text: &str);
    fn show_error(&self, message: &str);
}

/// Reads the form, posts the spin, and renders the response or the error into `output`.
///
/// Submissions may overlap. Only the one that started last renders: the outcome of a submission
/// that was superseded while in flight is returned but not shown.
pub async fn submit<F, T, O>(
    form: &F,
    client: &ViperClient<T>,
    output: &O,
) -> Result<Value, SubmitError>
where
    F: FormInput + ?Sized,
    T: Transport,
    O: OutputSink + ?Sized,
{
    let ticket = client.latest().ticket();
    async {
        let result = read_and_spin(form, client).await;
        if !ticket.is_latest() {
            debug!("Superseded by a later submission, not rendering");
            return result;
        }
        match &result {
            Ok(value) => output.show_result(&render_json(value)),
            Err(error) => output.show_error(&render_error(error)),
        }
        return result;
    }
    .instrument(debug_span!("Submit", ticket = ticket.id()))
    .await
}

async fn read_and_spin<F, T>(form: &F, client: &ViperClient<T>) -> Result<Value, SubmitError>
where
    F: FormInput + ?Sized,
    T: Transport,
{
    let request = read_spin_request(form)?;
    Ok(spin(client, &request).await?)
}

/// Pretty-prints JSON with a 2-space indent.
pub fn render_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// The message shown to the user when a call fails.
pub fn render_error(error: &impl IsApiError) -> String {
    let mut message = format!("{}: {error}", error.kind());
    if let Some(body) = error.response_body().filter(|body| !body.trim().is_empty()) {
        message.push('\n');
        message.push_str(body);
    }
    message
}

#[nameth]
#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("[{n}] {0}", n = self.name())]
    InvalidForm(#[from] FormError),

    #[error("[{n}] {0}", n = self.name())]
    Spin(#[from] SpinError),
}

impl IsApiError for SubmitError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidForm { .. } => ErrorKind::InvalidInput,
            Self::Spin(error) => error.kind(),
        }
    }

    fn response_body(&self) -> Option<&str> {
        match self {
            Self::InvalidForm { .. } => None,
            Self::Spin(error) => error.response_body(),
        }
    }
}
