use nameth::nameth;
use serde_json::Value;

use super::CallError;
use super::Method;
use super::Transport;
use super::ViperClient;
use super::call;

/// Clears the history and statistics the backend accumulated.
#[nameth]
pub async fn reset<T: Transport>(client: &ViperClient<T>) -> Result<Value, CallError> {
    call(client, Method::POST, RESET, None).await
}
