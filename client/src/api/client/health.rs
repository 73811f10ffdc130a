use nameth::nameth;
use serde_json::Value;

use super::CallError;
use super::Method;
use super::Transport;
use super::ViperClient;
use super::call;

/// Fetches the root document, which reports whether the engine is online.
pub async fn status<T: Transport>(client: &ViperClient<T>) -> Result<Value, CallError> {
    call(client, Method::GET, "", None).await
}

#[nameth]
pub async fn health<T: Transport>(client: &ViperClient<T>) -> Result<Value, CallError> {
    call(client, Method::GET, HEALTH, None).await
}
