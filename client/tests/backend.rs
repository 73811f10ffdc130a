#![cfg(feature = "cli")]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Json;
use axum::Router;
use axum::extract::Query;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::routing::get;
use axum::routing::post;
use serde_json::Value;
use serde_json::json;
use viper_client::api::ErrorKind;
use viper_client::api::IsApiError as _;
use viper_client::api::client::ViperClient;
use viper_client::api::client::health::health;
use viper_client::api::client::native::ReqwestTransport;
use viper_client::api::client::reset::reset;
use viper_client::api::client::view::View;
use viper_client::api::client::view::view;
use viper_client::config::BackendConfig;
use viper_client::form::FormValues;
use viper_client::submit::OutputSink;
use viper_client::submit::submit;
use viper_client::tracing::test_utils::enable_tracing_for_tests;

/// Echoes spins back, along with the content type they were sent with.
async fn spin(headers: HeaderMap, body: String) -> Json<Value> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    Json(json!({"received": body, "content_type": content_type}))
}

async fn heatmap(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({"window": query.get("window")}))
}

async fn start_backend() -> Result<SocketAddr, Box<dyn std::error::Error>> {
    enable_tracing_for_tests();
    let router = Router::new()
        .route("/spin", post(spin))
        .route("/health", get(|| async { Json(json!({"ok": true})) }))
        .route("/reset", post(|| async { Json(json!({"ok": true})) }))
        .route(
            "/stats",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "stats are broken") }),
        )
        .route("/historico", get(|| async { "not json" }))
        .route("/heatmap/terminal", get(heatmap));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, router).await });
    Ok(address)
}

fn make_client(address: SocketAddr) -> Result<ViperClient<ReqwestTransport>, Box<dyn std::error::Error>> {
    Ok(ViperClient::native(BackendConfig::new(format!("http://{address}/")))?)
}

#[derive(Clone, Default)]
struct Recorded(Arc<Mutex<Vec<String>>>);

impl OutputSink for Recorded {
    fn show_result(&self, text: &str) {
        self.0.lock().unwrap().push(text.to_owned());
    }

    fn show_error(&self, message: &str) {
        self.0.lock().unwrap().push(format!("error: {message}"));
    }
}

#[tokio::test]
async fn spin_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let address = start_backend().await?;
    let client = make_client(address)?;
    let output = Recorded::default();

    let value = submit(&FormValues::new("7", "fast"), &client, &output).await?;
    assert_eq!(
        json!({
            "received": r#"{"numero":7,"modo":"fast"}"#,
            "content_type": "application/json",
        }),
        value
    );
    let shown = output.0.lock().unwrap().clone();
    assert_eq!(
        vec![
            "{\n  \"received\": \"{\\\"numero\\\":7,\\\"modo\\\":\\\"fast\\\"}\",\n  \"content_type\": \"application/json\"\n}"
        ],
        shown
    );
    Ok(())
}

#[tokio::test]
async fn health_and_reset() -> Result<(), Box<dyn std::error::Error>> {
    let address = start_backend().await?;
    let client = make_client(address)?;
    assert_eq!(json!({"ok": true}), health(&client).await?);
    assert_eq!(json!({"ok": true}), reset(&client).await?);
    Ok(())
}

#[tokio::test]
async fn heatmap_window() -> Result<(), Box<dyn std::error::Error>> {
    let address = start_backend().await?;
    let client = make_client(address)?;
    assert_eq!(
        json!({"window": "60"}),
        view(&client, View::HeatmapTerminal, Some(60)).await?
    );
    assert_eq!(
        json!({"window": null}),
        view(&client, View::HeatmapTerminal, None).await?
    );
    Ok(())
}

#[tokio::test]
async fn request_failed() -> Result<(), Box<dyn std::error::Error>> {
    let address = start_backend().await?;
    let client = make_client(address)?;
    let error = view(&client, View::Stats, None).await.unwrap_err();
    assert_eq!(ErrorKind::RequestFailed, error.kind());
    assert_eq!(Some("stats are broken"), error.response_body());
    Ok(())
}

#[tokio::test]
async fn invalid_response() -> Result<(), Box<dyn std::error::Error>> {
    let address = start_backend().await?;
    let client = make_client(address)?;
    let error = view(&client, View::Historico, None).await.unwrap_err();
    assert_eq!(ErrorKind::InvalidResponse, error.kind());
    Ok(())
}

#[tokio::test]
async fn backend_down() -> Result<(), Box<dyn std::error::Error>> {
    let address = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        listener.local_addr()?
    };
    let client = make_client(address)?;
    let output = Recorded::default();
    let error = submit(&FormValues::new("7", "fast"), &client, &output)
        .await
        .unwrap_err();
    assert_eq!(ErrorKind::Transport, error.kind());
    let shown = output.0.lock().unwrap().clone();
    assert_eq!(1, shown.len());
    assert!(shown[0].starts_with("error: Backend unreachable: "), "{shown:?}");
    Ok(())
}

#[tokio::test]
async fn invalid_url() -> Result<(), Box<dyn std::error::Error>> {
    let client = ViperClient::native(BackendConfig::new("not a url"))?;
    let error = health(&client).await.unwrap_err();
    assert_eq!(ErrorKind::Transport, error.kind());
    assert!(error.to_string().contains("[InvalidUrl]"), "{error}");
    Ok(())
}
