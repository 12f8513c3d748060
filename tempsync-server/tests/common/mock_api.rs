use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use tempsync_server::tests::envelope;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub api_key: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Default)]
struct MockApiState {
    api_key: String,
    sensors: Vec<Value>,
    response: Option<(u16, String)>,
    requests: Vec<RecordedRequest>,
}

/// Fake TempStick cloud bound to an ephemeral local port.
pub struct MockApi {
    pub base_url: String,
    state: Arc<Mutex<MockApiState>>,
    handle: JoinHandle<()>,
}

impl MockApi {
    pub async fn start(api_key: &str, sensors: Vec<Value>) -> Self {
        let state = Arc::new(Mutex::new(MockApiState {
            api_key: api_key.into(),
            sensors,
            ..Default::default()
        }));

        let router = Router::new()
            .route("/api/v1/sensors/all", get(get_all))
            .route("/api/v1/sensor/:sensor_id", get(get_sensor))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{address}/api/v1/"),
            state,
            handle,
        }
    }

    /// Overrides every following response.
    pub fn respond_with(&self, status: u16, body: impl Into<String>) {
        self.state.lock().unwrap().response = Some((status, body.into()));
    }

    pub fn set_sensors(&self, sensors: Vec<Value>) {
        self.state.lock().unwrap().sensors = sensors;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn record(state: &mut MockApiState, path: String, headers: &HeaderMap) -> Option<Response> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let api_key = header("x-api-key");

    state.requests.push(RecordedRequest {
        path,
        api_key: api_key.clone(),
        content_type: header("content-type"),
    });

    if let Some((status, body)) = &state.response {
        let status = StatusCode::from_u16(*status).unwrap();
        return Some((status, body.clone()).into_response());
    }

    if api_key.as_deref() != Some(state.api_key.as_str()) {
        return Some((StatusCode::NOT_ACCEPTABLE, "Not Acceptable").into_response());
    }

    None
}

async fn get_all(
    State(state): State<Arc<Mutex<MockApiState>>>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(response) = record(&mut state, "sensors/all".into(), &headers) {
        return response;
    }

    Json(envelope(json!({ "items": state.sensors }))).into_response()
}

async fn get_sensor(
    State(state): State<Arc<Mutex<MockApiState>>>,
    Path(sensor_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(response) = record(&mut state, format!("sensor/{sensor_id}"), &headers) {
        return response;
    }

    match state
        .sensors
        .iter()
        .find(|s| s["sensor_id"].as_str() == Some(sensor_id.as_str()))
    {
        Some(sensor) => Json(envelope(sensor.clone())).into_response(),
        None => (StatusCode::NOT_FOUND, "Sensor not found").into_response(),
    }
}
