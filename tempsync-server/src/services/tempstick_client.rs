use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tempsync_api::models::{Envelope, SensorList};

use crate::configs::TempStick;
use crate::errors::ApiError;

pub const SENSORS_PATH: &str = "sensors/all";

pub fn sensor_path(sensor_id: &str) -> String {
    format!("sensor/{sensor_id}")
}

/// Read access to TempStick devices.
#[async_trait]
pub trait SensorSource: Send + Sync {
    /// Raw device objects from the account listing
    async fn fetch_all(&self) -> Result<Vec<Value>, ApiError>;

    /// Raw device object of a single sensor
    async fn fetch_sensor(&self, sensor_id: &str) -> Result<Value, ApiError>;
}

#[derive(Clone)]
pub struct TempStickClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl TempStickClient {
    pub fn new(settings: &TempStick) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    /// GET `{api_url}{path}` and unwrap the envelope.
    pub async fn fetch_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.api_url, path);
        tracing::debug!("requesting {}", url);

        let response = self
            .http
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .header(CONTENT_TYPE, "text/plain")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        decode_response(status, &body)
    }
}

#[async_trait]
impl SensorSource for TempStickClient {
    async fn fetch_all(&self) -> Result<Vec<Value>, ApiError> {
        let data = self.fetch_json(SENSORS_PATH).await?;
        let list: SensorList = serde_json::from_value(data)
            .map_err(|e| ApiError::Transport(format!("unexpected sensor list: {e}")))?;

        Ok(list.items)
    }

    async fn fetch_sensor(&self, sensor_id: &str) -> Result<Value, ApiError> {
        self.fetch_json(&sensor_path(sensor_id)).await
    }
}

/// Classifies a TempStick response and returns the envelope `data` untouched.
pub fn decode_response(status: u16, body: &str) -> Result<Value, ApiError> {
    if status != 200 {
        return Err(ApiError::BadStatus {
            status,
            body: body.to_string(),
        });
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::Transport(format!("malformed response body: {e}")))?;

    // Valid JSON that is not an object has no `type` either.
    let envelope: Envelope = serde_json::from_value(value).unwrap_or_default();

    envelope
        .into_data()
        .map_err(|_| ApiError::Application(body.to_string()))
}
