use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::errors::HapStatus;
use crate::models::{AccessorySnapshot, CharacteristicKind, SurfaceKind};
use crate::services::AccessoryService;

#[derive(Clone)]
pub struct AccessoryState {
    pub accessory_service: Arc<AccessoryService>,
}

pub fn accessory_router(accessory_state: AccessoryState) -> Router {
    Router::new()
        .route("/accessories", get(get_accessories))
        .route("/accessories/:uuid", get(get_accessory))
        .route(
            "/accessories/:uuid/:surface/:characteristic",
            get(read_characteristic),
        )
        .with_state(accessory_state)
}

pub async fn get_accessories(State(state): State<AccessoryState>) -> Json<Vec<AccessorySnapshot>> {
    Json(state.accessory_service.accessories().await)
}

pub async fn get_accessory(
    State(state): State<AccessoryState>,
    Path(uuid): Path<String>,
) -> Result<Json<AccessorySnapshot>, HapStatus> {
    let uuid = parse_uuid(&uuid)?;

    state
        .accessory_service
        .accessory(uuid)
        .await
        .map(|accessory| Json(accessory.snapshot()))
        .ok_or(HapStatus::ResourceDoesNotExist)
}

pub async fn read_characteristic(
    State(state): State<AccessoryState>,
    Path((uuid, surface, characteristic)): Path<(String, String, String)>,
) -> Result<Json<Value>, HapStatus> {
    let uuid = parse_uuid(&uuid)?;
    let surface: SurfaceKind = parse_segment(&surface)?;
    let characteristic: CharacteristicKind = parse_segment(&characteristic)?;

    let value = state
        .accessory_service
        .read(uuid, surface, characteristic)
        .await?;

    Ok(Json(json!({ "value": value })))
}

fn parse_uuid(raw: &str) -> Result<Uuid, HapStatus> {
    Uuid::parse_str(raw).map_err(|_| HapStatus::ResourceDoesNotExist)
}

/// Unknown names are missing resources rather than bad requests.
fn parse_segment<T: DeserializeOwned>(raw: &str) -> Result<T, HapStatus> {
    serde_json::from_value(Value::String(raw.to_string()))
        .map_err(|_| HapStatus::ResourceDoesNotExist)
}
