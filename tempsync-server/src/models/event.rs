use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{CharacteristicKind, CharacteristicValue, SurfaceKind};

/// A characteristic value pushed to the display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicEvent {
    pub uuid: Uuid,
    pub surface: SurfaceKind,
    pub characteristic: CharacteristicKind,
    pub value: CharacteristicValue,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

impl CharacteristicEvent {
    pub fn new(
        uuid: Uuid,
        surface: SurfaceKind,
        characteristic: CharacteristicKind,
        value: CharacteristicValue,
    ) -> Self {
        Self {
            uuid,
            surface,
            characteristic,
            value,
            time: OffsetDateTime::now_utc(),
        }
    }
}
