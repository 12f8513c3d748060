use serde::{Deserialize, Serialize};
use tempsync_api::models::{DisplayState, SensorReading};
use tokio::sync::watch;
use uuid::Uuid;

use super::{CharacteristicKind, CharacteristicValue, Surface, SurfaceKind};
use crate::errors::HapStatus;

pub const MANUFACTURER: &str = "Ideal Sciences, Inc.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryInfo {
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
}

impl AccessoryInfo {
    pub fn from_reading(reading: &SensorReading) -> Self {
        Self {
            manufacturer: MANUFACTURER.into(),
            model: format!(
                "TempStick-{}-{}",
                reading.sensor_type.as_deref().unwrap_or("unknown"),
                reading.version.as_deref().unwrap_or("unknown"),
            ),
            serial_number: reading.id.clone(),
        }
    }
}

/// Live accessory: the surfaces built at registration plus the current state.
///
/// The surfaces are fixed for the lifetime of the accessory. A probe plugged
/// in after registration stays hidden until the process restarts.
#[derive(Debug, Clone)]
pub struct Accessory {
    pub uuid: Uuid,
    pub display_name: String,
    pub sensor_id: String,
    pub info: AccessoryInfo,
    pub surfaces: Vec<Surface>,
    state: watch::Receiver<DisplayState>,
}

/// Serializable view of an [`Accessory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessorySnapshot {
    pub uuid: Uuid,
    pub display_name: String,
    pub info: AccessoryInfo,
    pub surfaces: Vec<Surface>,
    pub state: DisplayState,
}

impl Accessory {
    /// Returns the accessory together with the only sender allowed to replace its state.
    pub fn new(
        uuid: Uuid,
        display_name: &str,
        reading: &SensorReading,
    ) -> (Self, watch::Sender<DisplayState>) {
        let mut surfaces = vec![Surface::ambient(display_name)];
        if let (true, Some(probe_type)) = (reading.has_probe(), reading.probe_type.as_deref()) {
            surfaces.push(Surface::probe(display_name, probe_type));
        }
        surfaces.push(Surface::humidity(display_name));

        let probe_attached = surfaces
            .iter()
            .any(|s| s.kind == SurfaceKind::ProbeTemperature);
        let (sender, state) = watch::channel(DisplayState::from_reading(reading, probe_attached));

        let accessory = Self {
            uuid,
            display_name: display_name.into(),
            sensor_id: reading.id.clone(),
            info: AccessoryInfo::from_reading(reading),
            surfaces,
            state,
        };

        (accessory, sender)
    }

    pub fn has_probe(&self) -> bool {
        self.surface(SurfaceKind::ProbeTemperature).is_some()
    }

    pub fn surface(&self, kind: SurfaceKind) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.kind == kind)
    }

    pub fn state(&self) -> DisplayState {
        self.state.borrow().clone()
    }

    pub fn read(
        &self,
        surface: SurfaceKind,
        characteristic: CharacteristicKind,
    ) -> Result<CharacteristicValue, HapStatus> {
        if self.surface(surface).is_none() || !surface.supports(characteristic) {
            return Err(HapStatus::ResourceDoesNotExist);
        }

        let state = self.state.borrow();

        match (surface, characteristic) {
            (SurfaceKind::ProbeTemperature, CharacteristicKind::CurrentTemperature) => state
                .probe_temp
                .map(CharacteristicValue::Float)
                .ok_or(HapStatus::ResourceDoesNotExist),
            (_, CharacteristicKind::CurrentTemperature) => {
                Ok(CharacteristicValue::Float(state.ambient_temp))
            }
            (_, CharacteristicKind::CurrentRelativeHumidity) => {
                Ok(CharacteristicValue::Float(state.humidity))
            }
            (_, CharacteristicKind::StatusLowBattery) => {
                Ok(CharacteristicValue::Code(state.battery_level.code()))
            }
            (_, CharacteristicKind::StatusFault) if state.fault_status.is_fault() => {
                Err(HapStatus::ServiceCommunicationFailure)
            }
            (_, CharacteristicKind::StatusFault) => {
                Ok(CharacteristicValue::Code(state.fault_status.code()))
            }
        }
    }

    /// Values pushed after a poll: temperatures, humidity, then battery and fault on every surface.
    pub fn updates(
        &self,
        state: &DisplayState,
    ) -> Vec<(SurfaceKind, CharacteristicKind, CharacteristicValue)> {
        let mut updates = vec![(
            SurfaceKind::AmbientTemperature,
            CharacteristicKind::CurrentTemperature,
            CharacteristicValue::Float(state.ambient_temp),
        )];

        if let (true, Some(probe_temp)) = (self.has_probe(), state.probe_temp) {
            updates.push((
                SurfaceKind::ProbeTemperature,
                CharacteristicKind::CurrentTemperature,
                CharacteristicValue::Float(probe_temp),
            ));
        }

        updates.push((
            SurfaceKind::Humidity,
            CharacteristicKind::CurrentRelativeHumidity,
            CharacteristicValue::Float(state.humidity),
        ));

        for surface in &self.surfaces {
            updates.push((
                surface.kind,
                CharacteristicKind::StatusLowBattery,
                CharacteristicValue::Code(state.battery_level.code()),
            ));
            updates.push((
                surface.kind,
                CharacteristicKind::StatusFault,
                CharacteristicValue::Code(state.fault_status.code()),
            ));
        }

        updates
    }

    pub fn snapshot(&self) -> AccessorySnapshot {
        AccessorySnapshot {
            uuid: self.uuid,
            display_name: self.display_name.clone(),
            info: self.info.clone(),
            surfaces: self.surfaces.clone(),
            state: self.state(),
        }
    }
}
