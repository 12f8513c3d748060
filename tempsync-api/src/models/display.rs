use serde::{Deserialize, Serialize};

use super::SensorReading;

/// Battery percentage below which the low battery indicator is raised.
pub const LOW_BATTERY_THRESHOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatteryLevel {
    Normal,
    Low,
}

impl BatteryLevel {
    pub fn from_percentage(battery_pct: f64) -> Self {
        if battery_pct < LOW_BATTERY_THRESHOLD {
            Self::Low
        } else {
            Self::Normal
        }
    }

    /// Numeric code used by home automation displays.
    pub fn code(&self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Low => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaultStatus {
    NoFault,
    GeneralFault,
}

impl FaultStatus {
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::GeneralFault)
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::NoFault => 0,
            Self::GeneralFault => 1,
        }
    }
}

/// Values shown for one device, replaced wholesale after every successful poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Ambient temperature in Celsius
    pub ambient_temp: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    pub battery_level: BatteryLevel,
    pub fault_status: FaultStatus,
    /// Only set on devices registered with a probe surface
    pub probe_temp: Option<f64>,
}

impl DisplayState {
    pub fn from_reading(reading: &SensorReading, probe_attached: bool) -> Self {
        Self {
            ambient_temp: reading.ambient_temp_c,
            humidity: reading.humidity_pct,
            battery_level: BatteryLevel::from_percentage(reading.battery_pct),
            fault_status: if reading.offline {
                FaultStatus::GeneralFault
            } else {
                FaultStatus::NoFault
            },
            probe_temp: reading.probe_temp_c.filter(|_| probe_attached),
        }
    }
}
