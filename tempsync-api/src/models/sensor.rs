use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::{ReadingError, Result};

/// Probe value reported when no thermocouple is attached.
pub const NO_PROBE: &str = "n";

/// One device object as returned by `sensors/all` or `sensor/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Opaque device identifier used by the single sensor endpoint
    pub id: String,
    /// User facing label
    pub name: String,
    /// Hardware address, source of the accessory identity
    pub mac_address: String,
    /// Ambient temperature in Celsius
    pub ambient_temp_c: f64,
    /// Relative humidity percentage
    pub humidity_pct: f64,
    /// Battery charge percentage
    pub battery_pct: f64,
    /// Reporting cadence of the device
    pub send_interval_secs: u64,
    /// Time the device needs to join Wi-Fi before reporting
    pub wifi_connect_time_secs: u64,
    /// Next wake time as sent by the API, UTC without zone designator
    pub next_checkin: String,
    /// Communication fault reported by the cloud
    pub offline: bool,
    /// Thermocouple temperature in Celsius, when a probe reports one
    pub probe_temp_c: Option<f64>,
    /// Thermocouple variant, naming only
    pub probe_type: Option<String>,
    /// Firmware version
    pub version: Option<String>,
    /// Hardware family
    pub sensor_type: Option<String>,
}

impl SensorReading {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let object = raw
            .as_object()
            .ok_or_else(|| ReadingError::Field("sensor payload is not an object".into()))?;

        Ok(Self {
            id: text(object, "sensor_id")?,
            name: optional_text(object, "sensor_name").unwrap_or_default(),
            mac_address: text(object, "sensor_mac_addr")?,
            ambient_temp_c: number(object, "last_temp")?,
            humidity_pct: number(object, "last_humidity")?,
            battery_pct: number(object, "battery_pct")?,
            send_interval_secs: seconds(object, "send_interval")?,
            wifi_connect_time_secs: match object.get("wifi_connect_time") {
                None | Some(Value::Null) => 0,
                Some(_) => seconds(object, "wifi_connect_time")?,
            },
            next_checkin: optional_text(object, "next_checkin").unwrap_or_default(),
            offline: offline_flag(object.get("offline"))?,
            probe_temp_c: probe_temperature(object.get("last_tcTemp"))?,
            probe_type: optional_text(object, "TC_TYPE").filter(|s| !s.is_empty()),
            version: optional_text(object, "version"),
            sensor_type: optional_text(object, "type"),
        })
    }

    pub fn has_probe(&self) -> bool {
        self.probe_temp_c.is_some()
    }

    pub fn send_interval(&self) -> Duration {
        Duration::from_secs(self.send_interval_secs)
    }

    pub fn wifi_connect_time(&self) -> Duration {
        Duration::from_secs(self.wifi_connect_time_secs)
    }

    /// The API omits the zone; the value is always UTC.
    pub fn next_checkin_utc(&self) -> Result<OffsetDateTime> {
        parse_checkin(&self.next_checkin)
    }
}

pub fn parse_checkin(raw: &str) -> Result<OffsetDateTime> {
    let mut value = raw.trim();
    for suffix in ["Z", " GMT", " UTC", "-00:00", "+00:00"] {
        value = value.strip_suffix(suffix).unwrap_or(value).trim_end();
    }
    let value = value.split('.').next().unwrap_or(value).replacen('T', " ", 1);

    PrimitiveDateTime::parse(
        &value,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .map(PrimitiveDateTime::assume_utc)
    .map_err(|e| ReadingError::Timestamp(format!("{raw:?} ({e})")))
}

fn text(object: &Map<String, Value>, key: &str) -> Result<String> {
    optional_text(object, key).ok_or_else(|| ReadingError::Field(format!("{key} is missing")))
}

fn optional_text(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(object: &Map<String, Value>, key: &str) -> Result<f64> {
    let parsed = match object.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| ReadingError::Field(format!("{key} is not a number: {:?}", object.get(key))))
}

fn seconds(object: &Map<String, Value>, key: &str) -> Result<u64> {
    let value = number(object, key)?;
    if value < 0.0 {
        return Err(ReadingError::Field(format!("{key} is negative: {value}")));
    }

    Ok(value.trunc() as u64)
}

fn offline_flag(raw: Option<&Value>) -> Result<bool> {
    match raw {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(|v| v != 0)
            .ok_or_else(|| ReadingError::Flag(n.to_string())),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(|v| v != 0)
            .map_err(|_| ReadingError::Flag(s.clone())),
        Some(other) => Err(ReadingError::Flag(other.to_string())),
    }
}

fn probe_temperature(raw: Option<&Value>) -> Result<Option<f64>> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed == NO_PROBE {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Some)
                .ok_or_else(|| ReadingError::Probe(s.clone()))
        }
        Some(other) => Err(ReadingError::Probe(other.to_string())),
    }
}
