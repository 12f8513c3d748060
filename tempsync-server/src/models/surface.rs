use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    AmbientTemperature,
    ProbeTemperature,
    Humidity,
}

impl SurfaceKind {
    pub fn characteristics(&self) -> &'static [CharacteristicKind] {
        match self {
            SurfaceKind::AmbientTemperature | SurfaceKind::ProbeTemperature => &[
                CharacteristicKind::CurrentTemperature,
                CharacteristicKind::StatusLowBattery,
                CharacteristicKind::StatusFault,
            ],
            SurfaceKind::Humidity => &[
                CharacteristicKind::CurrentRelativeHumidity,
                CharacteristicKind::StatusLowBattery,
                CharacteristicKind::StatusFault,
            ],
        }
    }

    pub fn supports(&self, characteristic: CharacteristicKind) -> bool {
        self.characteristics().contains(&characteristic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacteristicKind {
    CurrentTemperature,
    CurrentRelativeHumidity,
    StatusLowBattery,
    StatusFault,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharacteristicValue {
    Float(f64),
    Code(u8),
}

/// One sensor service exposed by an accessory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    pub kind: SurfaceKind,
    pub name: String,
}

impl Surface {
    pub fn ambient(display_name: &str) -> Self {
        Self {
            kind: SurfaceKind::AmbientTemperature,
            name: format!("{display_name} Ambient Temp Sensor"),
        }
    }

    pub fn probe(display_name: &str, probe_type: &str) -> Self {
        Self {
            kind: SurfaceKind::ProbeTemperature,
            name: format!("{display_name} {probe_type}-Probe Temp Sensor"),
        }
    }

    pub fn humidity(display_name: &str) -> Self {
        Self {
            kind: SurfaceKind::Humidity,
            name: format!("{display_name} Humidity Sensor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_names() {
        assert_eq!(Surface::ambient("Garage").name, "Garage Ambient Temp Sensor");
        assert_eq!(Surface::probe("Garage", "K").name, "Garage K-Probe Temp Sensor");
        assert_eq!(Surface::humidity("Garage").name, "Garage Humidity Sensor");
    }

    #[test]
    fn test_characteristics_per_surface() {
        assert!(SurfaceKind::Humidity.supports(CharacteristicKind::CurrentRelativeHumidity));
        assert!(!SurfaceKind::Humidity.supports(CharacteristicKind::CurrentTemperature));
        assert!(SurfaceKind::ProbeTemperature.supports(CharacteristicKind::StatusFault));
        assert!(!SurfaceKind::AmbientTemperature.supports(CharacteristicKind::CurrentRelativeHumidity));
    }

    #[test]
    fn test_path_names() {
        let kind: SurfaceKind = serde_json::from_str("\"probe_temperature\"").unwrap();
        assert_eq!(kind, SurfaceKind::ProbeTemperature);

        let value = serde_json::to_value(CharacteristicValue::Code(1)).unwrap();
        assert_eq!(value, serde_json::json!(1));
    }
}
