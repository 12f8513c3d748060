use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SUCCESS: &str = "success";

/// Outer wrapper returned by every TempStick API call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// `"success"` or an error kind; anything that is not the string
    /// `"success"` counts as an error
    #[serde(rename = "type", default)]
    pub kind: Value,
    /// Human readable status
    #[serde(default)]
    pub message: Value,
    /// Endpoint payload, left uninterpreted
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.kind.as_str() == Some(SUCCESS)
    }

    /// Hands back `data` for successful envelopes, the envelope itself otherwise.
    pub fn into_data(self) -> Result<Value, Envelope> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(self)
        }
    }
}

/// Payload of `sensors/all`. A payload without `items` is malformed, not empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorList {
    pub items: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_success_returns_data_unchanged() {
        let data = json!({"items": [{"sensor_id": "1"}], "nested": {"a": [1, 2, 3]}});
        let envelope: Envelope = serde_json::from_value(json!({
            "type": "success",
            "message": "get sensors",
            "data": data.clone(),
        }))
        .unwrap();

        assert_eq!(envelope.into_data().unwrap(), data);
    }

    #[test]
    fn test_other_type_is_rejected() {
        let envelope: Envelope = serde_json::from_value(json!({
            "type": "error",
            "message": "invalid api key",
        }))
        .unwrap();

        let rejected = envelope.into_data().unwrap_err();
        assert_eq!(rejected.kind, "error");
        assert_eq!(rejected.message, "invalid api key");
        assert_eq!(rejected.data, Value::Null);
    }

    #[test]
    fn test_missing_or_non_string_type_is_rejected() {
        for body in [
            json!({"message": "bad key", "data": null}),
            json!({"type": 0, "data": {"items": []}}),
            json!({"type": "SUCCESS"}),
        ] {
            let envelope: Envelope = serde_json::from_value(body).unwrap();
            assert!(envelope.into_data().is_err());
        }
    }

    #[test]
    fn test_sensor_list_requires_items() {
        assert!(serde_json::from_value::<SensorList>(json!({})).is_err());
        assert!(serde_json::from_value::<SensorList>(json!({"items": null})).is_err());

        let list: SensorList = serde_json::from_value(json!({"items": []})).unwrap();
        assert!(list.items.is_empty());
    }
}
