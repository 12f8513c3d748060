use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Persisted hub record of a discovered device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedAccessory {
    pub uuid: Uuid,
    pub display_name: String,
    /// Last raw device payload written by discovery
    pub context: Value,
}

impl CachedAccessory {
    pub fn new(uuid: Uuid, display_name: impl Into<String>, context: Value) -> Self {
        Self {
            uuid,
            display_name: display_name.into(),
            context,
        }
    }
}
