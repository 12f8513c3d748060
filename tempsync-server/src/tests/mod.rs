
pub use mock_source::MockSensorSource;

use serde_json::{Value, json};
use time::OffsetDateTime;
use time::macros::format_description;

/// Raw device object shaped like a `sensors/all` item.
pub fn sample_sensor(sensor_id: &str, mac_address: &str) -> Value {
    json!({
        "version": "0204",
        "sensor_id": sensor_id,
        "sensor_name": format!("Sensor {sensor_id}"),
        "sensor_mac_addr": mac_address,
        "type": "DHT",
        "send_interval": "1800",
        "last_temp": 21.4,
        "last_humidity": 48.2,
        "battery_pct": 87,
        "wifi_connect_time": 1,
        "next_checkin": "2022-05-12 19:39:41",
        "offline": "0",
        "last_tcTemp": "n",
    })
}

pub fn sample_sensor_with_probe(sensor_id: &str, mac_address: &str, probe_temp: f64) -> Value {
    let mut sensor = sample_sensor(sensor_id, mac_address);
    sensor["last_tcTemp"] = json!(probe_temp.to_string());
    sensor["TC_TYPE"] = json!("K");
    sensor
}

/// Wraps `data` the way the TempStick API does.
pub fn envelope(data: Value) -> Value {
    json!({
        "type": "success",
        "message": "",
        "data": data,
    })
}

/// `next_checkin` as the API prints it.
pub fn format_checkin(at: OffsetDateTime) -> String {
    at.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .unwrap()
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_format_checkin_round_trips() {
        let at = datetime!(2022-05-12 09:05:01 UTC);
        let mut raw = sample_sensor("1", "AA:BB:CC:DD:EE:01");
        raw["next_checkin"] = json!(format_checkin(at));

        assert_eq!(raw["next_checkin"], json!("2022-05-12 09:05:01"));
        let reading = tempsync_api::models::SensorReading::from_value(&raw).unwrap();
        assert_eq!(reading.next_checkin_utc().unwrap(), at);
    }
}
