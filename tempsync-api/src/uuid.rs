use uuid::Uuid;

/// Namespace for accessory identities derived from sensor hardware addresses.
pub const ACCESSORY_NAMESPACE: Uuid = Uuid::from_bytes([
    0x5e, 0x0c, 0x7a, 0x41, 0x93, 0x2d, 0x4f, 0x6b, 0x8a, 0x10, 0x3c, 0x55, 0xd2, 0x7e, 0x19, 0xb4,
]);

/// Deterministic: the same MAC always yields the same accessory.
pub fn accessory_uuid(mac_address: &str) -> Uuid {
    Uuid::new_v5(&ACCESSORY_NAMESPACE, normalize_mac(mac_address).as_bytes())
}

/// Case and surrounding whitespace do not change device identity.
pub fn normalize_mac(mac_address: &str) -> String {
    mac_address.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_mac_same_uuid() {
        let uuid1 = accessory_uuid("AA:BB:CC:DD:EE:FF");
        let uuid2 = accessory_uuid("AA:BB:CC:DD:EE:FF");

        assert_eq!(uuid1, uuid2, "UUIDs should be stable across runs");
    }

    #[test]
    fn test_mac_is_normalized() {
        assert_eq!(
            accessory_uuid(" aa:bb:cc:dd:ee:ff "),
            accessory_uuid("AA:BB:CC:DD:EE:FF")
        );
    }

    #[test]
    fn test_different_mac_different_uuid() {
        assert_ne!(
            accessory_uuid("00:11:22:33:44:55"),
            accessory_uuid("00:11:22:33:44:56"),
            "UUIDs with different addresses should be different"
        );
    }

    #[test]
    fn test_uuid_version() {
        assert_eq!(accessory_uuid("00:11:22:33:44:55").get_version_num(), 5);
    }
}
