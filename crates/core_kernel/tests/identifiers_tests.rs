//! Unit tests for the Identifiers module
//!
//! Tests cover identifier creation, parsing, conversion, and display formatting.

use core_kernel::{BuildingId, MeterId};
use uuid::Uuid;

mod meter_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = MeterId::new();
        let id2 = MeterId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = MeterId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = MeterId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_display_format() {
        let uuid = Uuid::new_v4();
        let id = MeterId::from_uuid(uuid);
        assert_eq!(id.to_string(), format!("MTR-{}", uuid));
    }

    #[test]
    fn test_from_str_with_and_without_prefix() {
        let uuid = Uuid::new_v4();
        let with_prefix: MeterId = format!("MTR-{}", uuid).parse().unwrap();
        let bare: MeterId = uuid.to_string().parse().unwrap();
        assert_eq!(with_prefix, bare);
    }

    #[test]
    fn test_invalid_string_is_rejected() {
        assert!("MTR-not-a-uuid".parse::<MeterId>().is_err());
    }

    #[test]
    fn test_json_serialization_is_transparent() {
        let uuid = Uuid::new_v4();
        let id = MeterId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));

        let back: MeterId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

mod building_id_tests {
    use super::*;

    #[test]
    fn test_prefix() {
        assert_eq!(BuildingId::prefix(), "BLD");
    }

    #[test]
    fn test_same_uuid_in_different_id_types() {
        let uuid = Uuid::new_v4();
        let meter_id = MeterId::from_uuid(uuid);
        let building_id = BuildingId::from_uuid(uuid);

        assert_eq!(*meter_id.as_uuid(), *building_id.as_uuid());
        assert_ne!(meter_id.to_string(), building_id.to_string());
    }

    #[test]
    fn test_nil_uuid() {
        let id = BuildingId::from_uuid(Uuid::nil());
        assert!(id.as_uuid().is_nil());
    }
}
