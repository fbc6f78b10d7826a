//! Golden values for the Logitech identifiers the init sequence depends on.
//!
//! If any assertion fails, the wheel will not be switched into native mode.
//! Update `ids.rs` only after checking the device against a capture.

use roadfeel_hid_common::DeviceId;
use roadfeel_hid_logitech_protocol::{
    KNOWN_WHEEL_DEVICE_IDS, LOGITECH_VENDOR_ID, LogitechModel, device_ids, product_ids,
};

/// Logitech VID must be 0x046D (Logitech Inc.).
#[test]
fn vendor_id_is_046d() {
    assert_eq!(
        LOGITECH_VENDOR_ID, 0x046D,
        "Logitech VID changed; the protocol resolver keys on it"
    );
}

// ── Product IDs ──────────────────────────────────────────────────────────────

#[test]
fn g29_ps_pid_is_c24f() {
    assert_eq!(product_ids::G29_PS, 0xC24F);
}

#[test]
fn g923_native_pid_is_c266() {
    assert_eq!(product_ids::G923, 0xC266);
}

// ── Packed device ids (product << 16 | vendor) ───────────────────────────────

#[test]
fn g923_ps_device_id_is_c266046d() {
    assert_eq!(device_ids::G923_PS.raw(), 0xC266_046D);
}

#[test]
fn g29_ps4_device_id_is_c24f046d() {
    assert_eq!(device_ids::G29_PS4.raw(), 0xC24F_046D);
}

#[test]
fn known_wheel_list_is_exactly_the_two_ps_wheels() {
    assert_eq!(
        KNOWN_WHEEL_DEVICE_IDS,
        [
            DeviceId::from_raw(0xC266_046D),
            DeviceId::from_raw(0xC24F_046D)
        ]
    );
}

#[test]
fn every_known_wheel_has_a_model() {
    for id in KNOWN_WHEEL_DEVICE_IDS {
        assert_ne!(LogitechModel::from_device_id(id), LogitechModel::Unknown, "{id}");
        assert_eq!(LogitechModel::from_device_id(id).max_rotation_deg(), 900);
    }
}
