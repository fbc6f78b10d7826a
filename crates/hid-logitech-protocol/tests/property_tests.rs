//! Property-based tests for the Logitech classic encoder.
//!
//! Uses proptest with 500 cases to verify invariants on:
//! - protocol resolution from vendor ids
//! - sub-byte field masking and nibble packing
//! - the overload contract of the dispatching builders
//! - slot nibble preservation across download and refresh

use proptest::prelude::*;
use roadfeel_hid_logitech_protocol::{
    Command, ConstantForce, DamperForce, FfbProtocol, ForceEffect, InvertBit, LOGITECH_VENDOR_ID,
    LedPattern, Nibble, ProtocolError, Slope3, SlotMask, SpringForce, TrapezoidForce,
    build_download_report, build_force_report, build_led_report, build_refresh_report,
    build_slot_report, pack_nibbles, unpack_nibbles,
};

const CLASSIC: FfbProtocol = FfbProtocol::LogitechClassic;

fn arb_effect() -> impl Strategy<Value = ForceEffect> {
    prop_oneof![
        any::<u8>().prop_map(|amplitude| ForceEffect::from(ConstantForce {
            enabled: true,
            amplitude,
            ..ConstantForce::default()
        })),
        (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(a, b, s, amp)| {
            ForceEffect::from(SpringForce {
                enabled: true,
                dead_start: a,
                dead_end: b,
                slope_left: Slope3::from_masked(s),
                slope_right: Slope3::from_masked(s >> 3),
                invert_left: InvertBit::from_masked(s >> 6),
                invert_right: InvertBit::from_masked(s >> 7),
                amplitude: amp,
                ..SpringForce::default()
            })
        }),
        any::<u8>().prop_map(|s| ForceEffect::from(DamperForce {
            enabled: true,
            slope_left: Slope3::from_masked(s),
            slope_right: Slope3::from_masked(s >> 3),
            invert_left: InvertBit::from_masked(s >> 6),
            invert_right: InvertBit::from_masked(s >> 7),
            ..DamperForce::default()
        })),
        (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>()).prop_map(
            |(hi, lo, t_max, t_min, steps)| ForceEffect::from(TrapezoidForce {
                enabled: true,
                amplitude_max: hi,
                amplitude_min: lo,
                t_at_max: t_max,
                t_at_min: t_min,
                slope_step_x: Nibble::from_masked(steps >> 4),
                slope_step_y: Nibble::from_masked(steps),
                ..TrapezoidForce::default()
            })
        ),
    ]
}

fn arb_slot_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::AutocenterOn),
        Just(Command::AutocenterOff),
        Just(Command::Play),
        Just(Command::Stop),
    ]
}

fn arb_force_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::AutocenterSet),
        Just(Command::Download),
        Just(Command::Refresh),
    ]
}

#[test]
fn test_vendor_resolves_to_classic() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(
        FfbProtocol::for_vendor(LOGITECH_VENDOR_ID),
        FfbProtocol::LogitechClassic
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any vendor other than Logitech must resolve to `Unsupported`.
    #[test]
    fn prop_foreign_vendor_unsupported(vendor in any::<u16>()) {
        prop_assume!(vendor != LOGITECH_VENDOR_ID);
        prop_assert_eq!(FfbProtocol::for_vendor(vendor), FfbProtocol::Unsupported);
    }

    #[test]
    fn prop_masked_fields_stay_in_range(value: u8) {
        prop_assert!(Slope3::from_masked(value).get() <= 7);
        prop_assert!(InvertBit::from_masked(value).get() <= 1);
        prop_assert!(Nibble::from_masked(value).get() <= 0x0F);
        prop_assert!(LedPattern::from_masked(value).get() <= 0x1F);
    }

    #[test]
    fn prop_masked_field_roundtrip(value: u8) {
        let slope = Slope3::from_masked(value);
        prop_assert_eq!(Slope3::new(slope.get()), Some(slope));
        let nibble = Nibble::from_masked(value);
        prop_assert_eq!(Nibble::new(nibble.get()), Some(nibble));
    }

    #[test]
    fn prop_nibble_pack_roundtrip(hi in 0u8..16, lo in 0u8..16) {
        prop_assert_eq!(unpack_nibbles(pack_nibbles(hi, lo)), (hi, lo));
    }

    #[test]
    fn prop_led_report_masked(pattern: u8) {
        let r = build_led_report(CLASSIC, LedPattern::from_masked(pattern))
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(r.as_bytes(), &[0xF8, 0x12, pattern & 0x1F, 0x00][..]);
    }

    /// Slot-only commands through the parameterized overload are rejected.
    #[test]
    fn prop_force_overload_excess(command in arb_slot_command(), effect in arb_effect()) {
        prop_assert_eq!(
            build_force_report(CLASSIC, command, &effect),
            Err(ProtocolError::ExcessParameters(command))
        );
    }

    /// Parameterized commands through the slot overload are rejected.
    #[test]
    fn prop_slot_overload_missing(command in arb_force_command(), bits in 0u8..16) {
        prop_assert_eq!(
            build_slot_report(CLASSIC, command, SlotMask::from_bits_truncate(bits)),
            Err(ProtocolError::MissingParameters(command))
        );
    }

    #[test]
    fn prop_download_slot_nibble_matches_effect(effect in arb_effect()) {
        let r = build_download_report(CLASSIC, &effect)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let byte0 = r.command_byte().ok_or_else(|| TestCaseError::fail("empty report"))?;
        prop_assert_eq!(byte0 >> 4, effect.slot().bits());
        prop_assert_eq!(r.len(), 7);
    }

    #[test]
    fn prop_refresh_is_download_with_opcode_c(effect in arb_effect()) {
        let download = build_download_report(CLASSIC, &effect)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let refresh = build_refresh_report(CLASSIC, &effect)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let (d, r) = (download.as_bytes(), refresh.as_bytes());
        prop_assert_eq!(r.len(), d.len());
        prop_assert_eq!(r.first().map(|b| b >> 4), d.first().map(|b| b >> 4));
        prop_assert_eq!(r.first().map(|b| b & 0x0F), Some(0x0C));
        prop_assert_eq!(r.get(1..), d.get(1..));
    }

    #[test]
    fn prop_hidpp_never_encodes(effect in arb_effect(), command in arb_force_command()) {
        let result = build_force_report(FfbProtocol::LogitechHidpp, command, &effect);
        prop_assert!(
            matches!(result, Err(ProtocolError::NotImplemented { .. })
                | Err(ProtocolError::MalformedCommand { .. })),
            "unexpected {:?}", result
        );
    }
}

#[test]
fn test_play_through_force_overload_is_excess() -> Result<(), Box<dyn std::error::Error>> {
    let effect = ForceEffect::from(ConstantForce::default());
    let err = build_force_report(CLASSIC, Command::Play, &effect)
        .err()
        .ok_or("PLAY with parameters must fail")?;
    assert_eq!(err, ProtocolError::ExcessParameters(Command::Play));
    Ok(())
}
