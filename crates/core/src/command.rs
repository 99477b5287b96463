//! Vendor command synthesis for Logitech wheels.
//!
//! Every command is an 8-byte report. Most begin with the vendor report ID
//! `0xF8` followed by an opcode:
//! - `0x0A`: revert mode upon USB reset (first step of the G27+ native switch)
//! - `0x01`: switch to native mode (DFP) / partial button mapping (G27, G29)
//! - `0x09`: switch to a specific mode (DFGT)
//! - `0x10`: switch to native mode (G25)
//! - `0x81`: set rotation range (G25, G27, G29, DFGT)
//! - `0x61`: set rotation range (G920)
//! - `0x02` / `0x03`: select the 200 / 900 degree profile (DFP)
//!
//! The Driving Force Pro has no direct range command; its follow-up report
//! `[0x81, 0x0B, ..]` carries a ramp limiter that stiffens the wheel before it
//! reaches the physical stops.
//!
//! Synthesis is pure. `Unknown` and restricted identities yield an empty
//! sequence, never an error.

use crate::identity::DeviceIdentity;
use crate::range::WheelRange;

/// Length of every vendor report.
pub const REPORT_LEN: usize = 8;
/// Maximum commands in one sequence.
pub const MAX_COMMANDS: usize = 4;

/// Vendor report ID.
pub const VENDOR_REPORT_ID: u8 = 0xF8;

/// Opcodes carried in byte 1 of a vendor report.
pub mod opcodes {
    pub const REVERT_ON_RESET: u8 = 0x0A;
    pub const NATIVE_DFP: u8 = 0x01;
    /// Same opcode as [`NATIVE_DFP`]; on G27/G29 it selects partial button mapping.
    pub const PARTIAL_BUTTON_MAPPING: u8 = 0x01;
    pub const SWITCH_MODE: u8 = 0x09;
    pub const NATIVE_G25: u8 = 0x10;
    pub const SET_RANGE: u8 = 0x81;
    pub const SET_RANGE_G920: u8 = 0x61;
    pub const DFP_PROFILE_200: u8 = 0x02;
    pub const DFP_PROFILE_900: u8 = 0x03;
}

/// DFP ramp limiter report header (not prefixed by the vendor report ID).
const DFP_LIMITER_HEADER: [u8; 2] = [0x81, 0x0B];
/// DFP switches to its 900 degree profile above this range.
const DFP_NARROW_PROFILE_MAX: u16 = 200;
const DFP_WIDE_PROFILE_MAX: u16 = 900;

/// A single vendor report.
pub type Report = [u8; REPORT_LEN];

/// Ordered, bounded list of reports to transmit. Only the populated prefix
/// is ever exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandSequence {
    reports: [Report; MAX_COMMANDS],
    len: usize,
}

impl CommandSequence {
    pub const fn empty() -> Self {
        Self {
            reports: [[0; REPORT_LEN]; MAX_COMMANDS],
            len: 0,
        }
    }

    fn from_reports(reports: &[Report]) -> Self {
        let mut seq = Self::empty();
        for report in reports.iter().take(MAX_COMMANDS) {
            seq.reports[seq.len] = *report;
            seq.len += 1;
        }
        seq
    }

    pub fn as_slice(&self) -> &[Report] {
        &self.reports[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Report> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<'a> IntoIterator for &'a CommandSequence {
    type Item = &'a Report;
    type IntoIter = std::slice::Iter<'a, Report>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Build a report from its leading bytes, zero-filling the rest.
fn report(prefix: &[u8]) -> Report {
    let mut buf = [0u8; REPORT_LEN];
    for (dst, src) in buf.iter_mut().zip(prefix) {
        *dst = *src;
    }
    buf
}

/// Commands that switch a restricted wheel into `identity`'s native mode.
pub fn enable_native(identity: DeviceIdentity) -> CommandSequence {
    use opcodes::*;

    match identity {
        DeviceIdentity::NativeG25 => {
            CommandSequence::from_reports(&[report(&[VENDOR_REPORT_ID, NATIVE_G25])])
        }
        DeviceIdentity::NativeG27 | DeviceIdentity::NativeG29 => CommandSequence::from_reports(&[
            report(&[VENDOR_REPORT_ID, REVERT_ON_RESET]),
            report(&[VENDOR_REPORT_ID, PARTIAL_BUTTON_MAPPING]),
        ]),
        DeviceIdentity::NativeDfgt => CommandSequence::from_reports(&[
            report(&[VENDOR_REPORT_ID, REVERT_ON_RESET]),
            report(&[VENDOR_REPORT_ID, SWITCH_MODE, 0x03, 0x01]),
        ]),
        DeviceIdentity::NativeDfp => {
            CommandSequence::from_reports(&[report(&[VENDOR_REPORT_ID, NATIVE_DFP])])
        }
        DeviceIdentity::NativeG920 => {
            CommandSequence::from_reports(&[report(&[VENDOR_REPORT_ID, REVERT_ON_RESET])])
        }
        DeviceIdentity::RestrictedGeneric | DeviceIdentity::Unknown => CommandSequence::empty(),
    }
}

/// Commands that set `identity`'s rotation range.
pub fn set_range(identity: DeviceIdentity, range: WheelRange) -> CommandSequence {
    match identity {
        DeviceIdentity::NativeG25
        | DeviceIdentity::NativeG27
        | DeviceIdentity::NativeG29
        | DeviceIdentity::NativeDfgt => {
            CommandSequence::from_reports(&[linear_range(opcodes::SET_RANGE, range)])
        }
        DeviceIdentity::NativeG920 => {
            CommandSequence::from_reports(&[linear_range(opcodes::SET_RANGE_G920, range)])
        }
        DeviceIdentity::NativeDfp => {
            let (profile, limiter) = dfp_range(range);
            CommandSequence::from_reports(&[profile, limiter])
        }
        DeviceIdentity::RestrictedGeneric | DeviceIdentity::Unknown => CommandSequence::empty(),
    }
}

fn linear_range(opcode: u8, range: WheelRange) -> Report {
    let [lo, hi] = range.degrees().to_le_bytes();
    report(&[VENDOR_REPORT_ID, opcode, lo, hi])
}

/// Left and right ramp thresholds (12-bit) for the DFP limiter.
///
/// A range at or beyond the profile's full range (or an empty profile) gets
/// `(0, 0xFFF)`, the thresholds of an unlimited wheel.
fn dfp_ramp(full_range: u16, range: u16) -> (u16, u16) {
    let full = u32::from(full_range);
    let span = match full.checked_sub(u32::from(range)) {
        Some(span) if full > 0 => span,
        _ => return (0, 0xFFF),
    };
    let left = ((span + 1) * 2047) / full;
    let right = 0xFFF - left;
    (left as u16, right as u16)
}

fn dfp_range(range: WheelRange) -> (Report, Report) {
    let degrees = range.degrees();
    let (profile_op, full_range) = if degrees > DFP_NARROW_PROFILE_MAX {
        (opcodes::DFP_PROFILE_900, DFP_WIDE_PROFILE_MAX)
    } else {
        (opcodes::DFP_PROFILE_200, DFP_NARROW_PROFILE_MAX)
    };

    let profile = report(&[VENDOR_REPORT_ID, profile_op]);
    let mut limiter = report(&DFP_LIMITER_HEADER);

    if degrees < full_range {
        let (left, right) = dfp_ramp(full_range, degrees);
        limiter[2] = (left >> 4) as u8;
        limiter[3] = (right >> 4) as u8;
        limiter[4] = 0xFF;
        limiter[5] = (((right & 0xE) << 4) | (left & 0xE)) as u8;
        limiter[6] = 0xFF;
    }

    (profile, limiter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn range(deg: u16) -> WheelRange {
        WheelRange::new(deg).unwrap()
    }

    #[test]
    fn g25_native_is_single_command() {
        let seq = enable_native(DeviceIdentity::NativeG25);
        assert_eq!(seq.as_slice(), &[[0xF8, 0x10, 0, 0, 0, 0, 0, 0]]);
    }

    #[test]
    fn g27_and_g29_native_use_partial_button_mapping() {
        for identity in [DeviceIdentity::NativeG27, DeviceIdentity::NativeG29] {
            let seq = enable_native(identity);
            assert_eq!(
                seq.as_slice(),
                &[[0xF8, 0x0A, 0, 0, 0, 0, 0, 0], [0xF8, 0x01, 0, 0, 0, 0, 0, 0]]
            );
        }
    }

    #[test]
    fn dfgt_native_switches_mode() {
        let seq = enable_native(DeviceIdentity::NativeDfgt);
        assert_eq!(
            seq.as_slice(),
            &[[0xF8, 0x0A, 0, 0, 0, 0, 0, 0], [0xF8, 0x09, 0x03, 0x01, 0, 0, 0, 0]]
        );
    }

    #[test]
    fn dfp_and_g920_native() {
        assert_eq!(
            enable_native(DeviceIdentity::NativeDfp).as_slice(),
            &[[0xF8, 0x01, 0, 0, 0, 0, 0, 0]]
        );
        assert_eq!(
            enable_native(DeviceIdentity::NativeG920).as_slice(),
            &[[0xF8, 0x0A, 0, 0, 0, 0, 0, 0]]
        );
    }

    #[test]
    fn unsupported_identities_yield_nothing() {
        for identity in [DeviceIdentity::Unknown, DeviceIdentity::RestrictedGeneric] {
            assert!(enable_native(identity).is_empty());
            assert!(set_range(identity, WheelRange::MAX).is_empty());
        }
    }

    #[test]
    fn restricted_identity_has_no_synthesis_case() {
        // Restricted wheels are switched via their product-string target.
        assert!(enable_native(DeviceIdentity::RestrictedGeneric).is_empty());
        assert!(set_range(DeviceIdentity::RestrictedGeneric, WheelRange::STANDARD).is_empty());
        assert!(set_range(DeviceIdentity::RestrictedGeneric, WheelRange::MAX).is_empty());
    }

    #[test]
    fn dfp_ramp_outside_profile_is_unlimited() {
        assert_eq!(dfp_ramp(200, 900), (0, 0xFFF));
        assert_eq!(dfp_ramp(0, 0), (0, 0xFFF));
        assert_eq!(dfp_ramp(0, 100), (0, 0xFFF));
    }

    #[test]
    fn linear_range_900() {
        let seq = set_range(DeviceIdentity::NativeG25, range(900));
        assert_eq!(seq.as_slice(), &[[0xF8, 0x81, 0x84, 0x03, 0, 0, 0, 0]]);
    }

    #[test]
    fn linear_range_240_for_every_linear_model() {
        for identity in [
            DeviceIdentity::NativeG25,
            DeviceIdentity::NativeG27,
            DeviceIdentity::NativeG29,
            DeviceIdentity::NativeDfgt,
        ] {
            let seq = set_range(identity, WheelRange::STANDARD);
            assert_eq!(seq.as_slice(), &[[0xF8, 0x81, 0xF0, 0x00, 0, 0, 0, 0]]);
        }
    }

    #[test]
    fn g920_range_uses_own_opcode() {
        let seq = set_range(DeviceIdentity::NativeG920, range(900));
        assert_eq!(seq.as_slice(), &[[0xF8, 0x61, 0x84, 0x03, 0, 0, 0, 0]]);
    }

    #[test]
    fn dfp_200_is_unlimited_narrow_profile() {
        let seq = set_range(DeviceIdentity::NativeDfp, range(200));
        assert_eq!(
            seq.as_slice(),
            &[[0xF8, 0x02, 0, 0, 0, 0, 0, 0], [0x81, 0x0B, 0, 0, 0, 0, 0, 0]]
        );
    }

    #[test]
    fn dfp_900_is_unlimited_wide_profile() {
        let seq = set_range(DeviceIdentity::NativeDfp, range(900));
        assert_eq!(
            seq.as_slice(),
            &[[0xF8, 0x03, 0, 0, 0, 0, 0, 0], [0x81, 0x0B, 0, 0, 0, 0, 0, 0]]
        );
    }

    #[test]
    fn dfp_100_applies_limiter() {
        assert_eq!(dfp_ramp(200, 100), (1033, 2782));

        let seq = set_range(DeviceIdentity::NativeDfp, range(100));
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.as_slice()[0], [0xF8, 0x02, 0, 0, 0, 0, 0, 0]);
        // left 0x409, right 0xADE
        assert_eq!(
            seq.as_slice()[1],
            [0x81, 0x0B, 0x40, 0xAD, 0xFF, 0xE8, 0xFF, 0x00]
        );
    }

    #[test]
    fn dfp_240_limits_wide_profile() {
        assert_eq!(dfp_ramp(900, 240), (1503, 2592));

        let seq = set_range(DeviceIdentity::NativeDfp, WheelRange::STANDARD);
        assert_eq!(seq.as_slice()[0], [0xF8, 0x03, 0, 0, 0, 0, 0, 0]);
        // left 0x5DF, right 0xA20
        assert_eq!(
            seq.as_slice()[1],
            [0x81, 0x0B, 0x5D, 0xA2, 0xFF, 0x0E, 0xFF, 0x00]
        );
    }

    #[test]
    fn sequence_exposes_only_populated_prefix() {
        let seq = set_range(DeviceIdentity::NativeG27, WheelRange::MAX);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.iter().count(), 1);
        assert_eq!((&seq).into_iter().count(), 1);
    }

    #[test]
    fn every_native_identity_has_commands() {
        for identity in DeviceIdentity::ALL.iter().filter(|i| i.is_native()) {
            let native = enable_native(*identity);
            let ranged = set_range(*identity, WheelRange::MAX);
            assert!((1..=MAX_COMMANDS).contains(&native.len()), "{identity:?}");
            assert!((1..=MAX_COMMANDS).contains(&ranged.len()), "{identity:?}");
            assert!(native.iter().all(|r| r[0] == VENDOR_REPORT_ID));
        }
    }

    proptest! {
        #[test]
        fn set_range_stays_within_capacity(deg in 40u16..=900) {
            for identity in DeviceIdentity::ALL {
                let seq = set_range(*identity, WheelRange::new(deg).unwrap());
                prop_assert!(seq.len() <= MAX_COMMANDS);
                prop_assert_eq!(seq.is_empty(), !identity.is_native());
            }
        }

        #[test]
        fn linear_range_round_trips_degrees(deg in 40u16..=900) {
            let seq = set_range(DeviceIdentity::NativeG29, WheelRange::new(deg).unwrap());
            let r = seq.as_slice()[0];
            prop_assert_eq!(u16::from_le_bytes([r[2], r[3]]), deg);
            prop_assert_eq!(&r[4..], &[0u8; 4]);
        }

        #[test]
        fn dfp_ramp_thresholds_sum_to_full_scale(deg in 40u16..=900) {
            let full = if deg > 200 { 900 } else { 200 };
            let (left, right) = dfp_ramp(full, deg);
            prop_assert_eq!(u32::from(left) + u32::from(right), 0xFFF);
            prop_assert!(left < 2048);
        }
    }
}
