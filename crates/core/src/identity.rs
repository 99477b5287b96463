//! Device identity resolution.
//!
//! A wheel is identified by a 32-bit key: the USB product ID in the upper
//! half, the vendor ID in the lower half. All supported wheels share one key
//! while in restricted mode, so the native target for a restricted wheel is
//! picked from its product string instead.

use crate::{pids, LOGITECH_VID};
use serde::Serialize;

/// Build the 32-bit resolver key from USB vendor and product IDs.
pub const fn device_key(vid: u16, pid: u16) -> u32 {
    ((pid as u32 & 0xFFFF) << 16) | (vid as u32 & 0xFFFF)
}

/// Physical operating mode a wheel is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceState {
    Restricted,
    Native,
}

impl DeviceState {
    /// Upper-case label used in the device listing.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Restricted => "RESTRICTED",
            Self::Native => "NATIVE",
        }
    }
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Known wheel identities, one per supported model and mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeviceIdentity {
    /// Any supported wheel still in restricted mode.
    RestrictedGeneric,
    NativeG25,
    NativeG27,
    NativeG29,
    NativeDfgt,
    NativeDfp,
    NativeG920,
    Unknown,
}

/// Resolver key table. Every identity except `Unknown` appears exactly once.
const KNOWN_KEYS: &[(u32, DeviceIdentity)] = &[
    (
        device_key(LOGITECH_VID, pids::WHEEL_RESTRICTED),
        DeviceIdentity::RestrictedGeneric,
    ),
    (
        device_key(LOGITECH_VID, pids::G25_NATIVE),
        DeviceIdentity::NativeG25,
    ),
    (
        device_key(LOGITECH_VID, pids::G27_NATIVE),
        DeviceIdentity::NativeG27,
    ),
    (
        device_key(LOGITECH_VID, pids::G29_NATIVE),
        DeviceIdentity::NativeG29,
    ),
    (
        device_key(LOGITECH_VID, pids::DFGT_NATIVE),
        DeviceIdentity::NativeDfgt,
    ),
    (
        device_key(LOGITECH_VID, pids::DFP_NATIVE),
        DeviceIdentity::NativeDfp,
    ),
    (
        device_key(LOGITECH_VID, pids::G920_NATIVE),
        DeviceIdentity::NativeG920,
    ),
];

/// Product-string prefixes for restricted wheels, in match priority order.
///
/// Matching is case-sensitive and anchored at offset 0; the first entry wins.
const NATIVE_TARGETS: &[(&str, DeviceIdentity)] = &[
    ("G25", DeviceIdentity::NativeG25),
    ("G27", DeviceIdentity::NativeG27),
    ("G29", DeviceIdentity::NativeG29),
    ("Driving Force GT", DeviceIdentity::NativeDfgt),
    ("Driving Force Pro", DeviceIdentity::NativeDfp),
    ("G920", DeviceIdentity::NativeG920),
];

impl DeviceIdentity {
    /// All identities, `Unknown` last.
    pub const ALL: &'static [DeviceIdentity] = &[
        DeviceIdentity::RestrictedGeneric,
        DeviceIdentity::NativeG25,
        DeviceIdentity::NativeG27,
        DeviceIdentity::NativeG29,
        DeviceIdentity::NativeDfgt,
        DeviceIdentity::NativeDfp,
        DeviceIdentity::NativeG920,
        DeviceIdentity::Unknown,
    ];

    /// Resolve a device from its USB vendor and product IDs.
    pub fn resolve(vid: u16, pid: u16) -> Self {
        Self::from_key(device_key(vid, pid))
    }

    /// Resolve a device from a prebuilt key.
    pub fn from_key(key: u32) -> Self {
        KNOWN_KEYS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, identity)| *identity)
            .unwrap_or(Self::Unknown)
    }

    /// Pick the native identity a restricted wheel switches into, by product string.
    ///
    /// Returns `Unknown` when no known model prefixes `product`.
    pub fn native_target(product: &str) -> Self {
        NATIVE_TARGETS
            .iter()
            .find(|(prefix, _)| product.starts_with(*prefix))
            .map(|(_, identity)| *identity)
            .unwrap_or(Self::Unknown)
    }

    /// Resolver key for this identity, `None` for `Unknown`.
    pub fn key(&self) -> Option<u32> {
        KNOWN_KEYS
            .iter()
            .find(|(_, identity)| identity == self)
            .map(|(key, _)| *key)
    }

    /// Current operating mode implied by this identity.
    pub fn state(&self) -> Option<DeviceState> {
        match self {
            Self::RestrictedGeneric => Some(DeviceState::Restricted),
            Self::Unknown => None,
            _ => Some(DeviceState::Native),
        }
    }

    pub fn is_native(&self) -> bool {
        self.state() == Some(DeviceState::Native)
    }

    pub fn is_known(&self) -> bool {
        *self != Self::Unknown
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RestrictedGeneric => "Logitech wheel (restricted mode)",
            Self::NativeG25 => "Logitech G25",
            Self::NativeG27 => "Logitech G27",
            Self::NativeG29 => "Logitech G29",
            Self::NativeDfgt => "Logitech Driving Force GT",
            Self::NativeDfp => "Logitech Driving Force Pro",
            Self::NativeG920 => "Logitech G920",
            Self::Unknown => "Unknown device",
        }
    }
}

impl std::fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
