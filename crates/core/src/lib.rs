//! free-the-wheel-core: wheel identification, vendor command tables, and mode switching.
//!
//! Logitech force-feedback wheels enumerate in a restricted compatibility mode
//! with a limited rotation range. This crate identifies supported wheels,
//! synthesizes the vendor reports that switch them into native mode, and sets
//! their rotation range.

pub mod command;
pub mod controller;
pub mod device;
pub mod error;
pub mod fleet;
pub mod identity;
pub mod range;
pub mod transport;

/// Logitech USB Vendor ID.
pub const LOGITECH_VID: u16 = 0x046D;

/// Known Logitech wheel product IDs.
pub mod pids {
    /// Any supported wheel in restricted (Driving Force EX compatible) mode.
    pub const WHEEL_RESTRICTED: u16 = 0xC294;
    /// G25 in native mode.
    pub const G25_NATIVE: u16 = 0xC299;
    /// G27 in native mode.
    pub const G27_NATIVE: u16 = 0xC29B;
    /// G29 in native mode.
    pub const G29_NATIVE: u16 = 0xC24F;
    /// Driving Force GT in native mode.
    pub const DFGT_NATIVE: u16 = 0xC29A;
    /// Driving Force Pro in native mode.
    pub const DFP_NATIVE: u16 = 0xC298;
    /// G920 in native mode.
    pub const G920_NATIVE: u16 = 0xC261;
}
