//! HID transport abstraction for wheel communication.
//!
//! Provides a trait-based transport layer so that real HID devices and
//! mock devices share the same interface. Closing a device is dropping its
//! handle, so release happens on every exit path.

use crate::command::{CommandSequence, Report};
use crate::device::DeviceInfo;
use crate::error::Result;
use tracing::{trace, warn};

/// An exclusively opened wheel that accepts vendor reports.
pub trait WheelTransport {
    /// Write one 8-byte vendor report.
    fn write_report(&mut self, report: &Report) -> Result<()>;
}

/// Source of connected devices.
pub trait DeviceBus {
    type Device: WheelTransport;

    /// List every connected HID device.
    fn enumerate(&self) -> Result<Vec<DeviceInfo>>;

    /// Open a device for exclusive access.
    fn open(&self, info: &DeviceInfo) -> Result<Self::Device>;
}

/// Send every report in `commands`, stopping at the first failure.
pub fn send_commands(device: &mut dyn WheelTransport, commands: &CommandSequence) -> Result<()> {
    for (i, report) in commands.iter().enumerate() {
        trace!(
            index = i,
            report_hex = format_args!("{:02X?}", report),
            "Vendor report TX"
        );
        if let Err(e) = device.write_report(report) {
            warn!(
                index = i,
                remaining = commands.len() - i - 1,
                "Vendor report failed: {}",
                e
            );
            return Err(e);
        }
    }
    Ok(())
}
