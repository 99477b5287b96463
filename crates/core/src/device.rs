//! Device model: discovery and connection over hidapi.

use crate::command::{Report, REPORT_LEN};
use crate::error::{Error, Result};
use crate::transport::{DeviceBus, WheelTransport};
use std::ffi::CString;
use tracing::{debug, trace};

/// Information about an enumerated HID device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub vid: u16,
    pub pid: u16,
    /// Product string, empty when the device does not report one.
    pub product: String,
    /// Platform path used to reopen the device.
    pub path: String,
}

/// Device bus backed by the system HID API.
pub struct HidBus {
    api: hidapi::HidApi,
}

impl HidBus {
    pub fn new() -> Result<Self> {
        let api = hidapi::HidApi::new().map_err(|e| Error::Hid(e.to_string()))?;
        Ok(Self { api })
    }
}

impl DeviceBus for HidBus {
    type Device = HidWheel;

    fn enumerate(&self) -> Result<Vec<DeviceInfo>> {
        debug!("Starting HID device enumeration");
        let devices: Vec<DeviceInfo> = self
            .api
            .device_list()
            .map(|info| {
                trace!(
                    vid = format_args!("0x{:04X}", info.vendor_id()),
                    pid = format_args!("0x{:04X}", info.product_id()),
                    path = %info.path().to_string_lossy(),
                    "Found HID device"
                );
                DeviceInfo {
                    vid: info.vendor_id(),
                    pid: info.product_id(),
                    product: info.product_string().unwrap_or_default().to_string(),
                    path: info.path().to_string_lossy().into_owned(),
                }
            })
            .collect();

        debug!(count = devices.len(), "Device enumeration complete");
        Ok(devices)
    }

    fn open(&self, info: &DeviceInfo) -> Result<HidWheel> {
        let path = CString::new(info.path.as_str())
            .map_err(|e| Error::Hid(format!("invalid device path {:?}: {e}", info.path)))?;
        let device = self.api.open_path(&path).map_err(|e| {
            Error::from_open_failure(format!(
                "open HID device (VID=0x{:04X} PID=0x{:04X}): {e}",
                info.vid, info.pid
            ))
        })?;
        debug!(path = %info.path, "Opened device");
        Ok(HidWheel {
            device,
            path: info.path.clone(),
        })
    }
}

/// An opened wheel. Closed when dropped.
pub struct HidWheel {
    device: hidapi::HidDevice,
    path: String,
}

impl WheelTransport for HidWheel {
    fn write_report(&mut self, report: &Report) -> Result<()> {
        // Wheels use unnumbered reports; hidapi wants report ID 0 in front.
        let mut buf = [0u8; REPORT_LEN + 1];
        buf[1..].copy_from_slice(report);
        let n = self
            .device
            .write(&buf)
            .map_err(|e| Error::Hid(format!("write: {e}")))?;
        check_write_len(n, buf.len())
    }
}

/// Reject writes that did not cover the whole report (report ID included).
fn check_write_len(written: usize, expected: usize) -> Result<()> {
    if written < expected {
        return Err(Error::Hid(format!(
            "short write: {written} of {expected} bytes"
        )));
    }
    Ok(())
}

impl Drop for HidWheel {
    fn drop(&mut self) {
        debug!(path = %self.path, "Closed device");
    }
}
