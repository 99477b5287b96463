//! Configure every connected wheel.

use crate::controller::{apply_mode, RequestedMode};
use crate::device::DeviceInfo;
use crate::error::Result;
use crate::identity::{device_key, DeviceIdentity, DeviceState};
use crate::range::WheelSettings;
use crate::transport::DeviceBus;
use serde::Serialize;
use tracing::debug;

/// Outcome for one supported wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceReport {
    pub vid: u16,
    pub pid: u16,
    pub key: u32,
    pub product: String,
    pub identity: DeviceIdentity,
    pub state: DeviceState,
    pub changed: bool,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetReport {
    pub mode: RequestedMode,
    /// Devices enumerated, supported or not.
    pub scanned: usize,
    /// Supported wheels, in enumeration order.
    pub wheels: Vec<DeviceReport>,
}

impl FleetReport {
    /// Whether any wheel changed.
    pub fn changed(&self) -> bool {
        self.wheels.iter().any(|w| w.changed)
    }
}

/// Resolve and configure every device on `bus`.
///
/// Only enumeration can fail; a failure on one device never stops the next.
pub fn configure_all<B: DeviceBus>(
    bus: &B,
    mode: RequestedMode,
    settings: &WheelSettings,
) -> Result<FleetReport> {
    let devices = bus.enumerate()?;
    let scanned = devices.len();
    let wheels = devices
        .iter()
        .filter_map(|info| configure_one(bus, info, mode, settings))
        .collect();

    let report = FleetReport {
        mode,
        scanned,
        wheels,
    };
    debug!(
        scanned,
        wheels = report.wheels.len(),
        changed = report.changed(),
        "Fleet run complete"
    );
    Ok(report)
}

fn configure_one<B: DeviceBus>(
    bus: &B,
    info: &DeviceInfo,
    mode: RequestedMode,
    settings: &WheelSettings,
) -> Option<DeviceReport> {
    let identity = DeviceIdentity::resolve(info.vid, info.pid);
    let state = identity.state()?;
    let changed = apply_mode(bus, info, identity, mode, settings);
    Some(DeviceReport {
        vid: info.vid,
        pid: info.pid,
        key: device_key(info.vid, info.pid),
        product: info.product.clone(),
        identity,
        state,
        changed,
    })
}
