//! Mode transitions for a single wheel.
//!
//! A wheel's current mode is never tracked: it is read off its identity on
//! every call. Restricted wheels enumerate under one shared key, native
//! wheels under a per-model key.
//!
//! | current    | requested    | action                                          |
//! |------------|--------------|-------------------------------------------------|
//! | any        | `ReportOnly` | log identity, no I/O                            |
//! | restricted | `Restricted` | nothing                                         |
//! | native     | `Restricted` | set standard range (no reverse command exists)  |
//! | restricted | `FullRange`  | enable native for the product-string target, then set full range |
//! | native     | `FullRange`  | set full range                                  |

use crate::command::{self, CommandSequence};
use crate::device::DeviceInfo;
use crate::identity::{device_key, DeviceIdentity, DeviceState};
use crate::range::WheelSettings;
use crate::transport::{send_commands, DeviceBus};
use serde::Serialize;
use tracing::{debug, info, warn};

/// What the operator asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedMode {
    /// List wheels without touching them.
    ReportOnly,
    /// Return wheels to default behavior.
    Restricted,
    /// Native mode with the full rotation range.
    FullRange,
}

/// Drive one wheel toward `mode`. Returns whether the wheel was changed.
///
/// Opening and every write are best-effort: any failure leaves the wheel
/// reported as unchanged and the remaining commands unsent.
pub fn apply_mode<B: DeviceBus>(
    bus: &B,
    info: &DeviceInfo,
    identity: DeviceIdentity,
    mode: RequestedMode,
    settings: &WheelSettings,
) -> bool {
    let Some(state) = identity.state() else {
        return false;
    };
    let key = device_key(info.vid, info.pid);

    match (mode, state) {
        (RequestedMode::ReportOnly, _) => {
            info!(
                key = format_args!("0x{:08X}", key),
                product = %info.product,
                mode = state.label(),
                "Found wheel"
            );
            false
        }
        (RequestedMode::Restricted, DeviceState::Restricted) => {
            debug!(product = %info.product, "Wheel already restricted");
            false
        }
        (RequestedMode::Restricted, DeviceState::Native) => {
            let range = settings.standard_range;
            let changed = transition(bus, info, &[command::set_range(identity, range)]);
            if changed {
                info!(
                    model = identity.name(),
                    key = format_args!("0x{:08X}", key),
                    %range,
                    "Reset wheel to standard range"
                );
            }
            changed
        }
        (RequestedMode::FullRange, DeviceState::Restricted) => {
            let target = DeviceIdentity::native_target(&info.product);
            if !target.is_known() {
                debug!(product = %info.product, "No native target for restricted wheel");
                return false;
            }
            let range = settings.full_range;
            let changed = transition(
                bus,
                info,
                &[
                    command::enable_native(target),
                    command::set_range(target, range),
                ],
            );
            if changed {
                info!(
                    model = target.name(),
                    key = format_args!("0x{:08X}", key),
                    %range,
                    "Enabled native mode"
                );
            }
            changed
        }
        (RequestedMode::FullRange, DeviceState::Native) => {
            let range = settings.full_range;
            let changed = transition(bus, info, &[command::set_range(identity, range)]);
            if changed {
                info!(
                    model = identity.name(),
                    key = format_args!("0x{:08X}", key),
                    %range,
                    "Calibrated wheel range"
                );
            }
            changed
        }
    }
}

/// Open the wheel, send each sequence in order, close it.
fn transition<B: DeviceBus>(bus: &B, info: &DeviceInfo, sequences: &[CommandSequence]) -> bool {
    let mut device = match bus.open(info) {
        Ok(device) => device,
        Err(e) => {
            if e.is_permission_denied() {
                warn!(path = %info.path, "Cannot open wheel, check udev rules or run as root: {}", e);
            } else {
                warn!(path = %info.path, "Cannot open wheel: {}", e);
            }
            return false;
        }
    };

    for seq in sequences {
        if send_commands(&mut device, seq).is_err() {
            return false;
        }
    }
    true
}
