//! Error types for free-the-wheel-core.

use thiserror::Error;

/// Core library error type.
///
/// Unsupported devices are not errors: they resolve to
/// [`DeviceIdentity::Unknown`](crate::identity::DeviceIdentity::Unknown) and
/// produce no commands.
#[derive(Debug, Error)]
pub enum Error {
    /// HID enumeration, open, or report write failure.
    #[error("HID error: {0}")]
    Hid(String),

    /// Permission denied while opening a device (missing udev rule or not root).
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Value out of safe range.
    #[error("value out of range: {field} = {value} (allowed {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

impl Error {
    /// Build an open failure, promoting access errors to [`Error::PermissionDenied`].
    pub fn from_open_failure(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        let lower = msg.to_lowercase();
        if lower.contains("permission")
            || lower.contains("access denied")
            || lower.contains("access is denied")
            || lower.contains("operation not permitted")
        {
            Self::PermissionDenied(msg)
        } else {
            Self::Hid(msg)
        }
    }

    /// Whether this error indicates the operator lacks access to the device.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
