//! Linux permission implementation.
//!
//! Traditional Linux desktops have no runtime prompt for location access.
//! GeoClue authorizes applications through its agent when they connect to
//! the D-Bus service, so from the app's point of view the permission is
//! granted; a GeoClue refusal surfaces later as a positioning failure.

use crate::{PermissionError, PermissionStatus};

pub(crate) async fn check() -> PermissionStatus {
    PermissionStatus::Granted
}

pub(crate) async fn request_foreground() -> Result<PermissionStatus, PermissionError> {
    Ok(PermissionStatus::Granted)
}
