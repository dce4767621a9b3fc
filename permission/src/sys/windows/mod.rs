//! Windows permission implementation using the WinRT Geolocator.
//!
//! `RequestAccessAsync` doubles as the permission prompt on Windows; the
//! first call shows the system consent dialog and later calls return the
//! stored decision.

use crate::{PermissionError, PermissionStatus};

pub(crate) async fn check() -> PermissionStatus {
    // WinRT has no prompt-free probe for the location consent state that is
    // reliable across versions; report NotDetermined and let callers request.
    PermissionStatus::NotDetermined
}

pub(crate) async fn request_foreground() -> Result<PermissionStatus, PermissionError> {
    use windows::Devices::Geolocation::{GeolocationAccessStatus, Geolocator};

    let access = Geolocator::RequestAccessAsync()
        .map_err(|e| PermissionError::Platform(e.message().to_string()))?
        .get()
        .map_err(|e| PermissionError::Platform(e.message().to_string()))?;

    Ok(match access {
        GeolocationAccessStatus::Allowed => PermissionStatus::Granted,
        GeolocationAccessStatus::Denied => PermissionStatus::Denied,
        _ => PermissionStatus::NotDetermined,
    })
}
