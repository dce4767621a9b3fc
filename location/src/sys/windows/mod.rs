//! Windows positioning implementation using the WinRT Geolocator.

use crate::{Accuracy, Coordinates, Position, PositionError, PositionOptions};

/// Milliseconds between the FILETIME epoch (1601-01-01) and the Unix epoch.
const FILETIME_UNIX_OFFSET_MS: u64 = 11_644_473_600_000;

/// Convert WinRT `DateTime.UniversalTime` (100-ns ticks since 1601-01-01)
/// to Unix epoch milliseconds.
#[allow(clippy::cast_sign_loss)]
const fn filetime_ticks_to_unix_ms(ticks: i64) -> u64 {
    if ticks <= 0 {
        return 0;
    }
    (ticks as u64 / 10_000).saturating_sub(FILETIME_UNIX_OFFSET_MS)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) async fn current_position(
    options: PositionOptions,
) -> Result<Position, PositionError> {
    use windows::Devices::Geolocation::{GeolocationAccessStatus, Geolocator, PositionAccuracy};

    // Request access (this also serves as the permission check on Windows).
    let access = Geolocator::RequestAccessAsync()
        .map_err(|e| PositionError::Backend(e.message().to_string()))?
        .get()
        .map_err(|e| PositionError::Backend(e.message().to_string()))?;

    match access {
        GeolocationAccessStatus::Denied => return Err(PositionError::PermissionDenied),
        GeolocationAccessStatus::Allowed => {}
        _ => return Err(PositionError::Unavailable),
    }

    let geolocator =
        Geolocator::new().map_err(|e| PositionError::Backend(e.message().to_string()))?;

    let accuracy = match options.accuracy {
        Accuracy::High | Accuracy::Highest => PositionAccuracy::High,
        _ => PositionAccuracy::Default,
    };
    geolocator
        .SetDesiredAccuracy(accuracy)
        .map_err(|e| PositionError::Backend(e.message().to_string()))?;
    geolocator
        .SetMovementThreshold(options.distance_interval_m)
        .map_err(|e| PositionError::Backend(e.message().to_string()))?;
    geolocator
        .SetReportInterval(options.time_interval.as_millis().min(u128::from(u32::MAX)) as u32)
        .map_err(|e| PositionError::Backend(e.message().to_string()))?;

    let geoposition = geolocator
        .GetGeopositionAsync()
        .map_err(|e| PositionError::Backend(e.message().to_string()))?
        .get()
        .map_err(|e| PositionError::Backend(e.message().to_string()))?;

    let coordinate = geoposition
        .Coordinate()
        .map_err(|e| PositionError::Backend(e.message().to_string()))?;
    let point = coordinate
        .Point()
        .map_err(|e| PositionError::Backend(e.message().to_string()))?;
    let basic = point
        .Position()
        .map_err(|e| PositionError::Backend(e.message().to_string()))?;

    let timestamp_ms = coordinate
        .Timestamp()
        .ok()
        .map_or(0, |t| filetime_ticks_to_unix_ms(t.UniversalTime));
    let horizontal_accuracy = coordinate.Accuracy().ok();

    Ok(Position {
        coordinates: Coordinates {
            latitude: basic.Latitude,
            longitude: basic.Longitude,
        },
        horizontal_accuracy,
        timestamp_ms,
    })
}
