//! Stateful location service.
//!
//! [`LocationService`] composes a permission backend, a position source, a
//! geocoder and an alert surface into the state a map screen consumes:
//! current coordinates, current address, in-flight flags and the search
//! query, with two user-invokable operations
//! ([`refresh_current_location`](LocationService::refresh_current_location)
//! and [`search_place`](LocationService::search_place)).

#![warn(missing_docs)]

mod error;
mod service;

pub use error::ServiceError;
pub use service::LocationService;

pub use placekit_alert::{Alert, AlertPresenter, SystemAlerts};
pub use placekit_geocoding::{Address, GeocodeError, Geocoder, Nominatim};
pub use placekit_location::{
    Accuracy, Coordinates, Position, PositionError, PositionOptions, PositionSource,
    SystemPositionSource,
};
pub use placekit_permission::{
    PermissionBackend, PermissionError, PermissionStatus, SystemPermissions,
};

/// Vertical map span shown around the current position (about 500 m).
pub const LATITUDE_DELTA: f64 = 0.005;
/// Horizontal map span shown around the current position (about 500 m).
pub const LONGITUDE_DELTA: f64 = 0.005;

/// Snapshot of the service's observable state.
///
/// `current_address`, when present, is the most recent successful reverse
/// geocode of `current_coordinates`. `last_known_coordinates` is a display
/// cache only: it is what a refresh publishes optimistically before the
/// fresh fix arrives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceState {
    /// Most recently resolved coordinates, from positioning or search.
    pub current_coordinates: Option<Coordinates>,
    /// Address for `current_coordinates`, when reverse geocoding found one.
    pub current_address: Option<Address>,
    /// Whether a location refresh is in flight.
    pub is_fetching_location: bool,
    /// Whether a place search is in flight.
    pub is_searching: bool,
    /// Free-text input for [`LocationService::search_place`].
    pub search_query: String,
    /// Coordinates from the last successful fix, kept across refreshes.
    pub last_known_coordinates: Option<Coordinates>,
}

impl ServiceState {
    /// The map region to display, centered on the current coordinates.
    #[must_use]
    pub fn map_region(&self) -> Option<MapRegion> {
        self.current_coordinates.map(|coordinates| MapRegion {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            latitude_delta: LATITUDE_DELTA,
            longitude_delta: LONGITUDE_DELTA,
        })
    }
}

/// A map viewport: center plus visible span in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    /// Center latitude in degrees.
    pub latitude: f64,
    /// Center longitude in degrees.
    pub longitude: f64,
    /// Visible latitude span in degrees.
    pub latitude_delta: f64,
    /// Visible longitude span in degrees.
    pub longitude_delta: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_empty() {
        let state = ServiceState::default();
        assert_eq!(state.current_coordinates, None);
        assert_eq!(state.current_address, None);
        assert!(!state.is_fetching_location);
        assert!(!state.is_searching);
        assert_eq!(state.search_query, "");
        assert_eq!(state.last_known_coordinates, None);
    }

    #[test]
    fn map_region_tracks_current_coordinates() {
        let mut state = ServiceState::default();
        assert_eq!(state.map_region(), None);

        state.current_coordinates = Some(Coordinates {
            latitude: 37.78825,
            longitude: -122.4324,
        });
        let region = state.map_region().unwrap();
        assert!((region.latitude - 37.78825).abs() < f64::EPSILON);
        assert!((region.latitude_delta - LATITUDE_DELTA).abs() < f64::EPSILON);
    }
}
