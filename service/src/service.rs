use std::fmt;
use std::sync::{Arc, Mutex};

use log::{debug, warn};
use placekit_alert::AlertPresenter;
use placekit_geocoding::{GeocodeError, Geocoder};
use placekit_location::{Coordinates, PositionOptions, PositionSource};
use placekit_permission::PermissionBackend;

use crate::{MapRegion, ServiceError, ServiceState};

/// Orchestrates permission, positioning, geocoding and alerts behind a
/// single state snapshot.
///
/// Overlapping calls to [`refresh_current_location`](Self::refresh_current_location)
/// and [`search_place`](Self::search_place) are allowed and race on the
/// shared `current_coordinates`/`current_address` fields; the last writer
/// wins. Operations are never queued, cancelled or retried.
pub struct LocationService {
    permissions: Arc<dyn PermissionBackend>,
    positions: Arc<dyn PositionSource>,
    geocoder: Arc<dyn Geocoder>,
    alerts: Arc<dyn AlertPresenter>,
    state: Mutex<ServiceState>,
    // Process-lifetime cache of the permission decision. Once resolved it is
    // never re-requested; a denial is sticky until restart.
    permission: Mutex<Option<bool>>,
}

impl fmt::Debug for LocationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationService")
            .field("state", &self.state)
            .field("permission", &self.permission)
            .finish_non_exhaustive()
    }
}

impl LocationService {
    /// Create a service from the four collaborator backends.
    pub fn new(
        permissions: Arc<dyn PermissionBackend>,
        positions: Arc<dyn PositionSource>,
        geocoder: Arc<dyn Geocoder>,
        alerts: Arc<dyn AlertPresenter>,
    ) -> Self {
        Self {
            permissions,
            positions,
            geocoder,
            alerts,
            state: Mutex::new(ServiceState::default()),
            permission: Mutex::new(None),
        }
    }

    /// Create a service wired to the host platform and the public Nominatim
    /// instance.
    ///
    /// # Errors
    /// Returns a [`GeocodeError`] if the geocoding HTTP client cannot be
    /// initialized.
    pub fn system(user_agent: impl Into<String>) -> Result<Self, GeocodeError> {
        Ok(Self::new(
            Arc::new(placekit_permission::SystemPermissions::new()),
            Arc::new(placekit_location::SystemPositionSource::new()),
            Arc::new(placekit_geocoding::Nominatim::new(user_agent)?),
            Arc::new(placekit_alert::SystemAlerts::new()),
        ))
    }

    /// A snapshot of the current service state.
    #[must_use]
    pub fn state(&self) -> ServiceState {
        self.with_state(|state| state.clone())
    }

    /// Replace the free-text search query consumed by
    /// [`search_place`](Self::search_place).
    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.with_state(|state| state.search_query = query);
    }

    /// The map region to display, centered on the current coordinates.
    #[must_use]
    pub fn map_region(&self) -> Option<MapRegion> {
        self.with_state(|state| state.map_region())
    }

    /// Resolve the device position and its address.
    ///
    /// The cached last-known coordinates are published immediately while the
    /// fresh fix is fetched; on success both the coordinates and the cache
    /// are updated, then the address is resolved. Failures surface as one
    /// fixed alert and leave the optimistic state in place.
    pub async fn refresh_current_location(&self) {
        if !self.ensure_permission().await {
            return;
        }

        self.with_state(|state| {
            state.is_fetching_location = true;
            // Optimistic display: show the cached fix while refreshing. The
            // address is not recomputed from the cache alone.
            if let Some(cached) = state.last_known_coordinates {
                state.current_coordinates = Some(cached);
            }
        });

        let outcome = self.fetch_and_resolve().await;
        self.with_state(|state| state.is_fetching_location = false);

        if let Err(error) = outcome {
            self.report(&error);
        }
    }

    /// Forward-geocode the current search query and publish the first
    /// candidate with its address.
    pub async fn search_place(&self) {
        // Trimming is only for the emptiness check; the provider receives
        // the query text as typed.
        let query = self.with_state(|state| state.search_query.clone());
        if query.trim().is_empty() {
            self.report(&ServiceError::EmptySearchQuery);
            return;
        }

        self.with_state(|state| state.is_searching = true);
        let outcome = self.resolve_query(&query).await;
        self.with_state(|state| state.is_searching = false);

        if let Err(error) = outcome {
            self.report(&error);
        }
    }

    /// Resolve the permission gate, requesting at most once per process.
    ///
    /// A cached denial still reports the denial alert but never re-prompts.
    async fn ensure_permission(&self) -> bool {
        let cached = *self.permission.lock().expect("poisoned permission cache");
        let granted = if let Some(granted) = cached {
            granted
        } else {
            let granted = match self.permissions.request_foreground().await {
                Ok(status) => status.is_granted(),
                Err(error) => {
                    warn!("permission request failed: {error}");
                    false
                }
            };
            *self.permission.lock().expect("poisoned permission cache") = Some(granted);
            granted
        };

        if !granted {
            self.report(&ServiceError::PermissionDenied);
        }
        granted
    }

    async fn fetch_and_resolve(&self) -> Result<(), ServiceError> {
        let position = self
            .positions
            .current_position(PositionOptions::default())
            .await
            .map_err(|error| ServiceError::LocationUnavailable(error.to_string()))?;

        let coordinates = position.coordinates;
        debug!(
            "position fix at {}, {}",
            coordinates.latitude, coordinates.longitude
        );
        self.with_state(|state| {
            state.current_coordinates = Some(coordinates);
            state.last_known_coordinates = Some(coordinates);
        });

        self.update_address(coordinates)
            .await
            .map_err(|error| ServiceError::LocationUnavailable(error.to_string()))
    }

    async fn resolve_query(&self, query: &str) -> Result<(), ServiceError> {
        let candidates = self
            .geocoder
            .forward(query)
            .await
            .map_err(|error| ServiceError::SearchProviderFailure(error.to_string()))?;

        let Some(first) = candidates.first().copied() else {
            return Err(ServiceError::NoSearchResults);
        };
        debug!(
            "search '{query}' resolved to {}, {}",
            first.latitude, first.longitude
        );
        self.with_state(|state| state.current_coordinates = Some(first));

        self.update_address(first)
            .await
            .map_err(|error| ServiceError::SearchProviderFailure(error.to_string()))
    }

    /// Reverse-geocode `coordinates` and publish the address. Finding no
    /// address leaves the previous one in place; only provider failures are
    /// errors.
    async fn update_address(&self, coordinates: Coordinates) -> Result<(), GeocodeError> {
        if let Some(address) = self.geocoder.reverse(coordinates).await? {
            self.with_state(|state| state.current_address = Some(address));
        }
        Ok(())
    }

    fn with_state<T>(&self, action: impl FnOnce(&mut ServiceState) -> T) -> T {
        let mut guard = self.state.lock().expect("poisoned service state");
        action(&mut guard)
    }

    fn report(&self, error: &ServiceError) {
        warn!("{error}");
        self.alerts.present(error.alert());
    }
}
