//! Forward and reverse geocoding.
//!
//! Forward geocoding resolves free-text input to candidate coordinates;
//! reverse geocoding resolves coordinates to a human-readable address.
//! The [`Geocoder`] trait is the seam between orchestration code and the
//! provider; [`Nominatim`] is the bundled HTTP backend.

#![warn(missing_docs)]

use std::fmt;

use futures::future::BoxFuture;

pub use placekit_location::Coordinates;

mod nominatim;
pub use nominatim::Nominatim;

/// A human-readable address derived from reverse geocoding.
///
/// Fields the provider omits default to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    /// Street name, optionally with house number.
    pub street: String,
    /// City, town or village.
    pub city: String,
    /// State, province or other administrative region.
    pub region: String,
    /// Postal or ZIP code.
    pub postal_code: String,
    /// Country name.
    pub country: String,
}

impl Address {
    /// Join the non-empty address fields with `", "` for display.
    #[must_use]
    pub fn formatted(&self) -> String {
        [
            &self.street,
            &self.city,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

/// Errors that can occur when talking to a geocoding provider.
///
/// "Zero candidates found" is not an error; forward geocoding returns an
/// empty list and reverse geocoding returns `Ok(None)` in that case.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeocodeError {
    /// The request could not be built or sent.
    #[error("geocoding request failed: {0}")]
    Request(String),
    /// The provider answered with a non-success HTTP status.
    #[error("geocoding provider returned status {0}")]
    Provider(u16),
    /// The provider's response body could not be parsed.
    #[error("malformed geocoding response: {0}")]
    Malformed(String),
}

/// A geocoding provider.
///
/// The trait is dyn-safe; async methods return boxed futures.
pub trait Geocoder: Send + Sync {
    /// Resolve free-text input to zero or more candidate coordinates.
    fn forward(&self, query: &str) -> BoxFuture<'_, Result<Vec<Coordinates>, GeocodeError>>;

    /// Resolve coordinates to an address, or `None` when the provider has
    /// nothing for that spot.
    fn reverse(
        &self,
        coordinates: Coordinates,
    ) -> BoxFuture<'_, Result<Option<Address>, GeocodeError>>;
}
