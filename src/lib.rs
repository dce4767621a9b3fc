//! # Placekit
//!
//! A cross-platform location kit for map-centric applications: foreground
//! permission gating, one-shot device positioning, forward/reverse geocoding,
//! and a stateful service that ties them together.
//!
//! ## Features
//!
//! Placekit is modular. Enable only the pieces you need:
//!
//! - `permission`: Foreground location permission handling.
//! - `location`: One-shot device positioning.
//! - `geocoding`: Forward and reverse geocoding (Nominatim backend included).
//! - `alert`: Modal acknowledgement alerts for user-facing errors.
//! - `service`: The `LocationService` orchestrator composing all of the above.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! placekit = { version = "0.1", features = ["service"] }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use placekit::service::LocationService;
//!
//! async fn recenter(service: &LocationService) {
//!     service.refresh_current_location().await;
//!     if let Some(coordinates) = service.state().current_coordinates {
//!         println!("at {}, {}", coordinates.latitude, coordinates.longitude);
//!     }
//! }
//! ```

#[cfg(feature = "alert")]
pub use placekit_alert as alert;

#[cfg(feature = "geocoding")]
pub use placekit_geocoding as geocoding;

#[cfg(feature = "location")]
pub use placekit_location as location;

#[cfg(feature = "permission")]
pub use placekit_permission as permission;

#[cfg(feature = "service")]
pub use placekit_service as service;
