//! One-shot device positioning.
//!
//! This crate provides a unified API for reading the device's current
//! position across Windows and Linux desktops. The [`PositionSource`] trait
//! is the seam between orchestration code and the platform: production code
//! uses [`SystemPositionSource`], tests script their own implementation.

#![warn(missing_docs)]

use std::time::Duration;

use futures::future::BoxFuture;

/// Platform-specific implementations.
pub mod sys;

pub use placekit_permission::{PermissionBackend, PermissionError, PermissionStatus};

/// A geographic coordinate pair in degrees.
///
/// Produced by device positioning or by forward geocoding; immutable value
/// type shared across the kit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,
}

/// A position fix with coordinates and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// The resolved coordinate pair.
    pub coordinates: Coordinates,
    /// Horizontal accuracy in meters, if the platform reports one.
    pub horizontal_accuracy: Option<f64>,
    /// Fix timestamp as Unix epoch milliseconds.
    pub timestamp_ms: u64,
}

/// Requested positioning accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accuracy {
    /// Country-level accuracy.
    Lowest,
    /// City-level accuracy.
    Low,
    /// Neighborhood-level accuracy; the default for map display.
    #[default]
    Balanced,
    /// Street-level accuracy.
    High,
    /// The best fix the hardware can produce.
    Highest,
}

/// Options for a one-shot position request.
///
/// The time and distance intervals are refresh hints passed through to the
/// platform; they bound how eagerly it re-reads sensors, not how long the
/// request is allowed to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    /// Requested accuracy level.
    pub accuracy: Accuracy,
    /// Minimum time between platform-side position refreshes.
    pub time_interval: Duration,
    /// Minimum movement in meters before the platform refreshes.
    pub distance_interval_m: f64,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::Balanced,
            time_interval: Duration::from_secs(5),
            distance_interval_m: 10.0,
        }
    }
}

/// Errors that can occur when reading the position.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PositionError {
    /// Location permission was not granted.
    #[error("location permission denied")]
    PermissionDenied,
    /// Location services are disabled on the device.
    #[error("location services disabled")]
    ServiceDisabled,
    /// The position request timed out.
    #[error("position request timed out")]
    Timeout,
    /// No position is available.
    #[error("position not available")]
    Unavailable,
    /// An underlying platform error occurred.
    #[error("platform error: {0}")]
    Backend(String),
}

/// A source of one-shot position fixes.
///
/// The trait is dyn-safe; async methods return boxed futures.
pub trait PositionSource: Send + Sync {
    /// Read the current device position.
    fn current_position(
        &self,
        options: PositionOptions,
    ) -> BoxFuture<'_, Result<Position, PositionError>>;
}

/// Read the current device position without checking permission.
///
/// Callers are expected to have resolved the foreground permission first.
///
/// # Errors
/// Returns a [`PositionError`] on timeout, sensor failure, or platform-level
/// rejection.
pub async fn current_position(options: PositionOptions) -> Result<Position, PositionError> {
    sys::current_position(options).await
}

/// Position source backed by the host platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPositionSource;

impl SystemPositionSource {
    /// Create a new system-backed position source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PositionSource for SystemPositionSource {
    fn current_position(
        &self,
        options: PositionOptions,
    ) -> BoxFuture<'_, Result<Position, PositionError>> {
        Box::pin(current_position(options))
    }
}
