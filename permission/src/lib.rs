//! Foreground location permission handling.
//!
//! This crate provides a unified API for requesting foreground location
//! permission across Windows and Linux desktops, plus a dyn-safe backend
//! trait so services can be wired to scripted permissions in tests.

#![warn(missing_docs)]

use futures::future::BoxFuture;

/// Platform-specific implementations.
pub mod sys;

/// The current status of the foreground location permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionStatus {
    /// Permission has been granted by the user.
    Granted,
    /// Permission has been denied by the user.
    Denied,
    /// Permission is restricted by system policy.
    Restricted,
    /// Permission has not been requested yet.
    NotDetermined,
}

impl PermissionStatus {
    /// Whether this status allows location access.
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Errors that can occur when requesting permission.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PermissionError {
    /// Permission prompts are not supported on this platform.
    #[error("location permission not supported on this platform")]
    NotSupported,
    /// An underlying platform error occurred.
    #[error("platform error: {0}")]
    Platform(String),
}

/// A source of foreground location permission decisions.
///
/// Implemented by [`SystemPermissions`] for real platforms and by scripted
/// fakes in tests. The trait is dyn-safe; async methods return boxed futures.
pub trait PermissionBackend: Send + Sync {
    /// Request foreground location permission from the user.
    ///
    /// If the permission has already been resolved, platforms return the
    /// current status without showing a prompt.
    fn request_foreground(&self) -> BoxFuture<'_, Result<PermissionStatus, PermissionError>>;

    /// Check the current status without prompting.
    fn check(&self) -> BoxFuture<'_, PermissionStatus>;
}

/// Check the current foreground location permission status without prompting.
pub async fn check() -> PermissionStatus {
    sys::check().await
}

/// Request foreground location permission from the user.
///
/// # Errors
/// Returns a [`PermissionError`] if prompting is unsupported on this platform
/// or an underlying platform error occurs.
pub async fn request_foreground() -> Result<PermissionStatus, PermissionError> {
    sys::request_foreground().await
}

/// Permission backend backed by the host platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPermissions;

impl SystemPermissions {
    /// Create a new system-backed permission source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PermissionBackend for SystemPermissions {
    fn request_foreground(&self) -> BoxFuture<'_, Result<PermissionStatus, PermissionError>> {
        Box::pin(request_foreground())
    }

    fn check(&self) -> BoxFuture<'_, PermissionStatus> {
        Box::pin(check())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_granted_counts_as_granted() {
        assert!(PermissionStatus::Granted.is_granted());
        assert!(!PermissionStatus::Denied.is_granted());
        assert!(!PermissionStatus::Restricted.is_granted());
        assert!(!PermissionStatus::NotDetermined.is_granted());
    }
}
