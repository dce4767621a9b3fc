//! Platform-specific permission implementations.

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
mod linux;

// Re-export platform implementations
#[cfg(target_os = "windows")]
pub(crate) use windows::{check, request_foreground};

#[cfg(target_os = "linux")]
pub(crate) use linux::{check, request_foreground};

// Fallback for unsupported platforms
#[cfg(not(any(target_os = "windows", target_os = "linux")))]
pub(crate) async fn check() -> crate::PermissionStatus {
    crate::PermissionStatus::NotDetermined
}

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
pub(crate) async fn request_foreground()
-> Result<crate::PermissionStatus, crate::PermissionError> {
    Err(crate::PermissionError::NotSupported)
}
