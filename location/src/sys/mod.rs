//! Platform-specific positioning implementations.

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
mod linux;

// Re-export platform implementations
#[cfg(target_os = "windows")]
pub(crate) use windows::current_position;

#[cfg(target_os = "linux")]
pub(crate) use linux::current_position;

// Fallback for unsupported platforms
#[cfg(not(any(target_os = "windows", target_os = "linux")))]
pub(crate) async fn current_position(
    _options: crate::PositionOptions,
) -> Result<crate::Position, crate::PositionError> {
    Err(crate::PositionError::Unavailable)
}
