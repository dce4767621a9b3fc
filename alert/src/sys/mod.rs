//! Platform-specific alert implementations.

#[cfg(not(any(target_os = "android", target_os = "ios")))]
mod desktop;

#[cfg(not(any(target_os = "android", target_os = "ios")))]
pub(crate) use desktop::present;

// Fallback for platforms without a native dialog binding yet.
#[cfg(any(target_os = "android", target_os = "ios"))]
pub(crate) fn present(alert: crate::Alert) {
    log::warn!("[{}] {} ({})", alert.title, alert.message, alert.button);
}
