//! Root privilege checks.

use super::ServiceError;

/// Returns true if the process runs with effective UID 0.
#[cfg(unix)]
#[must_use]
pub fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

/// Returns true if the process runs with effective UID 0.
#[cfg(not(unix))]
#[must_use]
pub const fn is_root() -> bool {
    false
}

/// Fails with [`ServiceError::NotRoot`] unless running as root.
///
/// # Errors
///
/// Returns [`ServiceError::NotRoot`] for unprivileged processes.
pub fn require_root() -> Result<(), ServiceError> {
    if is_root() {
        Ok(())
    } else {
        Err(ServiceError::NotRoot)
    }
}
