//! Cancellation token for the sampling loop.
//!
//! A signal handler (or a test) sets the flag; the loop checks it once per
//! cycle, after the pause. Nothing in flight is interrupted.

use core::sync::atomic::{AtomicBool, Ordering};

/// Shared shutdown request flag.
///
/// Borrows an [`AtomicBool`] so the same flag can be a `static` written from
/// a signal handler or a local in a test.
///
/// # Example
///
/// ```rust
/// use core::sync::atomic::AtomicBool;
/// use tach_lcd::ShutdownFlag;
///
/// let raw = AtomicBool::new(false);
/// let flag = ShutdownFlag::new(&raw);
/// assert!(!flag.is_requested());
///
/// flag.request();
/// assert!(flag.is_requested());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ShutdownFlag<'a> {
    requested: &'a AtomicBool,
}

impl<'a> ShutdownFlag<'a> {
    /// Wraps an existing flag.
    pub const fn new(requested: &'a AtomicBool) -> Self {
        Self { requested }
    }

    /// Asks the loop to stop at the next cycle boundary.
    #[inline]
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Returns true once a stop has been requested.
    #[inline]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clear_when_flag_clear() {
        let raw = AtomicBool::new(false);
        assert!(!ShutdownFlag::new(&raw).is_requested());
    }

    #[test]
    fn copies_share_the_flag() {
        let raw = AtomicBool::new(false);
        let a = ShutdownFlag::new(&raw);
        let b = a;
        a.request();
        assert!(b.is_requested());
        assert!(raw.load(Ordering::SeqCst));
    }
}
