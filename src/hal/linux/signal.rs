//! SIGINT handling.
//!
//! The handler only stores to two atomics. Logging happens later, from the
//! loop, once the flag is observed.

use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use nix::libc::c_int;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

use crate::shutdown::ShutdownFlag;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);
static LAST_SIGNAL: AtomicI32 = AtomicI32::new(0);

extern "C" fn trap(signum: c_int) {
    LAST_SIGNAL.store(signum, Ordering::SeqCst);
    SHUTDOWN.store(true, Ordering::SeqCst);
}

/// Installs the SIGINT handler and returns the flag it sets.
///
/// `SA_RESTART` is set so an interrupted device read or sleep resumes
/// instead of failing; the loop notices the flag at the next cycle boundary.
pub fn install() -> nix::Result<ShutdownFlag<'static>> {
    let action = SigAction::new(
        SigHandler::Handler(trap),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    // SAFETY: `trap` only touches atomics, which is async-signal-safe.
    unsafe { sigaction(Signal::SIGINT, &action) }?;
    Ok(ShutdownFlag::new(&SHUTDOWN))
}

/// Number of the last signal trapped, if any.
pub fn last_signal() -> Option<i32> {
    match LAST_SIGNAL.load(Ordering::SeqCst) {
        0 => None,
        n => Some(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::signal::raise;

    #[test]
    fn sigint_sets_flag() {
        let flag = install().unwrap();
        raise(Signal::SIGINT).unwrap();

        assert!(flag.is_requested());
        assert_eq!(last_signal(), Some(Signal::SIGINT as i32));
    }
}
