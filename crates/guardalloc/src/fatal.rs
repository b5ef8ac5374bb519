//! Fatal-path reporting.

use guardalloc_core::AllocFailure;

/// Prints the diagnostic for `failure` on stderr and terminates the process.
///
/// The abort is unconditional; callers never observe a return, so no
/// recoverable error ever crosses the public API.
pub(crate) fn die(failure: AllocFailure) -> ! {
    eprintln!("{failure}");
    std::process::abort()
}
