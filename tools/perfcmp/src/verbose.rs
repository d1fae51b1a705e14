//! Verbose diagnostics for comparison runs.
//!
//! Report output on stdout must stay byte-exact, so every diagnostic goes to
//! stderr and only when `-v` is given.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Global verbosity flag, set once at startup.
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Initialize the verbosity level for the current process.
pub fn init(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

/// Returns `true` if verbose mode is active.
#[must_use]
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Print a diagnostic to stderr only when verbose mode is enabled.
///
/// Usage mirrors `eprintln!`:
/// ```ignore
/// veprintln!("loaded {} benchmarks", count);
/// ```
macro_rules! veprintln {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

pub(crate) use veprintln;

/// RAII timer that prints elapsed duration on drop when verbose mode is active.
///
/// ```ignore
/// let _t = Timer::start("loading results");
/// // ... work ...
/// // prints "  loading results: 1.2ms" on drop
/// ```
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Begin timing a labeled operation.
    #[must_use]
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if is_verbose() {
            let elapsed = self.start.elapsed();
            eprintln!("  {}: {:.1?}", self.label, elapsed);
        }
    }
}
