//! Fatal contract violations
//!
//! Misuse that would otherwise corrupt neighbouring state is not recoverable:
//! the call site is reported and execution stops. On the target the panic
//! handler halts and the watchdog resets the part.

use core::fmt;
use core::panic::Location;

use systimer_core::TickError;

/// A broken calling contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Arm or stop with an identifier outside the bank
    Timer(TickError),
    /// The tick handler was entered while already running
    NestedTick,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Timer(err) => write!(f, "{err}"),
            Violation::NestedTick => write!(f, "Tick handler re-entered"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Violation {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Violation::Timer(err) => defmt::write!(fmt, "{}", err),
            Violation::NestedTick => defmt::write!(fmt, "NestedTick"),
        }
    }
}

impl From<TickError> for Violation {
    fn from(value: TickError) -> Self {
        Self::Timer(value)
    }
}

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn halt(violation: Violation) -> ! {
    let caller = Location::caller();
    diag_error!(
        "Error: file {}, line {}: {}",
        caller.file(),
        caller.line(),
        violation
    );
    panic!("{} ({}:{})", violation, caller.file(), caller.line());
}
