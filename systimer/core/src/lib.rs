#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # systimer core
//!
//! Core types shared by the tick subsystem: the error type, the tick source
//! configuration, the software timer slot and the bounded run-time arithmetic.
//! Nothing in this crate touches hardware or shared state; it is the pure
//! half of the design and can be exercised on any host.

use core::fmt;

pub mod config;
pub mod time;

pub use config::*;
pub use time::*;

/// systimer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the tick subsystem
pub type TickResult<T> = Result<T, TickError>;

/// Error types for tick subsystem operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickError {
    /// Timer identifier outside `[0, N)`
    InvalidTimerId,
    /// Tick rate is zero or faster than the counter clock
    InvalidTickRate,
    /// Computed reload does not fit the 24-bit down-counter
    ReloadOutOfRange,
    /// Counter clock is below 1 MHz, so microsecond delays cannot be timed
    CounterTooSlow,
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickError::InvalidTimerId => write!(f, "Timer identifier out of range"),
            TickError::InvalidTickRate => write!(f, "Invalid tick rate"),
            TickError::ReloadOutOfRange => write!(f, "Reload value exceeds the 24-bit counter"),
            TickError::CounterTooSlow => write!(f, "Counter clock too slow for microsecond timing"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TickError {}

#[cfg(feature = "defmt")]
impl defmt::Format for TickError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TickError::InvalidTimerId => defmt::write!(fmt, "InvalidTimerId"),
            TickError::InvalidTickRate => defmt::write!(fmt, "InvalidTickRate"),
            TickError::ReloadOutOfRange => defmt::write!(fmt, "ReloadOutOfRange"),
            TickError::CounterTooSlow => defmt::write!(fmt, "CounterTooSlow"),
        }
    }
}
