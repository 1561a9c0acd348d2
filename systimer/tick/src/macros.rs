//! Diagnostic macros
//!
//! Route to `log` or `defmt` depending on the enabled feature. With neither
//! enabled the arguments are not evaluated.

macro_rules! diag_error {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        log::error!($($arg)+);
        #[cfg(feature = "defmt")]
        defmt::error!($($arg)+);
    }};
}

macro_rules! diag_info {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        log::info!($($arg)+);
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)+);
    }};
}

macro_rules! diag_trace {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        log::trace!($($arg)+);
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)+);
    }};
}
