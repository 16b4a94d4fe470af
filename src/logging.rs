//! Thin wrappers over the `log` facade. Without the `logging` feature every macro expands to
//! nothing, so the crate carries no logging dependency by default.
#![allow(unused_macros)]

macro_rules! debug {
    ($($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::debug!(target: "scratch_lib", $($arg)+);
    )
}

macro_rules! trace {
    ($($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::trace!(target: "scratch_lib", $($arg)+);
    )
}
