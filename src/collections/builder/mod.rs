//! A module containing [`StringBuilder`], a growable byte string with an exact, caller-visible
//! capacity.
//!
//! [`StringBuilder`] is also re-exported under the parent module.

mod builder;

pub use builder::*;
