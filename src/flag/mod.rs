//! Typed command-line flags.
//!
//! A [`Registry`] holds an ordered table of boolean, unsigned integer and string flags. Programs
//! register their flags up front, call [`Registry::parse`] once with their arguments, and then read
//! the resolved values back through the handles returned at registration.
//!
//! Nothing in this module exits the process except [`Registry::parse_or_exit`], which is meant to
//! be called from `main`. Everything else reports failures through the error types in this module.
//!
//! # Examples
//! ```
//! # use scratch_lib::flag::{ParseError, Registry};
//! let mut flags = Registry::new();
//! let count = flags.register_uint64("count", 1, "How many times").unwrap();
//! flags.set_uint64_range(count, 1, 10).unwrap();
//!
//! let err = flags.parse(["prog", "-count", "50"]).unwrap_err();
//! assert!(matches!(err, ParseError::OutOfRange(ref e) if e.min == 1 && e.max == 10));
//! ```

mod error;
mod flag;
mod help;
mod registry;
mod tests;

pub use error::*;
pub use flag::*;
pub use registry::{DEFAULT_PREFIX, FLAG_CAPACITY, Parsed, Registry};
