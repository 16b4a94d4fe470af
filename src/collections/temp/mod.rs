//! A module containing [`TempBuffer`], a fixed-capacity scratch arena, and its associated types.
//!
//! [`TempBuffer`] is also re-exported under the parent module.

mod error;
mod temp_buffer;

pub use error::*;
pub use temp_buffer::*;
