//! Scratch-space collections for building strings.
//!
//! # Purpose
//! These types cover the short-lived string work that most small programs end up doing by hand:
//! formatting a path or a message into scratch memory, accumulating bytes before handing them to
//! something that wants a terminated string, and slicing text up without copying it.
//!
//! # Method
//! Every fallible operation returns a [`Result`] with a small, strongly typed error instead of
//! aborting, so the caller decides whether a full buffer is fatal. [`StringBuilder`] and
//! [`StringView`] implement [`Deref<Target = [u8]>`](std::ops::Deref) or
//! [`AsRef<[u8]>`](AsRef), which provides most of the read-only slice functionality for free.

pub mod builder;
pub mod temp;
pub mod view;

pub use builder::StringBuilder;
pub use temp::TempBuffer;
pub use view::StringView;
