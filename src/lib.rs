//! This crate collects the small pieces of runtime support that command-line tools keep rewriting:
//! scratch memory for formatting, a growable byte string, borrowed string views and a typed flag
//! parser.
//!
//! # Purpose
//! Each piece is deliberately small. The goal is to be able to read and understand every line of
//! the support code a tool depends on, while still getting strong typing and proper error values
//! rather than the process-wide state and `exit()` calls that code like this tends to accumulate.
//!
//! # Method
//! - [`collections::temp`] is a fixed-capacity bump arena. Nothing is freed individually; the
//!   cursor is saved and rewound instead.
//! - [`collections::builder`] is an amortized-doubling byte string that can hand out a terminated
//!   view of itself.
//! - [`collections::view`] borrows bytes from either of the above (or anywhere else) and slices
//!   them without copying.
//! - [`flag`] is a registry of boolean, integer and string options, parsed once from the program's
//!   arguments.
//!
//! # Error Handling
//! When this crate employs errors via [`Result`]s, it does so in a method that is strongly typed,
//! using enums for static dispatch rather than dynamic, with structs (often ZSTs) that implement
//! [`Error`](std::error::Error). Library code never exits the process. The single exception is
//! [`flag::Registry::parse_or_exit`], which exists for `main` to call.
//!
//! Panics are reserved for misuse that can't be expressed in a signature, such as indexing past
//! the end of a builder through [`Index`](std::ops::Index) or reading a flag through a handle from
//! another registry.
//!
//! # Features
//! - `collections` (default): the temp buffer, builder and view.
//! - `flag` (default): the flag registry. Requires `collections`.
//! - `logging`: emits `debug` and `trace` records through the [`log`](https://docs.rs/log) facade
//!   under the `scratch_lib` target. Without it, no logging code is compiled at all.
//!
//! # Dependencies
//! This crate depends on some derive macros because they're helpful and remove the need for some
//! very repetitive programming, and optionally on `log`.
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[macro_use]
mod logging;

#[cfg(feature = "collections")]
pub mod collections;
#[cfg(feature = "flag")]
pub mod flag;

pub(crate) mod util;
