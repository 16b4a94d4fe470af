//! A module containing [`StringView`], a borrowed view over a run of bytes with helpers for
//! trimming and splitting without allocating.

mod view;

pub use view::*;
