use derive_more::{Display, Error, From, IsVariant, TryInto};

/// The [`TempBuffer`](super::TempBuffer) doesn't have enough space left for an allocation.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Unable to allocate {requested} bytes with only {remaining} remaining in the buffer!")]
pub struct Exhausted {
    pub requested: usize,
    pub remaining: usize,
}

/// A formatting implementation reported an error, or produced a different amount of output when
/// asked to write the same arguments twice.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("formatting failed while writing into the buffer")]
pub struct FormatError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, From, TryInto, IsVariant)]
pub enum TempError {
    Exhausted(Exhausted),
    Format(FormatError),
}
