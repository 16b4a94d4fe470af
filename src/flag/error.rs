use std::io;

use derive_more::{Display, Error, From, IsVariant};

use crate::collections::temp::TempError;
use crate::util::error::AllocationFailure;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("Unknown flag \"{flag}\"")]
pub struct UnknownFlagError {
    pub flag: String,
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("No argument provided for \"{flag}\"")]
pub struct MissingArgumentError {
    pub flag: String,
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("\"{value}\" provided for \"{flag}\" is not a valid number")]
pub struct InvalidValueError {
    pub flag: String,
    pub value: String,
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("\"{value}\" provided for \"{flag}\" overflows a 64 bit unsigned integer")]
pub struct OverflowError {
    pub flag: String,
    pub value: String,
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("The value {value} provided for \"{flag}\" is outside of the [{min}..{max}] range")]
pub struct OutOfRangeError {
    pub flag: String,
    pub value: u64,
    pub min: u64,
    pub max: u64,
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("Range [{min}..{max}] is invalid for \"{name}\" holding {value}")]
pub struct InvalidRangeError {
    pub name: String,
    pub min: u64,
    pub max: u64,
    pub value: u64,
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("A flag named \"{name}\" is already registered")]
pub struct DuplicateNameError {
    pub name: String,
}

/// Flags are matched as the prefix followed by their name, so an empty name could never be given.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Flag names can't be empty")]
pub struct EmptyNameError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Amount of flags has exceeded the capacity of {cap}")]
pub struct CapacityExceededError {
    pub cap: usize,
}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("flags have already been parsed")]
pub struct AlreadyParsedError;

/// A handle was passed to a [`Registry`](super::Registry) other than the one that created it.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("flag handle belongs to a different registry")]
pub struct ForeignHandleError;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq, From, IsVariant)]
pub enum RegisterError {
    EmptyName(EmptyNameError),
    DuplicateName(DuplicateNameError),
    CapacityExceeded(CapacityExceededError),
    AlreadyParsed(AlreadyParsedError),
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq, From, IsVariant)]
pub enum ParseError {
    UnknownFlag(UnknownFlagError),
    MissingArgument(MissingArgumentError),
    InvalidValue(InvalidValueError),
    Overflow(OverflowError),
    OutOfRange(OutOfRangeError),
    AlreadyParsed(AlreadyParsedError),
}

#[derive(Debug, Display, Error, From, IsVariant)]
pub enum HelpError {
    Scratch(TempError),
    Allocation(AllocationFailure),
    IO(io::Error),
}

/// Every error that the flag module can produce, for callers that want a single type to propagate.
#[derive(Debug, Display, Error, From, IsVariant)]
pub enum FlagError {
    Register(RegisterError),
    Range(InvalidRangeError),
    Parse(ParseError),
    Help(HelpError),
}
