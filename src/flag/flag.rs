use derive_more::IsVariant;

/// The type of value that a [`Flag`] holds. Fixed when the flag is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum FlagKind {
    Bool,
    Uint64,
    Str,
}

/// The current value of a [`Flag`] alongside its default and, for integers, its permitted range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Bool {
        value: bool,
        default: bool,
    },
    Uint64 {
        value: u64,
        default: u64,
        min: u64,
        max: u64,
    },
    Str {
        value: String,
        default: String,
    },
}

impl FlagValue {
    pub const fn kind(&self) -> FlagKind {
        match self {
            FlagValue::Bool { .. } => FlagKind::Bool,
            FlagValue::Uint64 { .. } => FlagKind::Uint64,
            FlagValue::Str { .. } => FlagKind::Str,
        }
    }
}

/// A named, typed command-line option, as stored in a [`Registry`](super::Registry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub(crate) name: String,
    pub(crate) desc: String,
    pub(crate) value: FlagValue,
}

impl Flag {
    /// The name matched against arguments, without the prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub const fn kind(&self) -> FlagKind {
        self.value.kind()
    }

    pub const fn value(&self) -> &FlagValue {
        &self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Handle {
    pub(crate) registry: usize,
    pub(crate) index: usize,
}

/// A handle to a boolean flag, returned by [`Registry::register_bool`](super::Registry::register_bool).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoolFlag(pub(crate) Handle);

/// A handle to an unsigned 64-bit integer flag, returned by
/// [`Registry::register_uint64`](super::Registry::register_uint64).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uint64Flag(pub(crate) Handle);

/// A handle to a string flag, returned by
/// [`Registry::register_string`](super::Registry::register_string).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrFlag(pub(crate) Handle);
