use std::num::IntErrorKind;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::flag::error::*;
use crate::flag::flag::{BoolFlag, Flag, FlagValue, Handle, StrFlag, Uint64Flag};
use crate::util::result::ResultExtension;

/// The maximum number of flags, including `help`, that a [`Registry`] accepts.
pub const FLAG_CAPACITY: usize = 256;

/// The prefix used by [`Registry::new`].
pub const DEFAULT_PREFIX: char = '-';

pub(crate) const HELP_NAME: &str = "help";
const HELP_DESC: &str = "Print this help to stdout and exit with 0.";

static NEXT_REGISTRY: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    Parsed,
}

/// What the caller should do after a successful [`Registry::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed {
    /// Carry on with the resolved flag values.
    Run,
    /// `help` was given: show [`Registry::help`] and stop.
    Help,
}

/// An ordered, fixed-capacity table of command-line flags, and the parser that fills it in.
///
/// A registry moves through two states. While open, flags are registered, each returning a typed
/// handle. [`parse`](Registry::parse) then consumes an argument list once, after which the
/// resolved values are read back through the handles and further registration is refused.
///
/// Every registry starts with a `help` flag, so it is always listed first in the help text.
///
/// # Parsing Rules
/// - The first argument is the program name and is never treated as a flag.
/// - Every following argument must be the prefix (`-` by default) followed by the exact name of a
///   registered flag. Anything else, including unregistered names and a bare prefix, is an
///   [`UnknownFlagError`].
/// - Boolean flags are set to true by their presence alone.
/// - String flags take the next argument verbatim.
/// - Integer flags take the next argument as a base 10 `u64` which must fall within the flag's
///   range.
///
/// # Examples
/// ```
/// # use scratch_lib::flag::{Parsed, Registry};
/// let mut flags = Registry::new();
/// let verbose = flags.register_bool("verbose", false, "Log more").unwrap();
/// let jobs = flags.register_uint64("jobs", 1, "Worker count").unwrap();
/// flags.set_uint64_range(jobs, 1, 64).unwrap();
///
/// assert_eq!(flags.parse(["prog", "-jobs", "8"]), Ok(Parsed::Run));
/// assert!(!flags.get_bool(verbose));
/// assert_eq!(flags.get_uint64(jobs), 8);
/// ```
#[derive(Debug)]
pub struct Registry {
    id: usize,
    flags: Vec<Flag>,
    prefix: char,
    program_name: Option<String>,
    invoked_as: Option<String>,
    state: State,
    help: BoolFlag,
}

impl Registry {
    /// Creates a registry using the default `-` prefix, holding only the `help` flag.
    pub fn new() -> Registry {
        Registry::with_prefix(DEFAULT_PREFIX)
    }

    /// Creates a registry whose flags are written as `prefix` followed by their name.
    pub fn with_prefix(prefix: char) -> Registry {
        let id = NEXT_REGISTRY.fetch_add(1, Ordering::Relaxed);
        let help = BoolFlag(Handle { registry: id, index: 0 });

        Registry {
            id,
            flags: vec![Flag {
                name: HELP_NAME.into(),
                desc: HELP_DESC.into(),
                value: FlagValue::Bool {
                    value: false,
                    default: false,
                },
            }],
            prefix,
            program_name: None,
            invoked_as: None,
            state: State::Open,
            help,
        }
    }

    /// Registers a boolean flag, which is false unless `default` is true or the flag is given.
    ///
    /// # Errors
    /// See [`RegisterError`]: the name must be non-empty and unique, the registry must have room and it must not
    /// have been parsed yet.
    pub fn register_bool(
        &mut self,
        name: &str,
        default: bool,
        desc: &str,
    ) -> Result<BoolFlag, RegisterError> {
        self.register(name, desc, FlagValue::Bool {
            value: default,
            default,
        }).map(BoolFlag)
    }

    /// Registers an unsigned 64-bit integer flag accepting any value in `[0, u64::MAX]`. Use
    /// [`set_uint64_range`](Registry::set_uint64_range) to narrow the range.
    ///
    /// # Errors
    /// See [`RegisterError`].
    pub fn register_uint64(
        &mut self,
        name: &str,
        default: u64,
        desc: &str,
    ) -> Result<Uint64Flag, RegisterError> {
        self.register(name, desc, FlagValue::Uint64 {
            value: default,
            default,
            min: 0,
            max: u64::MAX,
        }).map(Uint64Flag)
    }

    /// Registers a string flag.
    ///
    /// # Errors
    /// See [`RegisterError`].
    pub fn register_string(
        &mut self,
        name: &str,
        default: &str,
        desc: &str,
    ) -> Result<StrFlag, RegisterError> {
        self.register(name, desc, FlagValue::Str {
            value: default.into(),
            default: default.into(),
        }).map(StrFlag)
    }

    /// Restricts an integer flag to the inclusive range `[min, max]`.
    ///
    /// # Errors
    /// Returns [`InvalidRangeError`] if `min > max`, or if the flag's default or current value
    /// falls outside the new range. The previous range is kept in that case. Setting the same range
    /// twice is allowed.
    ///
    /// # Panics
    /// Panics if `flag` was created by a different registry.
    pub fn set_uint64_range(
        &mut self,
        flag: Uint64Flag,
        min: u64,
        max: u64,
    ) -> Result<(), InvalidRangeError> {
        let index = self.check_handle(flag.0);
        let Flag { name, value: slot, .. } = &mut self.flags[index];

        match slot {
            FlagValue::Uint64 { value, default, min: old_min, max: old_max } => {
                let range = min..=max;
                if let Some(bad) = [*default, *value].into_iter().find(|v| !range.contains(v)) {
                    Err(InvalidRangeError {
                        name: name.clone(),
                        min,
                        max,
                        value: bad,
                    })?
                }

                *old_min = min;
                *old_max = max;
                Ok(())
            },
            _ => Err(ForeignHandleError).throw(),
        }
    }

    /// Returns the inclusive range that an integer flag accepts.
    ///
    /// # Panics
    /// Panics if `flag` was created by a different registry.
    pub fn uint64_range(&self, flag: Uint64Flag) -> (u64, u64) {
        match self.value_of(flag.0) {
            FlagValue::Uint64 { min, max, .. } => (*min, *max),
            _ => Err(ForeignHandleError).throw(),
        }
    }

    /// Scans `args` once, resolving every flag that appears in it.
    ///
    /// The first item is taken as the name the program was invoked as. Flags that don't appear
    /// keep their defaults.
    ///
    /// # Errors
    /// Returns the first [`ParseError`] encountered. Flags resolved before the error keep their new
    /// values. A registry can only be parsed once, so a second call returns
    /// [`AlreadyParsedError`].
    pub fn parse<I, S>(&mut self, args: I) -> Result<Parsed, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.state == State::Parsed {
            Err(AlreadyParsedError)?
        }
        self.state = State::Parsed;

        let mut args = args.into_iter().map(Into::into);
        self.invoked_as = args.next();

        while let Some(token) = args.next() {
            let index = token
                .strip_prefix(self.prefix)
                .filter(|name| !name.is_empty())
                .and_then(|name| self.position(name))
                .ok_or_else(|| UnknownFlagError { flag: token.clone() })?;

            match &mut self.flags[index].value {
                FlagValue::Bool { value, .. } => *value = true,
                FlagValue::Str { value, .. } => {
                    *value = args.next().ok_or_else(|| MissingArgumentError {
                        flag: token.clone(),
                    })?;
                },
                FlagValue::Uint64 { value, min, max, .. } => {
                    let arg = args.next().ok_or_else(|| MissingArgumentError {
                        flag: token.clone(),
                    })?;
                    let parsed = parse_uint64(&token, arg)?;

                    if !(*min..=*max).contains(&parsed) {
                        Err(OutOfRangeError {
                            flag: token.clone(),
                            value: parsed,
                            min: *min,
                            max: *max,
                        })?
                    }
                    *value = parsed;
                },
            }
            trace!("resolved flag {}", token);
        }

        if self.get_bool(self.help) {
            debug!("help requested");
            Ok(Parsed::Help)
        } else {
            Ok(Parsed::Run)
        }
    }

    /// Returns the current value of a boolean flag.
    ///
    /// # Panics
    /// Panics if `flag` was created by a different registry.
    pub fn get_bool(&self, flag: BoolFlag) -> bool {
        match self.value_of(flag.0) {
            FlagValue::Bool { value, .. } => *value,
            _ => Err(ForeignHandleError).throw(),
        }
    }

    /// Returns the current value of an integer flag.
    ///
    /// # Panics
    /// Panics if `flag` was created by a different registry.
    pub fn get_uint64(&self, flag: Uint64Flag) -> u64 {
        match self.value_of(flag.0) {
            FlagValue::Uint64 { value, .. } => *value,
            _ => Err(ForeignHandleError).throw(),
        }
    }

    /// Returns the current value of a string flag.
    ///
    /// # Panics
    /// Panics if `flag` was created by a different registry.
    pub fn get_str(&self, flag: StrFlag) -> &str {
        match self.value_of(flag.0) {
            FlagValue::Str { value, .. } => value.as_str(),
            _ => Err(ForeignHandleError).throw(),
        }
    }

    /// Returns the handle of the built-in `help` flag.
    pub const fn help_flag(&self) -> BoolFlag {
        self.help
    }

    pub fn is_help_requested(&self) -> bool {
        self.get_bool(self.help)
    }

    /// Returns every registered flag in registration order, starting with `help`.
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Returns the flag with exactly the given name, if there is one.
    pub fn find(&self, name: &str) -> Option<&Flag> {
        self.position(name).map(|i| &self.flags[i])
    }

    pub const fn prefix(&self) -> char {
        self.prefix
    }

    pub const fn is_parsed(&self) -> bool {
        matches!(self.state, State::Parsed)
    }

    /// Overrides the program name shown in the help text, which otherwise comes from the first
    /// parsed argument.
    pub fn set_program_name(&mut self, name: &str) {
        self.program_name = Some(name.into());
    }

    /// Returns the name shown in the help text: the override if one was set, then the first parsed
    /// argument, then an empty string.
    pub fn program_name(&self) -> &str {
        self.program_name
            .as_deref()
            .or(self.invoked_as.as_deref())
            .unwrap_or_default()
    }

    fn register(&mut self, name: &str, desc: &str, value: FlagValue) -> Result<Handle, RegisterError> {
        if self.state == State::Parsed {
            Err(AlreadyParsedError)?
        }
        if name.is_empty() {
            Err(EmptyNameError)?
        }
        if self.flags.len() >= FLAG_CAPACITY {
            Err(CapacityExceededError { cap: FLAG_CAPACITY })?
        }
        if self.position(name).is_some() {
            Err(DuplicateNameError { name: name.into() })?
        }

        debug!("registering {:?} flag {}", value.kind(), name);
        self.flags.push(Flag {
            name: name.into(),
            desc: desc.into(),
            value,
        });

        Ok(Handle {
            registry: self.id,
            index: self.flags.len() - 1,
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.flags.iter().position(|flag| flag.name == name)
    }

    /// Checks that a handle was created by this registry, returning its index.
    fn check_handle(&self, handle: Handle) -> usize {
        if handle.registry != self.id || handle.index >= self.flags.len() {
            Err(ForeignHandleError).throw()
        }
        handle.index
    }

    fn value_of(&self, handle: Handle) -> &FlagValue {
        &self.flags[self.check_handle(handle)].value
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a whole argument as a base 10 `u64`, with the same leniency as [`str::parse`] (a single
/// leading `+` is accepted).
fn parse_uint64(flag: &str, arg: String) -> Result<u64, ParseError> {
    arg.parse::<u64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => OverflowError {
            flag: flag.into(),
            value: arg.clone(),
        }.into(),
        _ => InvalidValueError {
            flag: flag.into(),
            value: arg.clone(),
        }.into(),
    })
}
