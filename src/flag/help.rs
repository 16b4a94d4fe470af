use std::io::{self, Write};
use std::process;

use crate::collections::builder::StringBuilder;
use crate::collections::temp::{TempBuffer, TempError};
use crate::flag::error::HelpError;
use crate::flag::flag::{Flag, FlagValue};
use crate::flag::registry::{HELP_NAME, Parsed, Registry};
use crate::util::error::AllocationFailure;
use crate::util::result::ResultExtension;

/// Room for rendering one flag's numbers; a `u64` never needs more than 20 digits.
const HELP_SCRATCH_CAP: usize = 1024;

impl Registry {
    /// Renders the usage banner followed by every flag in registration order. Integer flags also
    /// list their minimum and maximum, and `print_default` adds each flag's default value (except
    /// for `help` itself).
    ///
    /// ```text
    /// Usage: prog [OPTIONS]
    /// OPTIONS:
    ///     -help
    ///         Print this help to stdout and exit with 0.
    ///     -count
    ///         How many times (Default: 1)
    ///         Minimum: 1
    ///         Maximum: 10
    /// ```
    ///
    /// # Errors
    /// Returns a [`HelpError`] if the text couldn't be allocated.
    pub fn help(&self, print_default: bool) -> Result<StringBuilder, HelpError> {
        let mut out = StringBuilder::new();
        let mut scratch = TempBuffer::with_cap(HELP_SCRATCH_CAP);

        push(&mut out, &["Usage: ", self.program_name(), " [OPTIONS]\nOPTIONS:\n"])?;

        let mut prefix = [0_u8; 4];
        let prefix: &str = self.prefix().encode_utf8(&mut prefix);

        for flag in self.flags() {
            push(&mut out, &["\t", prefix, flag.name(), "\n\t\t", flag.desc()])?;

            if print_default && flag.name() != HELP_NAME {
                let default = show_default(flag, &mut scratch)?;
                push(&mut out, &[" (Default: ", default, ")"])?;
            }
            out.append(b'\n')?;

            if let FlagValue::Uint64 { min, max, .. } = flag.value() {
                let min = scratch.format(format_args!("{min}"))?;
                push(&mut out, &["\t\tMinimum: ", min, "\n"])?;
                let max = scratch.format(format_args!("{max}"))?;
                push(&mut out, &["\t\tMaximum: ", max, "\n"])?;
            }

            scratch.reset();
        }

        Ok(out)
    }

    /// Writes [`help`](Registry::help) to `out`.
    ///
    /// # Errors
    /// Returns a [`HelpError`] if the text couldn't be rendered or written.
    pub fn write_help<W: Write>(&self, mut out: W, print_default: bool) -> Result<(), HelpError> {
        let text = self.help(print_default)?;
        out.write_all(&text)?;
        out.flush()?;
        Ok(())
    }

    /// Parses `args` for a program's `main`, exiting the process instead of returning when there's
    /// nothing left to run.
    ///
    /// - If `help` was given, the help text (with defaults) is printed to stdout and the process
    ///   exits with 0.
    /// - If parsing fails, the error is printed to stderr and the process exits with 1.
    ///
    /// Library code should call [`parse`](Registry::parse) instead.
    pub fn parse_or_exit<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let report = |msg: &str| eprintln!("ERROR: {msg}");

        match self.parse(args).report_err(report) {
            Some(Parsed::Run) => (),
            Some(Parsed::Help) => {
                let code = match self.write_help(io::stdout().lock(), true).report_err(report) {
                    Some(()) => 0,
                    None => 1,
                };
                process::exit(code)
            },
            None => process::exit(1),
        }
    }
}

fn push(out: &mut StringBuilder, parts: &[&str]) -> Result<(), AllocationFailure> {
    for part in parts {
        out.extend_str(part)?;
    }
    Ok(())
}

fn show_default<'a>(flag: &'a Flag, scratch: &'a mut TempBuffer) -> Result<&'a str, TempError> {
    match flag.value() {
        FlagValue::Bool { default: true, .. } => Ok("true"),
        FlagValue::Bool { default: false, .. } => Ok("false"),
        FlagValue::Uint64 { default, .. } => scratch.format(format_args!("{default}")),
        FlagValue::Str { default, .. } => Ok(default.as_str()),
    }
}
