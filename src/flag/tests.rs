#![cfg(test)]

use proptest::prelude::*;

use super::*;
use crate::util::panic::assert_panics;

struct Example {
    flags: Registry,
    verbose: BoolFlag,
    count: Uint64Flag,
    name: StrFlag,
}

fn example() -> Example {
    let mut flags = Registry::new();
    let verbose = flags.register_bool("verbose", false, "Log more").unwrap();
    let count = flags.register_uint64("count", 1, "How many").unwrap();
    let name = flags.register_string("name", "anon", "Who").unwrap();
    flags.set_uint64_range(count, 1, 10).unwrap();

    Example {
        flags,
        verbose,
        count,
        name,
    }
}

#[test]
fn test_parse_values() {
    let Example {
        mut flags,
        verbose,
        count,
        name,
    } = example();

    assert_eq!(
        flags.parse(["prog", "-verbose", "-count", "3", "-name", "x"]),
        Ok(Parsed::Run)
    );
    assert!(flags.get_bool(verbose));
    assert_eq!(flags.get_uint64(count), 3);
    assert_eq!(flags.get_str(name), "x");
    assert!(!flags.is_help_requested());
    assert!(flags.is_parsed());
}

#[test]
fn test_defaults_survive_parse() {
    let Example {
        mut flags,
        verbose,
        count,
        name,
    } = example();

    assert_eq!(flags.parse(["prog"]), Ok(Parsed::Run));
    assert!(!flags.get_bool(verbose), "Absent flags should keep their defaults.");
    assert_eq!(flags.get_uint64(count), 1);
    assert_eq!(flags.get_str(name), "anon");

    let mut flags = Registry::new();
    assert_eq!(
        flags.parse(Vec::<String>::new()),
        Ok(Parsed::Run),
        "An empty argument list has nothing to resolve."
    );
    assert_eq!(flags.program_name(), "");
}

#[test]
fn test_string_takes_next_argument_verbatim() {
    let Example { mut flags, name, .. } = example();

    flags.parse(["prog", "-name", "-verbose"]).unwrap();
    assert_eq!(
        flags.get_str(name),
        "-verbose",
        "The argument after a string flag is never read as a flag."
    );
}

#[test]
fn test_out_of_range() {
    let Example {
        mut flags, count, ..
    } = example();

    let err = flags.parse(["prog", "-count", "50"]).unwrap_err();
    assert_eq!(
        err,
        ParseError::OutOfRange(OutOfRangeError {
            flag: "-count".into(),
            value: 50,
            min: 1,
            max: 10,
        })
    );
    assert_eq!(
        err.to_string(),
        "The value 50 provided for \"-count\" is outside of the [1..10] range"
    );
    assert_eq!(flags.get_uint64(count), 1, "A rejected value shouldn't be stored.");
}

#[test]
fn test_invalid_numbers() {
    for arg in ["abc", "", "12abc", "-5", " 7", "0x10"] {
        let Example { mut flags, .. } = example();
        assert_eq!(
            flags.parse(["prog", "-count", arg]),
            Err(ParseError::InvalidValue(InvalidValueError {
                flag: "-count".into(),
                value: arg.into(),
            })),
            "{:?} should be rejected as a number.",
            arg
        );
    }

    let Example {
        mut flags, count, ..
    } = example();
    flags.parse(["prog", "-count", "+7"]).unwrap();
    assert_eq!(flags.get_uint64(count), 7);
}

#[test]
fn test_overflow() {
    let mut flags = Registry::new();
    let big = flags.register_uint64("big", 0, "Unbounded").unwrap();
    assert_eq!(flags.uint64_range(big), (0, u64::MAX));

    assert_eq!(
        flags.parse(["prog", "-big", "18446744073709551616"]),
        Err(ParseError::Overflow(OverflowError {
            flag: "-big".into(),
            value: "18446744073709551616".into(),
        }))
    );

    let mut flags = Registry::new();
    let big = flags.register_uint64("big", 0, "Unbounded").unwrap();
    flags.parse(["prog", "-big", "18446744073709551615"]).unwrap();
    assert_eq!(flags.get_uint64(big), u64::MAX);
}

#[test]
fn test_missing_argument() {
    for flag in ["-count", "-name"] {
        let Example { mut flags, .. } = example();
        assert_eq!(
            flags.parse(["prog", flag]),
            Err(ParseError::MissingArgument(MissingArgumentError { flag: flag.into() }))
        );
    }
}

#[test]
fn test_unknown_flags() {
    for token in ["-", "verbose", "-verbos", "-verbose2", "--verbose", "-VERBOSE"] {
        let Example { mut flags, .. } = example();
        assert_eq!(
            flags.parse(["prog", token]),
            Err(ParseError::UnknownFlag(UnknownFlagError { flag: token.into() })),
            "{:?} doesn't name a registered flag.",
            token
        );
    }
}

#[test]
fn test_errors_keep_earlier_values() {
    let Example {
        mut flags,
        verbose,
        count,
        ..
    } = example();

    assert!(flags.parse(["prog", "-verbose", "-count", "4", "-bogus"]).is_err());
    assert!(flags.get_bool(verbose));
    assert_eq!(flags.get_uint64(count), 4);
}

#[test]
fn test_help_requested() {
    let Example { mut flags, .. } = example();

    assert_eq!(flags.parse(["prog", "-help"]), Ok(Parsed::Help));
    assert!(flags.is_help_requested());
    assert!(flags.get_bool(flags.help_flag()));
}

#[test]
fn test_registration_errors() {
    let mut flags = Registry::new();
    flags.register_bool("dup", false, "first").unwrap();

    assert_eq!(
        flags.register_string("dup", "", "second"),
        Err(RegisterError::DuplicateName(DuplicateNameError { name: "dup".into() }))
    );
    assert_eq!(
        flags.register_bool("help", true, "mine"),
        Err(RegisterError::DuplicateName(DuplicateNameError { name: "help".into() })),
        "help is always taken."
    );
    assert_eq!(
        flags.register_uint64("", 0, "nameless"),
        Err(RegisterError::EmptyName(EmptyNameError)),
        "An empty name can never be matched by an argument."
    );
    assert_eq!(flags.flags().len(), 2, "Rejected flags shouldn't be stored.");
    assert!(!flags.help(false).unwrap().to_string().contains("\t-\n"));

    flags.parse(["prog"]).unwrap();
    assert!(
        flags
            .register_uint64("late", 0, "too late")
            .is_err_and(|e| e.is_already_parsed())
    );
    assert_eq!(
        flags.parse(["prog"]),
        Err(ParseError::AlreadyParsed(AlreadyParsedError))
    );
}

#[test]
fn test_capacity() {
    let mut flags = Registry::new();
    for i in 1..FLAG_CAPACITY {
        flags
            .register_bool(&format!("f{i}"), false, "filler")
            .unwrap();
    }
    assert_eq!(flags.flags().len(), FLAG_CAPACITY);

    assert_eq!(
        flags.register_bool("one_more", false, "overflow"),
        Err(RegisterError::CapacityExceeded(CapacityExceededError { cap: FLAG_CAPACITY }))
    );
}

#[test]
fn test_set_range() {
    let mut flags = Registry::new();
    let level = flags.register_uint64("level", 5, "Level").unwrap();

    flags.set_uint64_range(level, 1, 10).unwrap();
    flags
        .set_uint64_range(level, 1, 10)
        .expect("Setting the same range twice should succeed.");
    flags.set_uint64_range(level, 5, 5).unwrap();
    assert_eq!(flags.uint64_range(level), (5, 5));

    assert_eq!(
        flags.set_uint64_range(level, 10, 1),
        Err(InvalidRangeError {
            name: "level".into(),
            min: 10,
            max: 1,
            value: 5,
        })
    );
    assert!(
        flags.set_uint64_range(level, 6, 9).is_err(),
        "The default must stay inside the range."
    );
    assert_eq!(flags.uint64_range(level), (5, 5), "A rejected range shouldn't be applied.");
}

#[test]
fn test_help_text() {
    let Example { mut flags, .. } = example();
    flags.parse(["prog"]).unwrap();

    assert_eq!(
        flags.help(true).unwrap().to_string(),
        "Usage: prog [OPTIONS]\n\
         OPTIONS:\n\
         \t-help\n\
         \t\tPrint this help to stdout and exit with 0.\n\
         \t-verbose\n\
         \t\tLog more (Default: false)\n\
         \t-count\n\
         \t\tHow many (Default: 1)\n\
         \t\tMinimum: 1\n\
         \t\tMaximum: 10\n\
         \t-name\n\
         \t\tWho (Default: anon)\n"
    );

    let without_defaults = flags.help(false).unwrap().to_string();
    assert!(!without_defaults.contains("Default"));
    assert!(without_defaults.contains("\t\tMinimum: 1\n"));

    let mut written = Vec::new();
    flags.write_help(&mut written, true).unwrap();
    assert_eq!(written, flags.help(true).unwrap().as_bytes());
}

#[test]
fn test_prefix_and_program_name() {
    let mut flags = Registry::with_prefix('/');
    let quiet = flags.register_bool("quiet", false, "Say less").unwrap();
    assert_eq!(flags.prefix(), '/');

    flags.set_program_name("tool");
    assert_eq!(
        flags.parse(["./target/tool", "-quiet"]),
        Err(ParseError::UnknownFlag(UnknownFlagError { flag: "-quiet".into() }))
    );
    assert!(!flags.get_bool(quiet));
    assert_eq!(flags.program_name(), "tool", "An explicit name wins over argv[0].");

    let help = flags.help(false).unwrap().to_string();
    assert!(help.starts_with("Usage: tool [OPTIONS]\n"));
    assert!(help.contains("\t/quiet\n"));

    let mut flags = Registry::with_prefix('/');
    let quiet = flags.register_bool("quiet", false, "Say less").unwrap();
    flags.parse(["./target/tool", "/quiet"]).unwrap();
    assert!(flags.get_bool(quiet));
    assert_eq!(flags.program_name(), "./target/tool");
}

#[test]
fn test_lookup() {
    let Example { flags, .. } = example();

    let names: Vec<&str> = flags.flags().iter().map(Flag::name).collect();
    assert_eq!(names, ["help", "verbose", "count", "name"]);

    let count = flags.find("count").unwrap();
    assert_eq!(count.kind(), FlagKind::Uint64);
    assert_eq!(count.desc(), "How many");
    assert_eq!(
        count.value(),
        &FlagValue::Uint64 {
            value: 1,
            default: 1,
            min: 1,
            max: 10,
        }
    );
    assert!(flags.find("coun").is_none());
}

#[test]
fn test_foreign_handle() {
    let Example { verbose, count, .. } = example();
    let other = Registry::new();

    assert_panics!({ other.get_uint64(count) }, "different registry");
    assert_panics!({ other.get_bool(verbose) });
    assert!(!other.get_bool(other.help_flag()));
}

#[test]
fn test_flag_error_wraps_every_stage() {
    let Example { mut flags, .. } = example();

    let err: FlagError = flags.parse(["prog", "-nope"]).unwrap_err().into();
    assert!(err.is_parse());
    assert_eq!(err.to_string(), "Unknown flag \"-nope\"");
}

proptest! {
    #[test]
    fn values_in_range_are_stored(value in 1_u64..=10) {
        let Example { mut flags, count, .. } = example();
        prop_assert_eq!(flags.parse(["prog".into(), "-count".into(), value.to_string()]), Ok(Parsed::Run));
        prop_assert_eq!(flags.get_uint64(count), value);
    }

    #[test]
    fn values_out_of_range_are_rejected(value in prop_oneof![Just(0_u64), 11_u64..]) {
        let Example { mut flags, count, .. } = example();
        let result = flags.parse(["prog".into(), "-count".into(), value.to_string()]);
        prop_assert!(result.is_err_and(|e| e.is_out_of_range()));
        prop_assert_eq!(flags.get_uint64(count), 1);
    }
}
