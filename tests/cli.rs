use std::process::{Command, Output};

fn scratch(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scratch"))
        .args(args)
        .output()
        .expect("the scratch binary should start")
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[test]
fn test_fields_are_printed() {
    let out = scratch(&["-text", " a, b", "-trim", "-repeat", "2"]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(text(&out.stdout), "[0] a\n[1] b\n[0] a\n[1] b\n");
    assert!(out.stderr.is_empty());
}

#[test]
fn test_help_goes_to_stdout_and_succeeds() {
    let out = scratch(&["-help"]);

    assert_eq!(out.status.code(), Some(0), "Asking for help isn't a failure.");
    let stdout = text(&out.stdout);
    assert!(stdout.starts_with("Usage: scratch [OPTIONS]\nOPTIONS:\n\t-help\n"));
    assert!(stdout.contains("\t-repeat\n\t\tPrint the fields this many times. (Default: 1)\n"));
    assert!(stdout.contains("\t\tMinimum: 1\n\t\tMaximum: 100\n"));
    assert!(out.stderr.is_empty(), "Help shouldn't be written to stderr.");
}

#[test]
fn test_out_of_range_reports_bounds() {
    let out = scratch(&["-repeat", "0"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert_eq!(
        text(&out.stderr),
        "ERROR: The value 0 provided for \"-repeat\" is outside of the [1..100] range\n"
    );
}

#[test]
fn test_unknown_flag_fails() {
    let out = scratch(&["-bogus"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert_eq!(text(&out.stderr), "ERROR: Unknown flag \"-bogus\"\n");
}

#[cfg(unix)]
#[test]
fn test_non_utf8_argument_fails_cleanly() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let out = Command::new(env!("CARGO_BIN_EXE_scratch"))
        .arg("-text")
        .arg(OsStr::from_bytes(b"\xff"))
        .output()
        .expect("the scratch binary should start");

    assert_eq!(out.status.code(), Some(1), "Bad arguments should be reported, not panic.");
    assert!(out.stdout.is_empty());
    let stderr = text(&out.stderr);
    assert!(stderr.starts_with("ERROR: Argument"), "unexpected stderr: {stderr:?}");
    assert!(!stderr.contains("panicked"));
}
