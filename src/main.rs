use std::ffi::OsString;
use std::io::{self, Write};
use std::process;

use scratch_lib::collections::{StringBuilder, StringView, TempBuffer};
use scratch_lib::flag::Registry;
use scratch_lib::temp_format;

fn main() {
    let mut flags = Registry::new();
    flags.set_program_name("scratch");

    let registered = (|| {
        Ok::<_, scratch_lib::flag::FlagError>((
            flags.register_string("text", "", "Text to split into fields.")?,
            flags.register_string("sep", ",", "Single byte separating the fields.")?,
            flags.register_bool("trim", false, "Strip whitespace around every field.")?,
            flags.register_uint64("repeat", 1, "Print the fields this many times.")?,
        ))
    })();
    let (text, sep, trim, repeat) = match registered {
        Ok(handles) => handles,
        Err(e) => fail(&e.to_string()),
    };
    if let Err(e) = flags.set_uint64_range(repeat, 1, 100) {
        fail(&e.to_string());
    }

    let args = std::env::args_os()
        .map(OsString::into_string)
        .collect::<Result<Vec<_>, _>>();
    match args {
        Ok(args) => flags.parse_or_exit(args),
        Err(arg) => fail(&format!("Argument {arg:?} is not valid UTF-8")),
    }

    let sep = match flags.get_str(sep).as_bytes() {
        [byte] => *byte,
        _ => fail("-sep must be exactly one byte"),
    };

    let mut out = StringBuilder::new();
    let mut scratch = TempBuffer::new();

    for _ in 0..flags.get_uint64(repeat) {
        let mut rest = StringView::from(flags.get_str(text));
        let mut index = 0_usize;

        while !rest.is_empty() {
            let mut field = rest.chop_by_delimiter(sep);
            if flags.get_bool(trim) {
                field = field.trim();
            }

            let start = scratch.save();
            let line = match temp_format!(scratch, "[{index}] {field}\n") {
                Ok(line) => line,
                Err(e) => fail(&e.to_string()),
            };
            if let Err(e) = out.extend_str(line) {
                fail(&e.to_string());
            }
            scratch.rewind(start);
            index += 1;
        }
    }

    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(out.as_bytes()).and_then(|()| stdout.flush()) {
        fail(&e.to_string());
    }
}

fn fail(msg: &str) -> ! {
    eprintln!("ERROR: {msg}");
    process::exit(1)
}
