//! Test helpers for code paths that are expected to panic.

/// Asserts that the provided block panics. When a message fragment is given, the panic payload must
/// also contain it.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert!(
            std::panic::catch_unwind(|| $run).is_err(),
            "assertion failed to panic"
        );
    };
    ($run:block, $fragment:literal) => {
        match std::panic::catch_unwind(|| $run) {
            Ok(_) => panic!("assertion failed to panic"),
            Err(payload) => {
                let message = payload
                    .downcast_ref::<String>()
                    .map(String::as_str)
                    .or_else(|| payload.downcast_ref::<&str>().copied())
                    .unwrap_or_default();
                assert!(
                    message.contains($fragment),
                    "panic message {:?} doesn't mention {:?}",
                    message,
                    $fragment
                );
            },
        }
    };
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
