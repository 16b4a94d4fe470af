//! Extensions for [`Result`]s whose error type implements [`Error`].

use std::error::Error;

pub(crate) trait ResultExtension<T, E: Error> {
    /// A method similar to [`Result::unwrap`], except that it panics with the message of the error
    /// itself rather than its [`Debug`](std::fmt::Debug) representation.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;

    /// Consumes the error after handing its message to `report`, returning the success value as an
    /// [`Option`].
    fn report_err<F: FnOnce(&str)>(self, report: F) -> Option<T>;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    fn throw(self) -> T {
        match self {
            Ok(val) => val,
            Err(error) => panic!("{}", error),
        }
    }

    fn report_err<F: FnOnce(&str)>(self, report: F) -> Option<T> {
        match self {
            Ok(val) => Some(val),
            Err(error) => {
                report(&error.to_string());
                None
            },
        }
    }
}
