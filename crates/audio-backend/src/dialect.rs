//! Ordered fallback across equivalent command dialects.
//!
//! Volume and mute control on macOS is reachable through several AppleScript
//! phrasings, and which of them works depends on the OS release and the
//! permissions granted to the calling terminal. The backend expresses each
//! phrasing as an attempt and takes the first that succeeds.

use tracing::debug;

use crate::{Capability, Error, Result};

/// Run `attempts` in order and return the first success.
///
/// Failures of individual attempts are logged at debug and discarded. When every
/// attempt fails (or there are none), the result is
/// [`Error::Unsupported`] for `capability`.
pub fn first_success<T, I, F>(capability: Capability, attempts: I) -> Result<T>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> Result<T>,
{
    let mut tried = 0usize;
    for attempt in attempts {
        tried += 1;
        match attempt() {
            Ok(value) => {
                debug!(%capability, attempt = tried, "dialect succeeded");
                return Ok(value);
            }
            Err(err) => debug!(%capability, attempt = tried, %err, "dialect failed"),
        }
    }
    debug!(%capability, tried, "no dialect succeeded");
    Err(Error::Unsupported(capability))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn fail() -> Result<u8> {
        Err(Error::Parse {
            capability: Capability::ReadVolume,
            output: "missing value".into(),
        })
    }

    #[test]
    fn stops_at_first_success() {
        let calls = Cell::new(0);
        let attempts: Vec<Box<dyn FnOnce() -> Result<u8>>> = vec![
            Box::new(|| {
                calls.set(calls.get() + 1);
                fail()
            }),
            Box::new(|| {
                calls.set(calls.get() + 1);
                Ok(7)
            }),
            Box::new(|| {
                calls.set(calls.get() + 1);
                Ok(9)
            }),
        ];
        let got = first_success(Capability::ReadVolume, attempts).unwrap();
        assert_eq!(got, 7);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn exhausted_attempts_are_unsupported() {
        let attempts = [fail, fail];
        let err = first_success(Capability::ReadVolume, attempts).unwrap_err();
        assert!(matches!(err, Error::Unsupported(Capability::ReadVolume)));
    }

    #[test]
    fn no_attempts_is_unsupported() {
        let attempts: Vec<fn() -> Result<u8>> = Vec::new();
        let err = first_success(Capability::WriteMute, attempts).unwrap_err();
        assert!(matches!(err, Error::Unsupported(Capability::WriteMute)));
    }
}
