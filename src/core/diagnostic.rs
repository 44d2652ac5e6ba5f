//! Fallback channel for failures that happen while emitting a record
//!
//! Logging must never take the caller down. Anything that goes wrong
//! inside a log call ends up here as one line on stderr.

use super::call_context::basename;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

const UNKNOWN_CAUSE: &str = "Failed to log this message";

/// Write `<file:line  cause>` to stderr.
pub fn report(file: &str, line: u32, cause: &str) {
    eprintln!("<{}:{}  {}>", basename(file), line, cause);
}

/// Run one log emission, converting a panic into a [`report`].
///
/// Returns `None` if `f` panicked.
pub fn contain<T>(file: &str, line: u32, f: impl FnOnce() -> T) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(payload) => {
            report(file, line, &panic_message(payload.as_ref()));
            None
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        UNKNOWN_CAUSE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contain_passes_value_through() {
        assert_eq!(contain(file!(), line!(), || 7), Some(7));
    }

    #[test]
    fn test_contain_swallows_panics() {
        let result = contain(file!(), line!(), || -> u32 { panic!("boom") });
        assert_eq!(result, None);
    }

    #[test]
    fn test_panic_message() {
        let payload = panic::catch_unwind(|| panic!("static text")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "static text");

        let payload = panic::catch_unwind(|| panic!("formatted {}", 42)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "formatted 42");

        let payload = panic::catch_unwind(|| std::panic::panic_any(17_u8)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), UNKNOWN_CAUSE);
    }
}
