//! Display adapters for values the formatting machinery does not render itself
//!
//! ```
//! use rust_structured_logger::core::format_adapter::{display_optional, display_set};
//! use std::collections::BTreeSet;
//! use std::sync::Arc;
//!
//! let peers: BTreeSet<u32> = [3, 1, 2].into_iter().collect();
//! assert_eq!(format!("{}", display_set(&peers)), "123");
//!
//! let missing: Option<Arc<String>> = None;
//! assert_eq!(format!("{}", display_optional(&missing)), "null");
//! ```

use super::call_context::basename;
use super::error::{LoggerError, Result};
use std::collections::BTreeSet;
use std::error::Error as StdError;
use std::fmt;
use std::ops::Deref;
use std::panic::{self, AssertUnwindSafe};

/// An error that can describe itself in full, and may fail doing so.
pub trait DetailedError {
    fn to_detail_string(&self) -> Result<String>;
}

/// Renders every element of an ordered set back to back, without separators.
pub struct SetDisplay<'a, T>(&'a BTreeSet<T>);

/// Renders the pointee of a present reference, or `null`.
pub struct OptionalDisplay<'a, P>(&'a Option<P>);

/// Renders an error's detail string. A failure (error or panic) while
/// producing it is replaced by a marker naming this file and line.
pub struct ErrorDisplay<'a, E: ?Sized>(&'a E);

/// A std error together with its chain of sources.
pub struct ErrorChain<'a>(pub &'a (dyn StdError + 'static));

pub fn display_set<T: fmt::Display>(set: &BTreeSet<T>) -> SetDisplay<'_, T> {
    SetDisplay(set)
}

pub fn display_optional<P>(value: &Option<P>) -> OptionalDisplay<'_, P>
where
    P: Deref,
    P::Target: fmt::Display,
{
    OptionalDisplay(value)
}

pub fn display_error<E: DetailedError + ?Sized>(error: &E) -> ErrorDisplay<'_, E> {
    ErrorDisplay(error)
}

impl<T: fmt::Display> fmt::Display for SetDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.0 {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl<P> fmt::Display for OptionalDisplay<'_, P>
where
    P: Deref,
    P::Target: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", &**value),
            None => f.write_str("null"),
        }
    }
}

impl<E: DetailedError + ?Sized> fmt::Display for ErrorDisplay<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = panic::catch_unwind(AssertUnwindSafe(|| self.0.to_detail_string()));
        match detail {
            Ok(Ok(text)) => f.write_str(&text),
            _ => {
                let line = line!();
                write!(f, "< error formatting {}:{} >", basename(file!()), line)
            }
        }
    }
}

impl DetailedError for ErrorChain<'_> {
    fn to_detail_string(&self) -> Result<String> {
        let mut detail = self.0.to_string();
        let mut source = self.0.source();
        while let Some(cause) = source {
            detail.push_str("\n  caused by: ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        Ok(detail)
    }
}

impl DetailedError for LoggerError {
    fn to_detail_string(&self) -> Result<String> {
        ErrorChain(self).to_detail_string()
    }
}
