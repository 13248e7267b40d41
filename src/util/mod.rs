//! Small helpers shared across the crate.

use std::error::Error;
use std::fmt;

/// Result type with a boxed error, for fallible operations of any kind.
pub type Fallible<T = ()> = Result<T, Box<dyn Error>>;

/// Joining of displayable items into a string, with each item quoted.
pub trait JoinExt<T>: Iterator<Item = T> + Sized
where
    T: fmt::Display,
{
    /// Joins all items, separated by `sep`, each surrounded by `quote`.
    fn join(self, sep: &str, quote: char) -> String {
        let quoted: Vec<_> = self
            .map(|item| format!("{0}{1}{0}", quote, item))
            .collect();
        display_utils::join(&quoted, sep).to_string()
    }
}

impl<I, T> JoinExt<T> for I
where
    I: Iterator<Item = T>,
    T: fmt::Display,
{
}
