//! Stitcher is a compile-time include resolver: it scans plain-text source
//! files for `include("path")` directives and recursively assembles the
//! referenced files into a single output.

#![warn(missing_docs)]

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

pub mod config;
pub mod files;
pub mod parse;
pub mod paths;
pub mod resolve;
pub mod util;
pub mod watch;

/// Error type for include targets that match no existing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundError(pub PathBuf);

impl Error for NotFoundError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}
impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No file found for include target {:?}", self.0)
    }
}
