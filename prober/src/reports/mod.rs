//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod clean;
mod generate;
mod output;

pub use check::{CheckReport, ResourceStatus};
pub use clean::CleanReport;
pub use output::{Report, TerminalOutput};

/// An error message followed by its chain of causes.
pub(crate) fn describe(error: &prober_core::Error) -> String {
    let mut text = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
