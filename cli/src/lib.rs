//! Prompting and reporting for the `gridwalk` binary.

pub mod prompt;
pub mod report;

pub use prompt::{PromptError, Request, check_request, explain, parse_coordinates, read_request};
pub use report::write_report;
