//! Notebook parsing module.

mod notebook_parser;
mod options;

pub use notebook_parser::NotebookParser;
pub use options::{ErrorMode, ParseOptions};
