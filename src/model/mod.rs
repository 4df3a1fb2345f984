//! Document model types for notebook content representation.
//!
//! This module defines the in-memory representation that bridges notebook
//! parsing and HTML rendering. Every type decodes directly from the notebook
//! JSON schema; fields the schema marks optional decode as empty or `None`
//! instead of failing.

mod cell;
mod data;
mod notebook;
mod output;
mod text;

pub use cell::{Cell, CellKind};
pub use data::{MimeBundle, MimeType};
pub use notebook::{KernelSpec, LanguageInfo, Metadata, Notebook};
pub use output::{Output, OutputKind};
pub use text::MultilineString;
