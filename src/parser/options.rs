//! Parsing options and configuration.

use crate::detect::MIN_NBFORMAT;

/// Options for parsing notebook documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Minimum accepted `nbformat` major version
    pub min_version: u32,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip cells that fail to decode).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the minimum accepted format version.
    ///
    /// Values below the pipeline minimum are raised to it.
    pub fn with_min_version(mut self, version: u32) -> Self {
        self.min_version = version.max(MIN_NBFORMAT);
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            min_version: MIN_NBFORMAT,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any malformed cell
    #[default]
    Strict,
    /// Skip malformed cells and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new().lenient().with_min_version(5);

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.min_version, 5);
    }

    #[test]
    fn test_min_version_cannot_go_below_pipeline_minimum() {
        let options = ParseOptions::new().with_min_version(2);
        assert_eq!(options.min_version, MIN_NBFORMAT);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.min_version, 4);
    }
}
