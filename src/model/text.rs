//! Multiline text fields.

use serde::{Deserialize, Serialize};

/// A text value stored as an ordered list of fragments.
///
/// The notebook schema allows every multiline field to be written either as
/// a single string or as an array of strings. Fragments carry their own line
/// terminators, so joining never inserts a separator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MultilineRepr")]
pub struct MultilineString(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum MultilineRepr {
    Single(String),
    Fragments(Vec<String>),
}

impl From<MultilineRepr> for MultilineString {
    fn from(repr: MultilineRepr) -> Self {
        match repr {
            MultilineRepr::Single(s) => Self(vec![s]),
            MultilineRepr::Fragments(fragments) => Self(fragments),
        }
    }
}

impl MultilineString {
    /// Create an empty value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a value from fragments.
    pub fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(fragments.into_iter().map(Into::into).collect())
    }

    /// The fragments in document order.
    pub fn fragments(&self) -> &[String] {
        &self.0
    }

    /// Concatenate all fragments.
    pub fn joined(&self) -> String {
        self.0.concat()
    }

    /// Check whether there is no text at all.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|f| f.is_empty())
    }
}

impl From<&str> for MultilineString {
    fn from(s: &str) -> Self {
        Self(vec![s.to_string()])
    }
}

impl From<String> for MultilineString {
    fn from(s: String) -> Self {
        Self(vec![s])
    }
}

impl From<Vec<String>> for MultilineString {
    fn from(fragments: Vec<String>) -> Self {
        Self(fragments)
    }
}
