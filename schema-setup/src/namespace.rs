//! Two-segment namespace used to scope the generated setup class

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between the vendor and area segments
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Namespace used whenever the caller's input is not a valid namespace
pub const DEFAULT_NAMESPACE: &str = "Vendor\\Area";

/// A `Vendor\Area` namespace.
///
/// Values are only ever built through [`Namespace::sanitize`], so a
/// `Namespace` is either the caller's valid input or [`DEFAULT_NAMESPACE`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    /// Keep `input` if it is a namespace, fall back to the default otherwise
    pub fn sanitize(input: &str) -> Self {
        if is_namespace(input) {
            Namespace(input.to_string())
        } else {
            Namespace::default()
        }
    }

    /// Whether this is the fallback namespace
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_NAMESPACE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First segment (`Vendor`)
    pub fn vendor(&self) -> &str {
        self.split().0
    }

    /// Second segment (`Area`)
    pub fn area(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        self.0
            .split_once(NAMESPACE_SEPARATOR)
            .unwrap_or((self.0.as_str(), ""))
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Namespace(DEFAULT_NAMESPACE.to_string())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Namespace {
    fn from(value: String) -> Self {
        Namespace::sanitize(&value)
    }
}

impl From<Namespace> for String {
    fn from(value: Namespace) -> Self {
        value.0
    }
}

/// Check that `input` is non-empty and splits into exactly two segments.
///
/// Segment contents are not checked: `"\Foo"` and `"Foo\"` both pass.
pub fn is_namespace(input: &str) -> bool {
    !input.is_empty() && input.split(NAMESPACE_SEPARATOR).count() == 2
}
