//! SAX event model consumed by the tree builder.
//!
//! Events arrive in document order from an external tokenizer: prefix
//! mappings are delivered separately from element boundaries, with the
//! mappings for an element emitted immediately before its start event and
//! unmapped immediately after its end event.

use std::fmt;

/// A raw element or attribute name as written in the document: an optional
/// prefix plus a local name. Prefix resolution against the namespace scope
/// happens in the builder, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawName {
    pub prefix: Option<String>,
    pub local: String,
}

impl RawName {
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
        }
    }

    pub fn prefixed(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            local: local.into(),
        }
    }
}

impl fmt::Display for RawName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// One parse event from the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaxEvent {
    /// A namespace declaration came into scope; `prefix` is empty for the
    /// default namespace.
    StartPrefixMapping { prefix: String, uri: String },
    /// The most recent declaration for `prefix` went out of scope.
    EndPrefixMapping { prefix: String },
    /// An element opened, carrying its non-namespace attributes.
    StartElement {
        name: RawName,
        attributes: Vec<(RawName, String)>,
    },
    /// A run of character data; consecutive runs are coalesced by the builder.
    Characters(String),
    /// An element closed.
    EndElement { name: RawName },
}
