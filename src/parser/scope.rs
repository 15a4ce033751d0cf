//! Stack-based namespace scope tracking.
//!
//! SAX delivers prefix mappings as separate begin/end events decoupled from
//! element boundaries, so the current bindings are kept as a stack per
//! prefix: nested redeclarations of the same prefix shadow outer ones and
//! revert on exit.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, StreamError, XmlError, XmlErrorKind};

/// The prefix-to-URI bindings currently in effect, one stack per prefix.
/// The empty string is the default-namespace prefix.
#[derive(Debug, Default)]
pub struct NamespaceScope {
    bindings: HashMap<String, Vec<String>>,
}

impl NamespaceScope {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Brings a binding into scope, shadowing any outer binding for the
    /// same prefix.
    pub fn push(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        self.bindings
            .entry(prefix.into())
            .or_default()
            .push(uri.into());
    }

    /// Removes the most recent binding for `prefix`, returning the URI it
    /// was bound to. Each push must be popped exactly once, matching XML's
    /// well-formed nesting.
    pub fn pop(&mut self, prefix: &str) -> Result<String> {
        let stack = self.bindings.get_mut(prefix).ok_or_else(|| {
            XmlError::new(XmlErrorKind::Stream(StreamError::ScopeUnderflow(
                prefix.to_string(),
            )))
        })?;
        let uri = stack.pop().ok_or_else(|| {
            XmlError::new(XmlErrorKind::Stream(StreamError::ScopeUnderflow(
                prefix.to_string(),
            )))
        })?;
        if stack.is_empty() {
            self.bindings.remove(prefix);
        }
        Ok(uri)
    }

    /// The innermost binding for `prefix`, if any.
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.bindings
            .get(prefix)
            .and_then(|stack| stack.last())
            .map(String::as_str)
    }

    /// The top-of-stack binding for every prefix, used to stamp a newly
    /// created element with the bindings in effect at its opening tag.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.bindings
            .iter()
            .filter_map(|(prefix, stack)| stack.last().map(|uri| (prefix.clone(), uri.clone())))
            .collect()
    }
}
