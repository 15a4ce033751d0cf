//! Event-driven tree construction.
//!
//! The builder consumes parse events in arrival order and assembles
//! elements bottom-up on an explicit stack: a start event pushes an empty
//! element, character data accumulates in a pending buffer, and an end
//! event pops the finished element onto its parent (or yields it as the
//! document root once the stack empties).

use std::collections::{BTreeMap, HashMap};

use super::{config::ParserConfig, scope::NamespaceScope};
use crate::{
    error::{Result, StreamError, XmlError, XmlErrorKind},
    event::{RawName, SaxEvent},
    tree::{qname::XML_NAMESPACE, Element, QName},
};

/// Converts a flat event stream into an element tree.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    /// In-progress elements, innermost last
    stack: Vec<Element>,
    /// Consecutive character runs, coalesced until the next tag boundary
    pending_text: String,
    /// Prefix declarations made since the last start event; they belong to
    /// the next element to open
    pending_decls: Vec<(String, String)>,
    /// Bindings currently in scope
    scope: NamespaceScope,
    /// The completed document root, once its end event was seen
    root: Option<Element>,
    config: ParserConfig,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Setter method to configure the builder
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs a whole event stream through a fresh builder and returns the
    /// finished tree.
    pub fn build(events: impl IntoIterator<Item = SaxEvent>) -> Result<Element> {
        let mut builder = Self::new();
        for event in events {
            builder.feed(event)?;
        }
        builder.finish()
    }

    /// Processes one event.
    pub fn feed(&mut self, event: SaxEvent) -> Result<()> {
        match event {
            SaxEvent::StartPrefixMapping { prefix, uri } => {
                self.scope.push(prefix.clone(), uri.clone());
                self.pending_decls.push((prefix, uri));
                Ok(())
            }
            SaxEvent::EndPrefixMapping { prefix } => self.scope.pop(&prefix).map(|_| ()),
            SaxEvent::StartElement { name, attributes } => self.start_element(name, attributes),
            SaxEvent::Characters(text) => {
                self.pending_text.push_str(&text);
                Ok(())
            }
            SaxEvent::EndElement { name } => self.end_element(&name),
        }
    }

    /// Consumes the builder, returning the completed root element.
    pub fn finish(mut self) -> Result<Element> {
        if !self.stack.is_empty() {
            return Err(malformed(format!(
                "input ended with {} unclosed element(s)",
                self.stack.len()
            )));
        }
        self.flush_text()?;
        self.root
            .ok_or_else(|| malformed("input contained no root element".to_string()))
    }

    fn start_element(&mut self, name: RawName, attributes: Vec<(RawName, String)>) -> Result<()> {
        if self.root.is_some() {
            return Err(malformed(format!(
                "start of '{}' after the root element closed",
                name
            )));
        }
        self.flush_text()?;
        self.config.validate_depth(self.stack.len() + 1)?;

        let prefix_bindings: BTreeMap<String, String> = self.pending_decls.drain(..).collect();
        let qname = self.resolve_element_name(&name)?;

        let mut attrs = HashMap::with_capacity(attributes.len());
        for (raw, value) in attributes {
            attrs.insert(self.resolve_attribute_name(&raw)?, value);
        }

        let default_namespace = self.scope.resolve("").map(str::to_string);
        self.stack.push(Element::from_parts(
            qname,
            attrs,
            prefix_bindings,
            default_namespace,
        ));
        Ok(())
    }

    fn end_element(&mut self, name: &RawName) -> Result<()> {
        self.flush_text()?;
        let element = self.stack.pop().ok_or_else(|| {
            XmlError::new(XmlErrorKind::Stream(StreamError::UnbalancedTags(
                name.to_string(),
            )))
        })?;

        let expected = self.resolve_element_name(name)?;
        if element.name() != &expected {
            return Err(malformed(format!(
                "end tag '{}' does not match open element '{}'",
                expected,
                element.name()
            )));
        }

        match self.stack.last_mut() {
            Some(parent) => parent.append_element(element),
            None => self.root = Some(element),
        }
        Ok(())
    }

    /// Attaches buffered character data to the innermost open element.
    /// Whitespace-only runs between tags are discarded, not preserved.
    fn flush_text(&mut self) -> Result<()> {
        if self.pending_text.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.pending_text);
        if text.chars().all(char::is_whitespace) {
            return Ok(());
        }
        match self.stack.last_mut() {
            Some(top) => {
                top.append_text(text);
                Ok(())
            }
            None => Err(malformed(
                "character data outside the root element".to_string(),
            )),
        }
    }

    /// An unprefixed element name falls into the default namespace, when
    /// one is in scope.
    fn resolve_element_name(&self, name: &RawName) -> Result<QName> {
        match &name.prefix {
            Some(prefix) => {
                let uri = self.resolve_prefix(prefix)?;
                Ok(QName::namespaced(uri, name.local.clone()))
            }
            None => Ok(match self.scope.resolve("") {
                Some(default) => QName::namespaced(default, name.local.clone()),
                None => QName::new(name.local.clone()),
            }),
        }
    }

    /// Unprefixed attribute names take no namespace.
    fn resolve_attribute_name(&self, name: &RawName) -> Result<QName> {
        match &name.prefix {
            Some(prefix) => {
                let uri = self.resolve_prefix(prefix)?;
                Ok(QName::namespaced(uri, name.local.clone()))
            }
            None => Ok(QName::new(name.local.clone())),
        }
    }

    fn resolve_prefix(&self, prefix: &str) -> Result<String> {
        // the xml prefix is bound implicitly and never declared
        if prefix == "xml" {
            return Ok(XML_NAMESPACE.to_string());
        }
        self.scope
            .resolve(prefix)
            .map(str::to_string)
            .ok_or_else(|| {
                XmlError::new(XmlErrorKind::Stream(StreamError::UnboundPrefix(
                    prefix.to_string(),
                )))
            })
    }
}

fn malformed(message: String) -> XmlError {
    XmlError::new(XmlErrorKind::Stream(StreamError::MalformedStream(message)))
}
