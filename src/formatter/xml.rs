//! Recursive XML writer.
//!
//! Walks an element tree and regenerates XML text, resolving each qualified
//! name back to a prefixed or unprefixed form relative to the namespaces
//! already in scope and re-declaring only bindings not yet visible.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::{escape_attribute, is_void_element, quote_text, FormatConfig};
use crate::{
    error::{FormatError, Result, XmlError, XmlErrorKind},
    tree::{qname::XML_NAMESPACE, Element, Node, QName},
};

pub struct XmlFormatter;

impl XmlFormatter {
    /// Serializes an element tree to XML text. Both compact and multiline
    /// output are semantically equivalent once re-parsed.
    pub fn format(element: &Element, config: &FormatConfig) -> Result<String> {
        let mut inherited = BTreeMap::new();
        inherited.insert("xml".to_string(), XML_NAMESPACE.to_string());

        let mut out = String::new();
        Self::write_element(&mut out, element, 1, &inherited, config)?;
        Ok(out)
    }

    fn write_element(
        out: &mut String,
        element: &Element,
        depth: usize,
        inherited: &BTreeMap<String, String>,
        config: &FormatConfig,
    ) -> Result<()> {
        // Only bindings not already visible are re-declared; the merged
        // scope carries into the children.
        let mut scope = inherited.clone();
        let mut introduced: Vec<(&String, &String)> = Vec::new();
        for (prefix, uri) in element.prefix_bindings() {
            if inherited.get(prefix) != Some(uri) {
                introduced.push((prefix, uri));
                scope.insert(prefix.clone(), uri.clone());
            }
        }

        out.push('<');
        out.push_str(&Self::render_name(element.name(), &scope, config)?);

        // prefix_bindings iterates sorted by prefix, the default
        // declaration first
        for (prefix, uri) in &introduced {
            out.push_str(" xmlns");
            if !prefix.is_empty() {
                out.push(':');
                out.push_str(prefix);
            }
            let _ = write!(out, "=\"{}\"", escape_attribute(uri));
        }

        let mut attributes = element
            .attributes()
            .iter()
            .map(|(name, value)| {
                Self::render_name(name, &scope, config).map(|rendered| (rendered, value.as_str()))
            })
            .collect::<Result<Vec<_>>>()?;
        attributes.sort();
        for (name, value) in attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape_attribute(value));
        }

        if element.is_empty() && is_void_element(element.name()) {
            out.push_str(" />");
            return Ok(());
        }

        out.push('>');

        let has_element_content = element
            .nodes()
            .iter()
            .any(|node| matches!(node, Node::Element(_)));
        let pad = (config.multiline && has_element_content)
            .then(|| format!("\n{}", "\t".repeat(depth)));

        for node in element.nodes() {
            if let Some(pad) = &pad {
                out.push_str(pad);
            }
            match node {
                Node::Text(text) => out.push_str(&quote_text(text)),
                Node::Element(child) => {
                    Self::write_element(out, child, depth + 1, &scope, config)?;
                }
            }
        }
        if pad.is_some() {
            out.push('\n');
            out.push_str(&"\t".repeat(depth - 1));
        }

        let _ = write!(
            out,
            "</{}>",
            Self::render_name(element.name(), &scope, config)?
        );
        Ok(())
    }

    /// Renders a qualified name relative to the bindings in scope: a bound
    /// non-empty prefix wins, then the default namespace (unprefixed), then
    /// the bare local name as a best-effort fallback. Strict mode turns the
    /// fallback into an error.
    fn render_name(
        name: &QName,
        scope: &BTreeMap<String, String>,
        config: &FormatConfig,
    ) -> Result<String> {
        let Some(uri) = name.namespace() else {
            return Ok(name.local().to_string());
        };
        // scope iterates sorted, so the smallest prefix wins when several
        // bind the same URI
        for (prefix, bound) in scope {
            if !prefix.is_empty() && bound == uri {
                return Ok(format!("{}:{}", prefix, name.local()));
            }
        }
        if scope.get("").map(String::as_str) == Some(uri) {
            return Ok(name.local().to_string());
        }
        if config.strict {
            return Err(XmlError::new(XmlErrorKind::Format(
                FormatError::UnresolvedNamespace(uri.to_string()),
            )));
        }
        Ok(name.local().to_string())
    }
}
