//! The mutable element tree: mixed text/element children, attributes and
//! the namespace declarations recorded during building.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::Range;

use super::qname::QName;
use crate::error::{QueryError, Result, XmlError, XmlErrorKind};
use crate::formatter::{FormatConfig, XmlFormatter};

/// One entry in an element's child sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A run of character data.
    Text(String),
    /// A nested element.
    Element(Element),
}

impl Node {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Text(_) => None,
            Self::Element(element) => Some(element),
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Text(_) => None,
            Self::Element(element) => Some(element),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// A single XML element.
///
/// Created empty when its start event is observed, filled while its events
/// are processed, and freely mutable afterwards through the typed accessor
/// API. `prefix_bindings` holds only the namespace declarations physically
/// introduced at this node; inherited bindings stay with the ancestors.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: QName,
    attributes: HashMap<QName, String>,
    children: Vec<Node>,
    prefix_bindings: BTreeMap<String, String>,
    default_namespace: Option<String>,
}

impl Element {
    /// Creates an empty element. An unqualified `name` stays unqualified;
    /// it is not resolved against any namespace.
    pub fn new(name: impl Into<QName>) -> Self {
        Self {
            name: name.into(),
            attributes: HashMap::new(),
            children: Vec::new(),
            prefix_bindings: BTreeMap::new(),
            default_namespace: None,
        }
    }

    pub(crate) fn from_parts(
        name: QName,
        attributes: HashMap<QName, String>,
        prefix_bindings: BTreeMap<String, String>,
        default_namespace: Option<String>,
    ) -> Self {
        Self {
            name,
            attributes,
            children: Vec::new(),
            prefix_bindings,
            default_namespace,
        }
    }

    pub fn name(&self) -> &QName {
        &self.name
    }

    /// Namespace declarations introduced at this node (prefix to URI; the
    /// empty prefix is the default-namespace declaration).
    pub fn prefix_bindings(&self) -> &BTreeMap<String, String> {
        &self.prefix_bindings
    }

    /// The URI bound to the empty prefix in scope at this node, used to
    /// resolve unqualified child lookups.
    pub fn default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Records a namespace declaration on this node, as if `xmlns[:prefix]`
    /// had been written on its start tag. An empty prefix also updates the
    /// default namespace used for unqualified lookups.
    pub fn declare_prefix(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        let prefix = prefix.into();
        let uri = uri.into();
        if prefix.is_empty() {
            self.default_namespace = Some(uri.clone());
        }
        self.prefix_bindings.insert(prefix, uri);
    }

    /// Resolves an unqualified name through the default namespace, exactly
    /// like the convenience accessors do.
    fn resolve_name(&self, name: QName) -> QName {
        match (&name.namespace, &self.default_namespace) {
            (None, Some(default)) => QName::namespaced(default.clone(), name.local),
            _ => name,
        }
    }

    // ------------------------------------------------------------------
    // Positional access
    // ------------------------------------------------------------------

    /// Number of direct children, mixed text and element.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// All direct children in document order.
    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// The i-th child.
    pub fn node(&self, index: usize) -> Result<&Node> {
        let len = self.children.len();
        self.children.get(index).ok_or_else(|| {
            XmlError::new(XmlErrorKind::Query(QueryError::IndexOutOfRange { index, len }))
        })
    }

    pub fn node_mut(&mut self, index: usize) -> Result<&mut Node> {
        let len = self.children.len();
        self.children.get_mut(index).ok_or_else(|| {
            XmlError::new(XmlErrorKind::Query(QueryError::IndexOutOfRange { index, len }))
        })
    }

    /// The sub-sequence of children in `range`.
    pub fn node_range(&self, range: Range<usize>) -> Result<&[Node]> {
        let len = self.children.len();
        let end = range.end;
        self.children.get(range).ok_or_else(|| {
            XmlError::new(XmlErrorKind::Query(QueryError::IndexOutOfRange { index: end, len }))
        })
    }

    /// Removes and returns the i-th child.
    pub fn remove_node(&mut self, index: usize) -> Result<Node> {
        let len = self.children.len();
        if index >= len {
            return Err(XmlError::new(XmlErrorKind::Query(
                QueryError::IndexOutOfRange { index, len },
            )));
        }
        Ok(self.children.remove(index))
    }

    // ------------------------------------------------------------------
    // Access by name
    // ------------------------------------------------------------------

    /// The first child element with the given name. An unqualified name is
    /// resolved through the default namespace before matching.
    pub fn get_child<N: Into<QName>>(&self, name: N) -> Result<&Element> {
        let name = self.resolve_name(name.into());
        self.children
            .iter()
            .filter_map(Node::as_element)
            .find(|element| element.name == name)
            .ok_or_else(|| {
                XmlError::new(XmlErrorKind::Query(QueryError::NameNotFound(name.to_string())))
            })
    }

    pub fn get_child_mut<N: Into<QName>>(&mut self, name: N) -> Result<&mut Element> {
        let name = self.resolve_name(name.into());
        self.children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find(|element| element.name == name)
            .ok_or_else(|| {
                XmlError::new(XmlErrorKind::Query(QueryError::NameNotFound(name.to_string())))
            })
    }

    /// Convenience lookup by bare local name, resolved like [`get_child`].
    ///
    /// [`get_child`]: Self::get_child
    pub fn child(&self, local: &str) -> Result<&Element> {
        self.get_child(local).map_err(|_| {
            XmlError::new(XmlErrorKind::Query(QueryError::NoSuchChild(local.to_string())))
        })
    }

    /// Every child element with the given name, in document order.
    pub fn get_children<N: Into<QName>>(&self, name: N) -> Vec<&Element> {
        let name = self.resolve_name(name.into());
        self.children
            .iter()
            .filter_map(Node::as_element)
            .filter(|element| element.name == name)
            .collect()
    }

    /// All child elements regardless of name, skipping text children.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Replaces the first child element named `name` with a new element
    /// wrapping `value` as its sole child, removes every other match, and
    /// appends instead when nothing matched. A named slot stays singular
    /// unless grown explicitly through [`append_child`].
    ///
    /// [`append_child`]: Self::append_child
    pub fn set_child<N: Into<QName>>(&mut self, name: N, value: impl Into<Node>) {
        let name = self.resolve_name(name.into());
        let mut wrapper = Element::new(name.clone());
        wrapper.append_node(value.into());

        let mut replacement = Some(wrapper);
        let mut kept = Vec::with_capacity(self.children.len());
        for node in self.children.drain(..) {
            match node {
                Node::Element(element) if element.name == name => {
                    if let Some(wrapper) = replacement.take() {
                        kept.push(Node::Element(wrapper));
                    }
                }
                other => kept.push(other),
            }
        }
        if let Some(wrapper) = replacement {
            kept.push(Node::Element(wrapper));
        }
        self.children = kept;
    }

    /// Unconditionally appends a new empty child element named `name`,
    /// regardless of existing matches, and returns it for population.
    pub fn append_child<N: Into<QName>>(&mut self, name: N) -> &mut Element {
        let name = self.resolve_name(name.into());
        self.children.push(Node::Element(Element::new(name)));
        if let Some(Node::Element(element)) = self.children.last_mut() {
            element
        } else {
            unreachable!("an element child was just pushed")
        }
    }

    /// Removes the first child element named `name`, returning it; `None`
    /// when nothing matched.
    pub fn remove_child<N: Into<QName>>(&mut self, name: N) -> Option<Element> {
        let name = self.resolve_name(name.into());
        let position = self
            .children
            .iter()
            .position(|node| matches!(node, Node::Element(element) if element.name == name))?;
        match self.children.remove(position) {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Removes every child element named `name`, returning how many were
    /// removed.
    pub fn remove_children<N: Into<QName>>(&mut self, name: N) -> usize {
        let name = self.resolve_name(name.into());
        let before = self.children.len();
        self.children
            .retain(|node| !matches!(node, Node::Element(element) if element.name == name));
        before - self.children.len()
    }

    // ------------------------------------------------------------------
    // Appending content
    // ------------------------------------------------------------------

    /// Appends character data, coalescing with a trailing text child so the
    /// sequence never holds two consecutive text entries.
    pub fn append_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(&text);
        } else {
            self.children.push(Node::Text(text));
        }
    }

    /// Appends a child node, routing text through [`append_text`].
    ///
    /// [`append_text`]: Self::append_text
    pub fn append_node(&mut self, node: Node) {
        match node {
            Node::Text(text) => self.append_text(text),
            Node::Element(element) => self.children.push(Node::Element(element)),
        }
    }

    pub fn append_element(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// The full attribute mapping, values as raw unescaped text.
    pub fn attributes(&self) -> &HashMap<QName, String> {
        &self.attributes
    }

    /// One attribute value. Attribute names are never resolved through the
    /// default namespace; an unqualified lookup matches an unqualified
    /// attribute.
    pub fn get_attribute<N: Into<QName>>(&self, name: N) -> Result<&str> {
        let name = name.into();
        self.attributes.get(&name).map(String::as_str).ok_or_else(|| {
            XmlError::new(XmlErrorKind::Query(QueryError::AttributeNotFound(
                name.to_string(),
            )))
        })
    }

    pub fn set_attribute<N: Into<QName>>(&mut self, name: N, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Sets several attributes at once.
    pub fn set_attributes<N, V>(&mut self, pairs: impl IntoIterator<Item = (N, V)>)
    where
        N: Into<QName>,
        V: Into<String>,
    {
        for (name, value) in pairs {
            self.set_attribute(name, value);
        }
    }

    // ------------------------------------------------------------------
    // Derived queries
    // ------------------------------------------------------------------

    /// Number of nested element levels below this node: 0 for a node with
    /// no element children, otherwise one more than the deepest child,
    /// ignoring text children.
    pub fn max_depth(&self) -> usize {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .map(|element| element.max_depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// All text content of the subtree, concatenated in document order and
    /// whitespace-normalized (runs of whitespace collapse to single spaces,
    /// outer whitespace trimmed).
    pub fn text(&self) -> String {
        let mut raw = String::new();
        for node in &self.children {
            match node {
                Node::Text(text) => raw.push_str(text),
                Node::Element(element) => raw.push_str(&element.text()),
            }
        }
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Compact single-line serialization.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered =
            XmlFormatter::format(self, &FormatConfig::default()).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}
