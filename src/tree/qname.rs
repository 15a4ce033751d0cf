//! Qualified names: an optional namespace URI plus a local name.

use std::fmt;

/// The namespace bound to the reserved `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Identifies an element or attribute. Two qualified names are equal iff
/// both the namespace URI and the local name are equal; an unqualified name
/// carries no namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    /// Creates an unqualified name.
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local: local.into(),
        }
    }

    /// Creates a name qualified by a namespace URI.
    pub fn namespaced(uri: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: Some(uri.into()),
            local: local.into(),
        }
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

/// Clark notation: `{uri}local`, or just `local` when unqualified.
impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(uri) => write!(f, "{{{}}}{}", uri, self.local),
            None => f.write_str(&self.local),
        }
    }
}

impl From<&str> for QName {
    fn from(local: &str) -> Self {
        Self::new(local)
    }
}

impl From<String> for QName {
    fn from(local: String) -> Self {
        Self::new(local)
    }
}

impl From<(&str, &str)> for QName {
    fn from((uri, local): (&str, &str)) -> Self {
        Self::namespaced(uri, local)
    }
}

impl From<(String, String)> for QName {
    fn from((uri, local): (String, String)) -> Self {
        Self::namespaced(uri, local)
    }
}

/// Factory for qualified names within one namespace.
///
/// ```
/// use zxml::Namespace;
///
/// let xhtml = Namespace::new("http://www.w3.org/1999/xhtml");
/// let img = xhtml.name("img");
/// assert_eq!(img.namespace(), Some("http://www.w3.org/1999/xhtml"));
/// ```
#[derive(Debug, Clone)]
pub struct Namespace {
    uri: String,
}

impl Namespace {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn name(&self, local: impl Into<String>) -> QName {
        QName::namespaced(self.uri.clone(), local)
    }
}
