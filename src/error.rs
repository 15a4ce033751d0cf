//! Error handling types for XML tree building and serialization
//!
//! This module provides custom error types that give detailed information
//! about failures, including line and column information where available.

use std::{error::Error, fmt};

/// Main error type for parsing, querying and formatting operations
#[derive(Debug)]
pub struct XmlError {
    /// The specific kind of error
    kind: XmlErrorKind,
    /// Location where the error occurred
    location: Option<Location>,
    /// Source error that caused this error
    source: Option<Box<dyn Error>>,
    /// Additional context for the error
    context: Option<String>,
}

/// Represents a location in the input text
#[derive(Debug, Clone, Copy)]
pub struct Location {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

/// Top-level error categories
#[derive(Debug, Clone)]
pub enum XmlErrorKind {
    IO(IOError),
    Lexical(LexicalError),
    Stream(StreamError),
    Query(QueryError),
    Format(FormatError),
    Security(SecurityError),
}

/// Errors reported at the tokenizer boundary
#[derive(Debug, Clone)]
pub enum LexicalError {
    /// The tokenizer rejected the input
    Tokenizer(String),
    /// Input bytes are not valid UTF-8
    InvalidUtf8(String),
}

/// Event-stream integrity errors raised by the tree builder
#[derive(Debug, Clone)]
pub enum StreamError {
    /// Events violate the expected start/end nesting contract
    MalformedStream(String),
    /// End event with no matching open element
    UnbalancedTags(String),
    /// Prefix end-mapping with no corresponding start-mapping
    ScopeUnderflow(String),
    /// A name refers to a prefix that was never bound
    UnboundPrefix(String),
}

/// Tree-query errors; expected, recoverable lookup misses
#[derive(Debug, Clone)]
pub enum QueryError {
    /// Positional child access outside `[0, len)`
    IndexOutOfRange { index: usize, len: usize },
    /// No child element with the requested qualified name
    NameNotFound(String),
    /// No child element with the requested local name
    NoSuchChild(String),
    /// No attribute with the requested name
    AttributeNotFound(String),
}

/// Serialization errors (strict mode only)
#[derive(Debug, Clone)]
pub enum FormatError {
    /// A namespace URI has no prefix binding in scope
    UnresolvedNamespace(String),
}

/// Defensive limit violations
#[derive(Debug, Clone)]
pub enum SecurityError {
    /// Exceeded maximum depth of element nesting
    MaxDepthExceeded,
    /// Exceeded maximum input size
    MaxSizeExceeded,
}

/// IO operation errors
#[derive(Debug, Clone)]
pub enum IOError {
    /// File not found
    FileNotFound(String),
    /// Permission denied
    PermissionDenied(String),
    /// Error reading from a file
    ReadError(String),
    /// Error writing to a file
    WriteError(String),
}

impl XmlError {
    pub fn new(kind: XmlErrorKind) -> Self {
        Self {
            kind,
            location: None,
            source: None,
            context: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn kind(&self) -> &XmlErrorKind {
        &self.kind
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Derives a line/column position from a byte offset into the input.
    pub fn from_offset(input: &str, offset: usize) -> Self {
        let offset = offset.min(input.len());
        let before = input.get(..offset).unwrap_or(input);
        let line = before.chars().filter(|&c| c == '\n').count() + 1;
        let column = before.chars().rev().take_while(|&c| c != '\n').count() + 1;
        Self { line, column }
    }

    pub fn create_error(self, kind: XmlErrorKind, context: &str) -> XmlError {
        XmlError::new(kind).with_location(self).with_context(context)
    }
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Start with base error description
        let base_error = match &self.kind {
            XmlErrorKind::IO(err) => err.to_string(),
            XmlErrorKind::Lexical(err) => err.to_string(),
            XmlErrorKind::Stream(err) => err.to_string(),
            XmlErrorKind::Query(err) => err.to_string(),
            XmlErrorKind::Format(err) => err.to_string(),
            XmlErrorKind::Security(err) => err.to_string(),
        };

        // Format with location if available
        if let Some(loc) = &self.location {
            write!(
                f,
                "at line {}, column {}: {}",
                loc.line, loc.column, base_error
            )?;
        } else {
            write!(f, "Error: {}", base_error)?;
        }

        // Add context if available
        if let Some(ctx) = &self.context {
            write!(f, "\nContext: {}", ctx)?;
        }

        // Add source if available
        if let Some(source) = &self.source {
            write!(f, "\nCaused by: {}", source)?;
        }

        Ok(())
    }
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tokenizer(msg) => write!(f, "Tokenizer error: {}", msg),
            Self::InvalidUtf8(msg) => write!(f, "Input is not valid UTF-8: {}", msg),
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedStream(msg) => write!(f, "Malformed event stream: {}", msg),
            Self::UnbalancedTags(name) => {
                write!(f, "End tag '{}' has no matching open element", name)
            }
            Self::ScopeUnderflow(prefix) => {
                write!(f, "Prefix '{}' unmapped without a matching mapping", prefix)
            }
            Self::UnboundPrefix(prefix) => write!(f, "Prefix '{}' is not bound in scope", prefix),
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "Child index {} out of range for {} children", index, len)
            }
            Self::NameNotFound(name) => write!(f, "No child element named {}", name),
            Self::NoSuchChild(name) => write!(f, "No child element named '{}'", name),
            Self::AttributeNotFound(name) => write!(f, "No attribute named {}", name),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedNamespace(uri) => {
                write!(f, "Namespace '{}' has no prefix binding in scope", uri)
            }
        }
    }
}

impl fmt::Display for SecurityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxDepthExceeded => write!(f, "Maximum element nesting depth exceeded"),
            Self::MaxSizeExceeded => write!(f, "Maximum input size exceeded"),
        }
    }
}

impl fmt::Display for IOError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound(path) => write!(f, "File not found: {}", path),
            Self::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            Self::ReadError(msg) => write!(f, "Read error: {}", msg),
            Self::WriteError(msg) => write!(f, "Write error: {}", msg),
        }
    }
}

impl Error for XmlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(Box::as_ref)
    }
}

pub type Result<T> = std::result::Result<T, XmlError>;
