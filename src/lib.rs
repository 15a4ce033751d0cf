//! zxml: namespace-aware XML document trees built from SAX events
//!
//! This crate provides functionality to:
//! - Build an in-memory element tree from a stream of SAX parse events
//! - Query and mutate the tree through a typed accessor API
//! - Re-serialize the tree to XML text, reconciling namespace prefixes
//! - Handle errors with detailed context
//!
//! # Examples
//! ```
//! use zxml::{parse, serialize, Result};
//!
//! fn example() -> Result<()> {
//!     let doc = parse("<a xmlns:x=\"urn:x\"><x:b id=\"1\">hello</x:b></a>")?;
//!     let child = doc.get_child(("urn:x", "b"))?;
//!     assert_eq!(child.get_attribute("id")?, "1");
//!     println!("{}", serialize(&doc, false)?);
//!     Ok(())
//! }
//! ```

use tracing::{debug, info, instrument};

pub mod error;
pub mod event;
pub mod formatter;
pub mod parser;
pub mod test_utils;
pub mod tree;
pub mod utils;

// Re-exports
pub use error::{Result, XmlError, XmlErrorKind};
pub use event::{RawName, SaxEvent};
pub use formatter::{FormatConfig, XmlFormatter};
pub use parser::{NamespaceScope, ParserConfig, SaxReader, TreeBuilder};
pub use tree::{Element, Namespace, Node, QName};

use error::{IOError, LexicalError};

/// Parses XML text into an element tree.
///
/// Whitespace-only text between tags is discarded, so documents relying on
/// preserved inter-tag whitespace will not round-trip byte-identically.
#[instrument(skip(text))]
pub fn parse(text: &str) -> Result<Element> {
    parse_with_config(text, &ParserConfig::default())
}

/// Parses with explicit limits.
pub fn parse_with_config(text: &str, config: &ParserConfig) -> Result<Element> {
    config.validate_input_size(text.len())?;

    debug!("tokenizing {} bytes of input", text.len());
    let mut reader = SaxReader::new(text);
    let mut builder = TreeBuilder::new().with_config(config.clone());
    while let Some(event) = reader.next_event()? {
        builder.feed(event)?;
    }
    builder.finish()
}

/// Parses raw bytes, which must decode as UTF-8.
pub fn parse_bytes(bytes: &[u8]) -> Result<Element> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        XmlError::new(XmlErrorKind::Lexical(LexicalError::InvalidUtf8(
            e.to_string(),
        )))
    })?;
    parse(text)
}

/// Reads and parses an XML file.
#[instrument]
pub fn parse_file(path: &str) -> Result<Element> {
    debug!("Starting to parse file: {}", path);

    let content = std::fs::read_to_string(path)
        .map_err(|e| XmlError::new(XmlErrorKind::IO(IOError::ReadError(e.to_string()))))?;

    info!("File read successfully, building tree");
    parse(&content)
}

/// Serializes an element tree back to XML text. `multiline` indents child
/// elements onto new lines with one tab per depth level.
pub fn serialize(element: &Element, multiline: bool) -> Result<String> {
    XmlFormatter::format(
        element,
        &FormatConfig {
            multiline,
            strict: false,
        },
    )
}
