//! Shared fixtures and helpers for integration tests and benches.

use std::{env, fs, path::PathBuf};

// Re-export common test types/traits
pub use crate::{
    error::{
        FormatError, IOError, LexicalError, Location, QueryError, Result, SecurityError,
        StreamError, XmlError, XmlErrorKind,
    },
    event::{RawName, SaxEvent},
    formatter::{escape_attribute, escape_text, wants_cdata, FormatConfig, XmlFormatter},
    parse, parse_bytes, parse_file, parse_with_config,
    parser::{
        config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE},
        tokenize, NamespaceScope, ParserConfig, SaxReader, TreeBuilder,
    },
    serialize,
    tree::{qname::XML_NAMESPACE, Element, Namespace, Node, QName},
    utils::{format_xml, format_xml_multiline, read_file, write_file},
};

pub fn tmp_file_path(name: &str) -> PathBuf {
    let mut dir = env::temp_dir();
    dir.push("zxml_tests");
    let _ = fs::create_dir_all(&dir);
    dir.push(name);
    dir
}

/// A namespaced feed-like document exercising prefixes, a default
/// namespace, attributes and mixed content.
pub const FEED_SAMPLE: &str = r#"<feed xmlns="urn:feed" xmlns:m="urn:meta">
    <title>Release notes</title>
    <entry id="1">
        <m:author>ada</m:author>
        <summary>First entry</summary>
    </entry>
    <entry id="2">
        <m:author>grace</m:author>
        <summary>Second entry</summary>
    </entry>
</feed>"#;

/// An XHTML fragment containing void elements.
pub const XHTML_SAMPLE: &str = r#"<html xmlns="http://www.w3.org/1999/xhtml">
    <head>
        <meta charset="utf-8"/>
        <title>Void elements</title>
    </head>
    <body>
        <p>before<br/>after</p>
        <img src="logo.png" alt="logo"/>
    </body>
</html>"#;

/// Mixed text and element content with entities and CDATA.
pub const MIXED_SAMPLE: &str =
    "<doc><p>one &amp; two</p>tail text<p><![CDATA[literal <markup> kept verbatim]]></p></doc>";

/// Generates a flat document with `entries` identical children, for size
/// scaling in benches.
pub fn wide_document(entries: usize) -> String {
    let mut out = String::from("<items>");
    for i in 0..entries {
        out.push_str(&format!(
            "<item id=\"{}\"><name>item {}</name><note>plain text body</note></item>",
            i, i
        ));
    }
    out.push_str("</items>");
    out
}

/// Generates a document nested `levels` deep.
pub fn deep_document(levels: usize) -> String {
    let mut out = String::new();
    for i in 0..levels {
        out.push_str(&format!("<level{}>", i));
    }
    out.push_str("core");
    for i in (0..levels).rev() {
        out.push_str(&format!("</level{}>", i));
    }
    out
}
