//! Serialization policy shared by the XML writer: escaping rules, the
//! CDATA heuristic, and the void-element table.

mod xml;

pub use self::xml::XmlFormatter;

use crate::tree::QName;

/// Configuration options for serialization
#[derive(Debug, Clone, Default)]
pub struct FormatConfig {
    /// Indent child elements onto new lines, one tab per depth level
    pub multiline: bool,
    /// Error on a namespace URI with no binding in scope instead of
    /// falling back to the bare local name
    pub strict: bool,
}

pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Element types that never have content and are always rendered
/// self-closing, keyed by namespace URI.
pub fn is_void_element(name: &QName) -> bool {
    match name.namespace() {
        Some(uri) if uri == XHTML_NAMESPACE => matches!(
            name.local(),
            "img" | "br" | "hr" | "meta" | "link" | "base" | "param" | "input" | "col" | "area"
        ),
        _ => false,
    }
}

/// Escapes character data for element content: `&`, `<`, and a literal
/// `]]>` sequence. Quotes are left alone in text context.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace("]]>", "]]&gt;")
}

/// Escapes a value for attribute context: text escaping plus `"`.
pub fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

/// Long markup-like text reads better wrapped verbatim in a CDATA section
/// than entity-escaped: text containing `<`, longer than 24 characters and
/// free of `]]>` (which would terminate the section) qualifies.
pub fn wants_cdata(text: &str) -> bool {
    text.contains('<') && text.chars().count() > 24 && !text.contains("]]>")
}

/// Renders one text child, choosing between CDATA and entity escaping.
pub(crate) fn quote_text(text: &str) -> String {
    if wants_cdata(text) {
        format!("<![CDATA[{}]]>", text)
    } else {
        escape_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cdata_wants_markup_over_threshold() {
        // 30 characters with markup qualifies
        assert!(wants_cdata("<p>some markup text here</p>42"));
        // short markup does not
        assert!(!wants_cdata("a < b"));
        // a CDATA terminator disqualifies regardless of length
        assert!(!wants_cdata("<p>text that contains ]]> inside</p>"));
        // long plain text without markup does not
        assert!(!wants_cdata("plain text without any markup at all"));
    }

    #[test]
    fn text_escaping_keeps_quotes() {
        assert_eq!(escape_text(r#"a & b < "c" ]]>"#), r#"a &amp; b &lt; "c" ]]&gt;"#);
    }

    #[test]
    fn attribute_escaping_covers_quotes() {
        assert_eq!(escape_attribute(r#"say "hi" & go"#), "say &quot;hi&quot; &amp; go");
    }
}
