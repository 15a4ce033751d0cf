#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

#[cfg(test)]
mod parser_tests {
    use zxml::test_utils::*;

    // Basic Parsing Tests
    #[test]
    fn test_parse_empty_root() -> Result<()> {
        let doc = parse("<root/>")?;
        assert_eq!(doc.name(), &QName::new("root"));
        assert!(doc.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_text_content() -> Result<()> {
        let doc = parse("<a>hello</a>")?;
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.node(0)?.as_text(), Some("hello"));
        Ok(())
    }

    #[test]
    fn test_whitespace_only_text_is_discarded() -> Result<()> {
        let doc = parse("<a>\n    <b/>\n    <c/>\n</a>")?;
        assert_eq!(doc.len(), 2);
        assert!(doc.nodes().iter().all(|node| node.as_element().is_some()));
        Ok(())
    }

    #[test]
    fn test_text_with_surrounding_whitespace_is_kept_verbatim() -> Result<()> {
        let doc = parse("<a> x </a>")?;
        assert_eq!(doc.node(0)?.as_text(), Some(" x "));
        Ok(())
    }

    #[test]
    fn test_consecutive_character_runs_coalesce() -> Result<()> {
        // text, CDATA and entity runs arrive as separate events but land in
        // one text child
        let doc = parse("<a>one<![CDATA[ two]]> &amp; three</a>")?;
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.node(0)?.as_text(), Some("one two & three"));
        Ok(())
    }

    #[test]
    fn test_entities_are_decoded() -> Result<()> {
        let doc = parse("<a>a &amp; b &lt; c</a>")?;
        assert_eq!(doc.node(0)?.as_text(), Some("a & b < c"));
        Ok(())
    }

    #[test]
    fn test_attributes() -> Result<()> {
        let doc = parse(r#"<a id="1" name="x &amp; y"/>"#)?;
        assert_eq!(doc.get_attribute("id")?, "1");
        assert_eq!(doc.get_attribute("name")?, "x & y");
        assert_eq!(doc.attributes().len(), 2);
        Ok(())
    }

    // Namespace Tests
    #[test]
    fn test_prefixed_child_scenario() -> Result<()> {
        let doc = parse(r#"<a xmlns:x="urn:x"><x:b id="1">hello</x:b></a>"#)?;

        assert_eq!(doc.name(), &QName::new("a"));
        assert_eq!(doc.len(), 1);

        let child = doc.get_child(("urn:x", "b"))?;
        assert_eq!(child.name(), &QName::namespaced("urn:x", "b"));
        assert_eq!(child.get_attribute("id")?, "1");
        assert_eq!(child.node(0)?.as_text(), Some("hello"));
        Ok(())
    }

    #[test]
    fn test_default_namespace_applies_to_elements() -> Result<()> {
        let doc = parse(r#"<a xmlns="urn:d"><b/></a>"#)?;
        assert_eq!(doc.name(), &QName::namespaced("urn:d", "a"));
        // unqualified lookups resolve through the default namespace
        let child = doc.get_child("b")?;
        assert_eq!(child.name(), &QName::namespaced("urn:d", "b"));
        Ok(())
    }

    #[test]
    fn test_default_namespace_does_not_apply_to_attributes() -> Result<()> {
        let doc = parse(r#"<a xmlns="urn:d" id="1"/>"#)?;
        assert_eq!(doc.get_attribute("id")?, "1");
        assert!(doc.get_attribute(("urn:d", "id")).is_err());
        Ok(())
    }

    #[test]
    fn test_nested_prefix_shadowing() -> Result<()> {
        let doc = parse(
            r#"<a xmlns:p="urn:1"><b xmlns:p="urn:2"><p:c/></b><p:d/></a>"#,
        )?;

        let b = doc.get_child("b")?;
        let c = b.children().next().unwrap();
        assert_eq!(c.name(), &QName::namespaced("urn:2", "c"));

        let d = doc.get_child(("urn:1", "d"))?;
        assert_eq!(d.name(), &QName::namespaced("urn:1", "d"));
        Ok(())
    }

    #[test]
    fn test_xml_prefix_is_predeclared() -> Result<()> {
        let doc = parse(r#"<a xml:lang="en"/>"#)?;
        assert_eq!(doc.get_attribute((XML_NAMESPACE, "lang"))?, "en");
        Ok(())
    }

    #[test]
    fn test_prefix_bindings_recorded_only_where_declared() -> Result<()> {
        let doc = parse(r#"<a xmlns:x="urn:x"><x:b><x:c/></x:b></a>"#)?;
        assert_eq!(doc.prefix_bindings().get("x"), Some(&"urn:x".to_string()));

        let b = doc.get_child(("urn:x", "b"))?;
        assert!(b.prefix_bindings().is_empty());
        Ok(())
    }

    // Event Stream Tests
    #[test]
    fn test_tokenize_event_sequence() -> Result<()> {
        let events = tokenize(r#"<a xmlns:x="urn:x"><x:b/></a>"#)?;
        assert_eq!(
            events,
            vec![
                SaxEvent::StartPrefixMapping {
                    prefix: "x".to_string(),
                    uri: "urn:x".to_string(),
                },
                SaxEvent::StartElement {
                    name: RawName::new("a"),
                    attributes: vec![],
                },
                SaxEvent::StartElement {
                    name: RawName::prefixed("x", "b"),
                    attributes: vec![],
                },
                SaxEvent::EndElement {
                    name: RawName::prefixed("x", "b"),
                },
                SaxEvent::EndElement {
                    name: RawName::new("a"),
                },
                SaxEvent::EndPrefixMapping {
                    prefix: "x".to_string(),
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_build_from_hand_made_events() -> Result<()> {
        let events = vec![
            SaxEvent::StartPrefixMapping {
                prefix: String::new(),
                uri: "urn:d".to_string(),
            },
            SaxEvent::StartElement {
                name: RawName::new("a"),
                attributes: vec![(RawName::new("id"), "7".to_string())],
            },
            SaxEvent::Characters("payload".to_string()),
            SaxEvent::EndElement {
                name: RawName::new("a"),
            },
            SaxEvent::EndPrefixMapping {
                prefix: String::new(),
            },
        ];

        let doc = TreeBuilder::build(events)?;
        assert_eq!(doc.name(), &QName::namespaced("urn:d", "a"));
        assert_eq!(doc.get_attribute("id")?, "7");
        assert_eq!(doc.node(0)?.as_text(), Some("payload"));
        Ok(())
    }

    // Error Tests
    #[test]
    fn test_end_event_without_open_element_is_unbalanced() {
        let events = vec![SaxEvent::EndElement {
            name: RawName::new("a"),
        }];
        let err = TreeBuilder::build(events).unwrap_err();
        match err.kind() {
            XmlErrorKind::Stream(StreamError::UnbalancedTags(_)) => {}
            other => panic!("Expected UnbalancedTags, got {:?}", other),
        }
    }

    #[test]
    fn test_end_prefix_mapping_without_start_underflows() {
        let events = vec![SaxEvent::EndPrefixMapping {
            prefix: "x".to_string(),
        }];
        let err = TreeBuilder::build(events).unwrap_err();
        match err.kind() {
            XmlErrorKind::Stream(StreamError::ScopeUnderflow(_)) => {}
            other => panic!("Expected ScopeUnderflow, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_prefix_is_unbound() {
        let events = vec![SaxEvent::StartElement {
            name: RawName::prefixed("nope", "a"),
            attributes: vec![],
        }];
        let err = TreeBuilder::build(events).unwrap_err();
        match err.kind() {
            XmlErrorKind::Stream(StreamError::UnboundPrefix(prefix)) => {
                assert_eq!(prefix, "nope");
            }
            other => panic!("Expected UnboundPrefix, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_end_name_is_malformed() {
        let events = vec![
            SaxEvent::StartElement {
                name: RawName::new("a"),
                attributes: vec![],
            },
            SaxEvent::EndElement {
                name: RawName::new("b"),
            },
        ];
        let err = TreeBuilder::build(events).unwrap_err();
        match err.kind() {
            XmlErrorKind::Stream(StreamError::MalformedStream(_)) => {}
            other => panic!("Expected MalformedStream, got {:?}", other),
        }
    }

    #[test]
    fn test_events_after_root_closed_are_malformed() {
        let events = vec![
            SaxEvent::StartElement {
                name: RawName::new("a"),
                attributes: vec![],
            },
            SaxEvent::EndElement {
                name: RawName::new("a"),
            },
            SaxEvent::StartElement {
                name: RawName::new("b"),
                attributes: vec![],
            },
        ];
        let err = TreeBuilder::build(events).unwrap_err();
        match err.kind() {
            XmlErrorKind::Stream(StreamError::MalformedStream(_)) => {}
            other => panic!("Expected MalformedStream, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_element_is_malformed() {
        let events = vec![SaxEvent::StartElement {
            name: RawName::new("a"),
            attributes: vec![],
        }];
        let err = TreeBuilder::build(events).unwrap_err();
        match err.kind() {
            XmlErrorKind::Stream(StreamError::MalformedStream(_)) => {}
            other => panic!("Expected MalformedStream, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_has_no_root() {
        let err = parse("").unwrap_err();
        match err.kind() {
            XmlErrorKind::Stream(StreamError::MalformedStream(_)) => {}
            other => panic!("Expected MalformedStream, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_text_input_is_malformed() {
        let err = parse("just text").unwrap_err();
        match err.kind() {
            XmlErrorKind::Stream(StreamError::MalformedStream(_)) => {}
            other => panic!("Expected MalformedStream, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_tags_rejected_by_tokenizer() {
        let err = parse("<a><b></a>").unwrap_err();
        match err.kind() {
            XmlErrorKind::Lexical(_) => {}
            other => panic!("Expected Lexical, got {:?}", other),
        }
    }

    #[test]
    fn test_second_root_rejected() {
        let err = parse("<a/><b/>").unwrap_err();
        match err.kind() {
            XmlErrorKind::Stream(StreamError::MalformedStream(_)) => {}
            other => panic!("Expected MalformedStream, got {:?}", other),
        }
    }

    #[test]
    fn test_prolog_and_misc_are_skipped() -> Result<()> {
        let doc = parse(
            "<?xml version=\"1.0\"?><!-- intro --><a><!-- inner --><b/></a>",
        )?;
        assert_eq!(doc.len(), 1);
        Ok(())
    }

    // Limit Tests
    #[test]
    fn test_depth_limit() {
        let config = ParserConfig {
            max_depth: 5,
            ..ParserConfig::default()
        };
        let err = parse_with_config(&deep_document(10), &config).unwrap_err();
        match err.kind() {
            XmlErrorKind::Security(SecurityError::MaxDepthExceeded) => {}
            other => panic!("Expected MaxDepthExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_depth_within_limit() -> Result<()> {
        let config = ParserConfig {
            max_depth: 10,
            ..ParserConfig::default()
        };
        let doc = parse_with_config(&deep_document(10), &config)?;
        assert_eq!(doc.max_depth(), 9);
        Ok(())
    }

    #[test]
    fn test_size_limit() {
        let config = ParserConfig {
            max_size: 16,
            ..ParserConfig::default()
        };
        let err = parse_with_config(&wide_document(10), &config).unwrap_err();
        match err.kind() {
            XmlErrorKind::Security(SecurityError::MaxSizeExceeded) => {}
            other => panic!("Expected MaxSizeExceeded, got {:?}", other),
        }
    }

    // Byte Input Tests
    #[test]
    fn test_parse_bytes() -> Result<()> {
        let doc = parse_bytes("<a>bytes</a>".as_bytes())?;
        assert_eq!(doc.node(0)?.as_text(), Some("bytes"));
        Ok(())
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let err = parse_bytes(&[0x3c, 0x61, 0xff, 0xfe]).unwrap_err();
        match err.kind() {
            XmlErrorKind::Lexical(LexicalError::InvalidUtf8(_)) => {}
            other => panic!("Expected InvalidUtf8, got {:?}", other),
        }
    }

    #[test]
    fn test_fixture_documents_parse() -> Result<()> {
        assert_eq!(parse(FEED_SAMPLE)?.get_children("entry").len(), 2);
        assert_eq!(parse(MIXED_SAMPLE)?.len(), 3);
        assert!(parse(XHTML_SAMPLE)?.max_depth() >= 2);
        Ok(())
    }
}
