#![allow(clippy::unwrap_used)]
#![allow(clippy::as_conversions)]
#![allow(clippy::panic)]

use proptest::{collection::vec, prelude::*};

use zxml::test_utils::*;

// Strategy for element and attribute names that can never collide with
// xmlns declarations
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-m][a-z0-9]{0,7}"
}

// Strategy for text content; whitespace-only runs are discarded by the
// builder, so require at least one visible character
fn text_strategy() -> impl Strategy<Value = String> {
    "[ -~]{1,40}".prop_filter("not whitespace-only", |s| !s.trim().is_empty())
}

proptest! {
    // Escaping Tests
    #[test]
    fn test_text_roundtrip(text in text_strategy()) {
        let mut doc = Element::new("a");
        doc.append_text(text.clone());

        let rendered = serialize(&doc, false).unwrap();
        let reparsed = parse(&rendered).unwrap();

        prop_assert_eq!(reparsed.node(0).unwrap().as_text(), Some(text.as_str()));
    }

    #[test]
    fn test_attribute_value_roundtrip(name in name_strategy(), value in "[ -~]{0,40}") {
        let mut doc = Element::new("a");
        doc.set_attribute(name.as_str(), value.clone());

        let rendered = serialize(&doc, false).unwrap();
        let reparsed = parse(&rendered).unwrap();

        prop_assert_eq!(reparsed.get_attribute(name.as_str()).unwrap(), value.as_str());
    }

    // Tree Round-trip Tests
    #[test]
    fn test_flat_tree_roundtrip(
        names in vec(name_strategy(), 0..8),
        texts in vec(text_strategy(), 0..8)
    ) {
        let mut doc = Element::new("root");
        for (i, name) in names.iter().enumerate() {
            let child = doc.append_child(name.as_str());
            if let Some(text) = texts.get(i) {
                child.append_text(text.clone());
            }
        }

        let compact = parse(&serialize(&doc, false).unwrap()).unwrap();
        prop_assert_eq!(&compact, &doc);
    }

    #[test]
    fn test_nested_tree_roundtrip(
        names in vec(name_strategy(), 1..6),
        attr_value in "[ -~]{0,20}"
    ) {
        // build the chain from the leaf outward
        let mut chain: Option<Element> = None;
        for name in names.iter().rev() {
            let mut parent = Element::new(name.as_str());
            match chain.take() {
                Some(child) => parent.append_element(child),
                None => parent.set_attribute("leaf", attr_value.clone()),
            }
            chain = Some(parent);
        }
        let mut doc = Element::new("root");
        if let Some(chain) = chain {
            doc.append_element(chain);
        }

        let reparsed = parse(&serialize(&doc, false).unwrap()).unwrap();
        prop_assert_eq!(&reparsed, &doc);
        prop_assert_eq!(reparsed.max_depth(), names.len());
    }

    // Mutation Invariant Tests
    #[test]
    fn test_set_child_keeps_exactly_one(
        existing in 0usize..6,
        value in text_strategy()
    ) {
        let mut doc = Element::new("root");
        for _ in 0..existing {
            doc.append_child("slot");
        }

        doc.set_child("slot", value.as_str());
        prop_assert_eq!(doc.get_children("slot").len(), 1);
    }

    #[test]
    fn test_append_child_grows_by_one(existing in 0usize..6) {
        let mut doc = Element::new("root");
        for _ in 0..existing {
            doc.append_child("slot");
        }

        doc.append_child("slot");
        prop_assert_eq!(doc.get_children("slot").len(), existing + 1);
    }

    #[test]
    fn test_remove_children_removes_every_match(existing in 0usize..6) {
        let mut doc = Element::new("root");
        for _ in 0..existing {
            doc.append_child("slot");
        }
        doc.append_child("other");

        prop_assert_eq!(doc.remove_children("slot"), existing);
        prop_assert_eq!(doc.get_children("slot").len(), 0);
        prop_assert_eq!(doc.get_children("other").len(), 1);
    }

    // Depth Tests
    #[test]
    fn test_chain_depth(levels in 0usize..12) {
        let mut doc = Element::new("root");
        for _ in 0..levels {
            let mut wrapper = Element::new("next");
            std::mem::swap(&mut doc, &mut wrapper);
            doc.append_element(wrapper);
        }
        prop_assert_eq!(doc.max_depth(), levels);
    }

    // CDATA Policy Tests
    #[test]
    fn test_serialized_text_always_reparses(text in "[ -~]{1,80}") {
        prop_assume!(!text.trim().is_empty());

        let mut doc = Element::new("a");
        doc.append_text(text.clone());

        let rendered = serialize(&doc, false).unwrap();
        let reparsed = parse(&rendered).unwrap();
        prop_assert_eq!(reparsed.node(0).unwrap().as_text(), Some(text.as_str()));
    }
}
