//! Adapter over the external tokenizer.
//!
//! quick-xml owns tokenization, entity expansion and well-formedness
//! checking; this module reshapes its events into the SAX model the builder
//! consumes. Namespace declarations written as `xmlns`/`xmlns:p` attributes
//! become prefix-mapping events bracketing the element that carries them,
//! and prolog/misc events (declaration, doctype, comments, processing
//! instructions) are dropped.

use std::collections::VecDeque;

use quick_xml::{
    events::{BytesStart, Event},
    name::PrefixDeclaration,
    Reader,
};

use crate::{
    error::{LexicalError, Location, Result, XmlError, XmlErrorKind},
    event::{RawName, SaxEvent},
};

/// Pull-based source of [`SaxEvent`]s for one input document.
pub struct SaxReader<'input> {
    input: &'input str,
    reader: Reader<&'input [u8]>,
    /// One tokenizer event can expand to several SAX events; extras queue
    /// here until pulled
    queue: VecDeque<SaxEvent>,
    /// Prefixes declared per open element, so end-mapping events can be
    /// emitted in reverse declaration order after each end tag
    declared: Vec<Vec<String>>,
    finished: bool,
}

impl<'input> SaxReader<'input> {
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            reader: Reader::from_str(input),
            queue: VecDeque::new(),
            declared: Vec::new(),
            finished: false,
        }
    }

    /// The next SAX event, or `None` once the input is exhausted.
    pub fn next_event(&mut self) -> Result<Option<SaxEvent>> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Ok(Some(event));
            }
            if self.finished {
                return Ok(None);
            }

            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(e) => return Err(self.tokenizer_error(e.to_string())),
            };
            match event {
                Event::Start(start) => self.expand_start(&start, false)?,
                Event::Empty(start) => self.expand_start(&start, true)?,
                Event::End(end) => {
                    let name = self.raw_name(end.name())?;
                    self.queue.push_back(SaxEvent::EndElement { name });
                    self.expand_end_mappings();
                }
                Event::Text(text) => {
                    let decoded = match text.unescape() {
                        Ok(decoded) => decoded,
                        Err(e) => return Err(self.tokenizer_error(e.to_string())),
                    };
                    self.queue
                        .push_back(SaxEvent::Characters(decoded.into_owned()));
                }
                Event::CData(cdata) => {
                    let text = self.decode(cdata.into_inner().as_ref())?;
                    self.queue.push_back(SaxEvent::Characters(text));
                }
                Event::Eof => {
                    self.finished = true;
                }
                // Decl, DocType, Comment and PI carry no tree content
                _ => {}
            }
        }
    }

    /// Turns one start tag into its prefix-mapping and element events.
    fn expand_start(&mut self, start: &BytesStart<'_>, self_closing: bool) -> Result<()> {
        let name = self.raw_name(start.name())?;

        let mut declarations: Vec<(String, String)> = Vec::new();
        let mut attributes: Vec<(RawName, String)> = Vec::new();
        for attribute in start.attributes() {
            let attribute = match attribute {
                Ok(attribute) => attribute,
                Err(e) => return Err(self.tokenizer_error(e.to_string())),
            };
            let value = match attribute.unescape_value() {
                Ok(value) => value.into_owned(),
                Err(e) => return Err(self.tokenizer_error(e.to_string())),
            };
            match attribute.key.as_namespace_binding() {
                Some(PrefixDeclaration::Default) => declarations.push((String::new(), value)),
                Some(PrefixDeclaration::Named(prefix)) => {
                    declarations.push((self.decode(prefix)?, value));
                }
                None => attributes.push((self.raw_name(attribute.key)?, value)),
            }
        }

        for (prefix, uri) in &declarations {
            self.queue.push_back(SaxEvent::StartPrefixMapping {
                prefix: prefix.clone(),
                uri: uri.clone(),
            });
        }
        let declared: Vec<String> = declarations.into_iter().map(|(prefix, _)| prefix).collect();

        self.queue.push_back(SaxEvent::StartElement {
            name: name.clone(),
            attributes,
        });

        if self_closing {
            self.queue.push_back(SaxEvent::EndElement { name });
            self.declared.push(declared);
            self.expand_end_mappings();
        } else {
            self.declared.push(declared);
        }
        Ok(())
    }

    /// Emits end-mapping events for the innermost element's declarations.
    fn expand_end_mappings(&mut self) {
        if let Some(declared) = self.declared.pop() {
            for prefix in declared.into_iter().rev() {
                self.queue.push_back(SaxEvent::EndPrefixMapping { prefix });
            }
        }
    }

    fn raw_name(&self, name: quick_xml::name::QName<'_>) -> Result<RawName> {
        let local = self.decode(name.local_name().into_inner())?;
        let prefix = match name.prefix() {
            Some(prefix) => Some(self.decode(prefix.into_inner())?),
            None => None,
        };
        Ok(RawName { prefix, local })
    }

    fn decode(&self, bytes: &[u8]) -> Result<String> {
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| {
                self.location().create_error(
                    XmlErrorKind::Lexical(LexicalError::InvalidUtf8(e.to_string())),
                    "decoding a name from the tokenizer",
                )
            })
    }

    fn tokenizer_error(&self, message: String) -> XmlError {
        self.location().create_error(
            XmlErrorKind::Lexical(LexicalError::Tokenizer(message)),
            "tokenizing XML input",
        )
    }

    fn location(&self) -> Location {
        let offset = usize::try_from(self.reader.buffer_position()).unwrap_or(usize::MAX);
        Location::from_offset(self.input, offset)
    }
}

/// Tokenizes a whole document into its SAX event sequence.
pub fn tokenize(input: &str) -> Result<Vec<SaxEvent>> {
    let mut reader = SaxReader::new(input);
    let mut events = Vec::new();
    while let Some(event) = reader.next_event()? {
        events.push(event);
    }
    Ok(events)
}
