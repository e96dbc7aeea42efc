//! Grammar rules for parsing XML documents.
//!
//! Literal markup delimiters are matched directly; names, quoted values,
//! comments, CDATA sections and processing instructions go through the nom
//! parsers in [`crate::lexer`].

use std::borrow::Cow;

use scissors_core::{
    ast::*,
    types::Span,
    ParseError,
};

use crate::lexer::*;

/// Deepest element nesting accepted before parsing fails with
/// [`ParseError::NestingTooDeep`]. Parsing and layout both recurse once per
/// level.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parse a complete XML document.
pub fn parse(input: &str) -> Result<Document, ParseError> {
    let source = normalize_line_endings(input);
    let mut parser = Parser::new(&source);
    parser.parse_document()
}

/// Replace `\r\n` and lone `\r` with `\n`.
fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    if input.contains('\r') {
        Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(input)
    }
}

/// Stateful parser that tracks the unconsumed remainder of the source.
struct Parser<'a> {
    source: &'a str,
    rest: &'a str,
    /// Elements currently open.
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        let rest = source.strip_prefix('\u{feff}').unwrap_or(source);
        Self {
            source,
            rest,
            depth: 0,
        }
    }

    fn offset_of(&self, slice: &str) -> usize {
        slice.as_ptr() as usize - self.source.as_ptr() as usize
    }

    fn span_of(&self, slice: &str) -> Span {
        Span::locate(self.source, self.offset_of(slice))
    }

    fn span(&self) -> Span {
        self.span_of(self.rest)
    }

    fn skip_space(&mut self) {
        self.rest = split_space(self.rest).0;
    }

    /// Build an "unexpected token" error at `at`.
    fn unexpected(&self, at: &str, expected: &str) -> ParseError {
        if at.is_empty() {
            return ParseError::UnexpectedEof;
        }
        let span = self.span_of(at);
        ParseError::UnexpectedToken {
            found: preview(at),
            expected: expected.to_string(),
            line: span.line,
            column: span.column,
        }
    }

    fn unterminated(&self, construct: &'static str, start: Span) -> ParseError {
        ParseError::UnterminatedConstruct {
            construct,
            line: start.line,
            column: start.column,
        }
    }

    /// Expand entity references in `raw`, a slice of the source (or a
    /// same-length normalization of one starting at `raw_offset`).
    fn decode(&self, raw: &str, raw_offset: usize) -> Result<String, ParseError> {
        decode_entities(raw).map(Cow::into_owned).map_err(|err| match err {
            EntityError::Unknown { name, offset } => {
                let span = Span::locate(self.source, raw_offset + offset);
                ParseError::UnknownEntity {
                    name,
                    line: span.line,
                    column: span.column,
                }
            }
            EntityError::InvalidReference { reference, offset } => {
                let span = Span::locate(self.source, raw_offset + offset);
                ParseError::InvalidCharacterReference {
                    reference,
                    line: span.line,
                    column: span.column,
                }
            }
            EntityError::Unterminated { offset } => self.unterminated(
                "entity reference",
                Span::locate(self.source, raw_offset + offset),
            ),
        })
    }

    /// Parse the full document: prolog, root element, trailing misc.
    fn parse_document(&mut self) -> Result<Document, ParseError> {
        let mut prolog = Vec::new();
        self.parse_misc(&mut prolog, true)?;

        if self.rest.is_empty() {
            return Err(ParseError::MissingRootElement);
        }
        if !self.rest.starts_with('<') {
            return Err(self.unexpected(self.rest, "root element"));
        }
        let root = self.parse_element()?;

        let mut epilog = Vec::new();
        self.parse_misc(&mut epilog, false)?;
        if !self.rest.is_empty() {
            let span = self.span();
            return Err(ParseError::TrailingContent {
                line: span.line,
                column: span.column,
            });
        }
        if !epilog.is_empty() {
            log::debug!("ignoring {} node(s) after the root element", epilog.len());
        }

        Ok(Document { prolog, root })
    }

    /// Parse whitespace, comments, processing instructions and (before the
    /// root) a doctype declaration. The XML declaration is dropped.
    fn parse_misc(&mut self, out: &mut Vec<Node>, allow_doctype: bool) -> Result<(), ParseError> {
        loop {
            self.skip_space();
            if self.rest.starts_with("<?") {
                let pi = self.parse_processing_instruction()?;
                if !pi.target.eq_ignore_ascii_case("xml") {
                    out.push(Node::ProcessingInstruction(pi));
                }
            } else if self.rest.starts_with("<!--") {
                out.push(Node::Comment(self.parse_comment()?));
            } else if allow_doctype && self.rest.starts_with("<!DOCTYPE") {
                let start = self.span();
                let (rest, _) = doctype(self.rest).map_err(|_| self.unterminated("doctype", start))?;
                self.rest = rest;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_comment(&mut self) -> Result<CharacterData, ParseError> {
        let start = self.span();
        let (rest, body) = comment(self.rest).map_err(|_| self.unterminated("comment", start))?;
        self.rest = rest;
        Ok(CharacterData::new(body))
    }

    fn parse_cdata(&mut self) -> Result<CharacterData, ParseError> {
        let start = self.span();
        let (rest, body) = cdata(self.rest).map_err(|_| self.unterminated("CDATA section", start))?;
        self.rest = rest;
        Ok(CharacterData::new(body))
    }

    fn parse_processing_instruction(&mut self) -> Result<ProcessingInstruction, ParseError> {
        let start = self.span();
        let (rest, (target, data)) = processing_instruction(self.rest).map_err(|_| {
            if name(&self.rest[2..]).is_err() {
                self.unexpected(&self.rest[2..], "processing instruction target")
            } else {
                self.unterminated("processing instruction", start)
            }
        })?;
        self.rest = rest;
        Ok(ProcessingInstruction {
            target: target.to_string(),
            data: data.to_string(),
        })
    }

    /// Parse an element starting at `<`.
    fn parse_element(&mut self) -> Result<ElementNode, ParseError> {
        if self.depth == MAX_NESTING_DEPTH {
            let span = self.span();
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                line: span.line,
                column: span.column,
            });
        }
        self.depth += 1;
        let element = self.parse_open_element();
        self.depth -= 1;
        element
    }

    fn parse_open_element(&mut self) -> Result<ElementNode, ParseError> {
        let start = self.span();
        let after_open = self
            .rest
            .strip_prefix('<')
            .ok_or_else(|| self.unexpected(self.rest, "'<'"))?;
        let (rest, tag_name) =
            name(after_open).map_err(|_| self.unexpected(after_open, "element name"))?;
        self.rest = rest;

        let mut element = ElementNode::new(tag_name);
        loop {
            let (rest, gap) = split_space(self.rest);
            if let Some(rest) = rest.strip_prefix("/>") {
                self.rest = rest;
                return Ok(element);
            }
            if let Some(rest) = rest.strip_prefix('>') {
                self.rest = rest;
                break;
            }
            if rest.is_empty() {
                return Err(self.unterminated("start tag", start));
            }
            if gap.is_empty() {
                return Err(self.unexpected(rest, "whitespace, '>' or '/>'"));
            }

            let (after, (key, raw)) =
                attribute(rest).map_err(|_| self.unexpected(rest, "attribute"))?;
            if element.attribute(key).is_some() {
                return Err(self.unexpected(rest, "unique attribute name"));
            }
            let value = self.decode(&normalize_attribute_value(raw), self.offset_of(raw))?;
            element.attributes.push(Attribute::new(key, value));
            self.rest = after;
        }

        self.parse_content(&mut element, start)?;
        Ok(element)
    }

    /// Parse element content up to and including the matching end tag.
    fn parse_content(&mut self, element: &mut ElementNode, start: Span) -> Result<(), ParseError> {
        loop {
            if self.rest.is_empty() {
                return Err(self.unterminated("element", start));
            }

            if self.rest.starts_with("</") {
                return self.parse_end_tag(&element.name);
            } else if self.rest.starts_with("<!--") {
                let comment = self.parse_comment()?;
                element.children.push(Node::Comment(comment));
            } else if self.rest.starts_with("<![CDATA[") {
                let cdata = self.parse_cdata()?;
                element.children.push(Node::CData(cdata));
            } else if self.rest.starts_with("<?") {
                let pi = self.parse_processing_instruction()?;
                element.children.push(Node::ProcessingInstruction(pi));
            } else if self.rest.starts_with('<') {
                let child = self.parse_element()?;
                element.children.push(Node::Element(child));
            } else {
                let (rest, raw) = char_data(self.rest)
                    .map_err(|_| self.unexpected(self.rest, "character data"))?;
                let text = self.decode(raw, self.offset_of(raw))?;
                element.children.push(Node::text(text));
                self.rest = rest;
            }
        }
    }

    fn parse_end_tag(&mut self, expected: &str) -> Result<(), ParseError> {
        let at = self.rest;
        let after_open = &at[2..];
        let (rest, found) =
            name(after_open).map_err(|_| self.unexpected(after_open, "element name"))?;
        let (rest, _) = split_space(rest);
        let rest = rest
            .strip_prefix('>')
            .ok_or_else(|| self.unexpected(rest, "'>'"))?;

        if found != expected {
            let span = self.span_of(at);
            return Err(ParseError::MismatchedTag {
                expected: expected.to_string(),
                found: found.to_string(),
                line: span.line,
                column: span.column,
            });
        }

        self.rest = rest;
        Ok(())
    }
}

/// A short excerpt of the input for error messages.
fn preview(input: &str) -> String {
    input
        .chars()
        .take_while(|&c| c != '\n')
        .take(16)
        .collect()
}
