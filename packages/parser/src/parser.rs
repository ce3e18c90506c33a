use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::tokenizer::{tokenize, Token};
use std::ops::Range;

/// Tolerant markup parser.
///
/// End tags may be omitted: an end tag closes the nearest open element with
/// the same name and implicitly closes everything opened after it, and
/// elements still open at end of input are closed there. Names are
/// compared ignoring ASCII case.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
}

/// Element whose end tag has not been seen yet
struct OpenElement {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Element>,
    start: usize,
}

impl OpenElement {
    fn close(self, end: usize) -> Element {
        Element {
            name: self.name,
            attributes: self.attributes,
            children: self.children,
            span: Span::new(self.start, end),
            self_closing: false,
        }
    }
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> ParseResult<Self> {
        let tokens = tokenize(source).map_err(ParseError::lexer_error)?;
        Ok(Self {
            source,
            tokens,
            pos: 0,
        })
    }

    /// Parse a complete document
    pub fn parse_document(&mut self) -> ParseResult<Document> {
        let mut doc = Document::new();
        let mut open: Vec<OpenElement> = Vec::new();

        while let Some((token, range)) = self.advance() {
            match token {
                Token::Declaration(decl) => {
                    if doc.doctype.is_none() {
                        doc.doctype = parse_doctype(decl, range.clone());
                    }
                }
                Token::StartTag(tag) => {
                    let (name, attributes, self_closing) = parse_start_tag(tag, range.start)?;
                    if self_closing {
                        let element = Element {
                            name,
                            attributes,
                            children: Vec::new(),
                            span: Span::new(range.start, range.end),
                            self_closing: true,
                        };
                        attach(&mut open, &mut doc.elements, element);
                    } else {
                        open.push(OpenElement {
                            name,
                            attributes,
                            children: Vec::new(),
                            start: range.start,
                        });
                    }
                }
                Token::EndTag(tag) => {
                    let name = tag[2..tag.len() - 1].trim();
                    let matched = open
                        .iter()
                        .rposition(|e| e.name.eq_ignore_ascii_case(name))
                        .ok_or_else(|| ParseError::unmatched_end_tag(range.start, name))?;

                    while open.len() > matched + 1 {
                        if let Some(inner) = open.pop() {
                            attach(&mut open, &mut doc.elements, inner.close(range.start));
                        }
                    }
                    if let Some(element) = open.pop() {
                        attach(&mut open, &mut doc.elements, element.close(range.end));
                    }
                }
                Token::Comment(_)
                | Token::CData(_)
                | Token::ProcessingInstruction(_)
                | Token::Text(_) => {}
            }
        }

        let end = self.source.len();
        while let Some(element) = open.pop() {
            attach(&mut open, &mut doc.elements, element.close(end));
        }

        Ok(doc)
    }

    fn advance(&mut self) -> Option<(Token<'src>, Range<usize>)> {
        let next = self.tokens.get(self.pos).cloned();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }
}

/// Parse a markup document
pub fn parse(source: &str) -> ParseResult<Document> {
    Parser::new(source)?.parse_document()
}

fn attach(open: &mut [OpenElement], roots: &mut Vec<Element>, element: Element) {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None => roots.push(element),
    }
}

fn parse_doctype(decl: &str, range: Range<usize>) -> Option<Doctype> {
    let body = &decl[2..decl.len() - 1];
    let keyword = body.get(..7)?;
    if !keyword.eq_ignore_ascii_case("DOCTYPE") {
        return None;
    }
    let name: String = body[7..]
        .trim_start()
        .chars()
        .take_while(|c| !c.is_whitespace() && *c != '[' && *c != '>')
        .collect();
    if name.is_empty() {
        return None;
    }
    Some(Doctype {
        name,
        span: Span::new(range.start, range.end),
    })
}

/// Split a start tag into its name, attributes and self-closing flag
fn parse_start_tag(tag: &str, pos: usize) -> ParseResult<(String, Vec<Attribute>, bool)> {
    let mut inner = &tag[1..tag.len() - 1];
    let self_closing = inner.ends_with('/');
    if self_closing {
        inner = &inner[..inner.len() - 1];
    }

    let name_end = inner
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(inner.len());
    let name = inner[..name_end].to_string();
    let attributes = parse_attributes(&inner[name_end..], pos)?;

    Ok((name, attributes, self_closing))
}

fn parse_attributes(rest: &str, pos: usize) -> ParseResult<Vec<Attribute>> {
    let bytes = rest.as_bytes();
    let len = bytes.len();
    let mut attributes = Vec::new();
    let mut i = 0;

    let skip_ws = |i: &mut usize| {
        while *i < len && bytes[*i].is_ascii_whitespace() {
            *i += 1;
        }
    };

    loop {
        skip_ws(&mut i);
        if i >= len {
            break;
        }

        let name_start = i;
        while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' {
            i += 1;
        }
        let name = &rest[name_start..i];
        if name.is_empty() {
            return Err(ParseError::malformed_tag(pos, "attribute value without a name"));
        }

        skip_ws(&mut i);
        let value = if i < len && bytes[i] == b'=' {
            i += 1;
            skip_ws(&mut i);
            if i >= len {
                return Err(ParseError::malformed_tag(
                    pos,
                    format!("attribute '{}' is missing its value", name),
                ));
            }

            let quote = bytes[i];
            if quote == b'"' || quote == b'\'' {
                let value_start = i + 1;
                let close = rest[value_start..]
                    .find(quote as char)
                    .map(|offset| value_start + offset)
                    .ok_or_else(|| {
                        ParseError::malformed_tag(
                            pos,
                            format!("unterminated value for attribute '{}'", name),
                        )
                    })?;
                i = close + 1;
                &rest[value_start..close]
            } else {
                let value_start = i;
                while i < len && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                &rest[value_start..i]
            }
        } else {
            name
        };

        attributes.push(Attribute {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    Ok(attributes)
}
