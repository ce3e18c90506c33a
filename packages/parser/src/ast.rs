use serde::{Deserialize, Serialize};

/// Byte range of a node in the source it was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Half-open containment: `start <= pos < end`
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }
}

/// Root of a parsed markup document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// `<!DOCTYPE ...>` declaration, if any
    pub doctype: Option<Doctype>,
    /// Top-level elements in source order
    pub elements: Vec<Element>,
}

/// Document type declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctype {
    /// Name immediately following `DOCTYPE`
    pub name: String,
    pub span: Span,
}

/// Element node. `span` runs from the `<` of the start tag to the `>` of
/// the end tag (or to where the element was implicitly closed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    pub span: Span,
    pub self_closing: bool,
}

/// Attribute on a start tag. Minimized SGML attributes (`<opt checked>`)
/// carry their own name as the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name identifying the document's schema: the DOCTYPE name, falling
    /// back to the first top-level element's name.
    pub fn document_type(&self) -> Option<&str> {
        self.doctype
            .as_ref()
            .map(|d| d.name.as_str())
            .or_else(|| self.elements.first().map(|e| e.name.as_str()))
    }

    /// Deepest element whose span contains `pos`
    pub fn enclosing_element(&self, pos: usize) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| e.span.contains(pos))
            .map(|e| e.enclosing_element(pos).unwrap_or(e))
    }

    /// Depth-first walk over every element
    pub fn walk(&self) -> impl Iterator<Item = &Element> {
        let mut stack: Vec<&Element> = self.elements.iter().rev().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }
}

impl Element {
    /// First value of attribute `name`
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    /// Deepest descendant containing `pos`, not counting `self`
    pub fn enclosing_element(&self, pos: usize) -> Option<&Element> {
        let child = self.children.iter().find(|c| c.span.contains(pos))?;
        Some(child.enclosing_element(pos).unwrap_or(child))
    }
}
