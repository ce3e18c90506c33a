//! # Prompts
//!
//! The two interactive decisions of a rearrange session:
//!
//! - [`AttributeChooser`]: which attribute names an element
//! - [`NameArranger`]: which candidate names to keep, and in what order
//!
//! Closures implement both traits, so a front end can pass a prompt
//! function directly. The fixed implementations here cover
//! non-interactive use.

use rearrange_parser::ast::Element;

/// Picks the attribute that carries an element's display name.
/// `None` cancels the operation.
pub trait AttributeChooser {
    fn choose_attribute_name(&mut self, element: &Element) -> Option<String>;
}

impl<F> AttributeChooser for F
where
    F: FnMut(&Element) -> Option<String>,
{
    fn choose_attribute_name(&mut self, element: &Element) -> Option<String> {
        self(element)
    }
}

/// Picks the names to keep, in the order they should be pasted
pub trait NameArranger {
    fn arrange_names(&mut self, names: &[String]) -> Vec<String>;
}

impl<F> NameArranger for F
where
    F: FnMut(&[String]) -> Vec<String>,
{
    fn arrange_names(&mut self, names: &[String]) -> Vec<String> {
        self(names)
    }
}

/// Always answers with the same attribute
#[derive(Debug, Clone)]
pub struct FixedAttribute(pub String);

impl FixedAttribute {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self(attribute.into())
    }
}

impl AttributeChooser for FixedAttribute {
    fn choose_attribute_name(&mut self, _element: &Element) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Picks the element's first attribute
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAttribute;

impl AttributeChooser for FirstAttribute {
    fn choose_attribute_name(&mut self, element: &Element) -> Option<String> {
        element.attribute_names().next().map(str::to_string)
    }
}

/// Keeps every name in document order
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAll;

impl NameArranger for KeepAll {
    fn arrange_names(&mut self, names: &[String]) -> Vec<String> {
        names.to_vec()
    }
}

/// Keeps exactly the listed names, in list order
#[derive(Debug, Clone, Default)]
pub struct KeepNames(pub Vec<String>);

impl KeepNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }
}

impl NameArranger for KeepNames {
    fn arrange_names(&mut self, _names: &[String]) -> Vec<String> {
        self.0.clone()
    }
}

/// Wraps another arranger and reverses its answer
#[derive(Debug, Clone, Default)]
pub struct Reverse<A>(pub A);

impl<A: NameArranger> NameArranger for Reverse<A> {
    fn arrange_names(&mut self, names: &[String]) -> Vec<String> {
        let mut arranged = self.0.arrange_names(names);
        arranged.reverse();
        arranged
    }
}
