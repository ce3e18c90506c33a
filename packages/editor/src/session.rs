//! # Edit Session
//!
//! One document, its name properties and its rearrange engine, driven by
//! cursor offsets.
//!
//! The buffer text is re-parsed at the start of each operation, so the
//! tree always reflects the latest edits.

use crate::buffer::SourceBuffer;
use crate::engine::{Arrangement, PasteReport, RearrangeEngine};
use crate::host::TextEdit;
use crate::names::NameProperties;
use crate::path_config::PathConfig;
use crate::prompt::{AttributeChooser, NameArranger};
use crate::record::NodeRecord;
use crate::EditorError;
use rearrange_parser::ast::{Document, Element};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Editing state for one document
#[derive(Debug)]
pub struct EditSession {
    buffer: SourceBuffer,
    names: NameProperties,
    engine: RearrangeEngine,
}

impl EditSession {
    pub fn new(buffer: SourceBuffer, names: NameProperties) -> Self {
        Self {
            buffer,
            names,
            engine: RearrangeEngine::new(),
        }
    }

    /// In-memory session with no name properties
    pub fn from_source(source: &str) -> Self {
        Self::new(SourceBuffer::from_source(source), NameProperties::new())
    }

    /// Session over a file
    pub fn load(path: impl Into<PathBuf>, names: NameProperties) -> Result<Self, EditorError> {
        Ok(Self::new(SourceBuffer::load(path)?, names))
    }

    pub fn with_engine(mut self, engine: RearrangeEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Write the document back to its file
    pub fn save(&mut self) -> Result<(), EditorError> {
        self.buffer.save()
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    pub fn text(&self) -> String {
        self.buffer.get_text()
    }

    pub fn buffer(&self) -> &SourceBuffer {
        &self.buffer
    }

    pub fn names(&self) -> &NameProperties {
        &self.names
    }

    pub fn names_mut(&mut self) -> &mut NameProperties {
        &mut self.names
    }

    pub fn engine(&self) -> &RearrangeEngine {
        &self.engine
    }

    /// Name of the document's type, if one can be determined
    pub fn document_type(&self) -> Result<Option<String>, EditorError> {
        Ok(self.parse()?.document_type().map(str::to_string))
    }

    /// Ask `chooser` for the name attribute of the element at `cursor`
    /// and store it for the element's type.
    ///
    /// Returns the stored attribute, or `None` if the chooser declined.
    #[instrument(skip(self, chooser))]
    pub fn set_name_property<C: AttributeChooser + ?Sized>(
        &mut self,
        cursor: usize,
        chooser: &mut C,
    ) -> Result<Option<String>, EditorError> {
        let doc = self.parse()?;
        let doc_type = doc.document_type().ok_or(EditorError::NoDocumentType)?;
        let element = enclosing(&doc, cursor, self.buffer.len())?;

        let Some(attribute) = chooser.choose_attribute_name(element) else {
            return Ok(None);
        };
        self.names.set_attribute(doc_type, &element.name, attribute.as_str());
        info!(doc_type, element_type = %element.name, attribute = %attribute, "set name property");
        Ok(Some(attribute))
    }

    /// Names a cut at `cursor` would offer, in document order
    pub fn candidates_at_cursor(&mut self, cursor: usize) -> Result<Vec<String>, EditorError> {
        let records = self.extract_at(cursor)?;
        let names = records.iter().map(|r| r.name.clone()).collect();
        RearrangeEngine::release(records, &mut self.buffer);
        Ok(names)
    }

    /// Cut the arranged children of the element at `cursor`
    #[instrument(skip(self, arranger))]
    pub fn cut_at_cursor<A: NameArranger + ?Sized>(
        &mut self,
        cursor: usize,
        arranger: &mut A,
    ) -> Result<Option<usize>, EditorError> {
        let arrangement = self.arrange_at(cursor, arranger)?;
        self.engine.cut(arrangement, &mut self.buffer)
    }

    /// Paste the most recent cut at `cursor`
    #[instrument(skip(self))]
    pub fn paste_at_cursor(&mut self, cursor: usize) -> Result<PasteReport, EditorError> {
        self.engine.paste(&mut self.buffer, cursor)
    }

    /// Cut at `from` and paste at `to`, where `to` is an offset in the
    /// document as it is before the cut
    #[instrument(skip(self, arranger))]
    pub fn move_at_cursor<A: NameArranger + ?Sized>(
        &mut self,
        from: usize,
        to: usize,
        arranger: &mut A,
    ) -> Result<Option<PasteReport>, EditorError> {
        let arrangement = self.arrange_at(from, arranger)?;
        self.engine.move_to(arrangement, to, &mut self.buffer)
    }

    fn parse(&self) -> Result<Document, EditorError> {
        Ok(rearrange_parser::parse(&self.buffer.get_text())?)
    }

    fn extract_at(&mut self, cursor: usize) -> Result<Vec<NodeRecord>, EditorError> {
        let doc = self.parse()?;
        let doc_type = doc.document_type().ok_or(EditorError::NoDocumentType)?;
        let element = enclosing(&doc, cursor, self.buffer.len())?;

        let empty = PathConfig::new();
        let naming = self.names.for_document_type(doc_type).unwrap_or(&empty);
        RearrangeEngine::extract_candidates(&element.children, naming, &mut self.buffer)
    }

    fn arrange_at<A: NameArranger + ?Sized>(
        &mut self,
        cursor: usize,
        arranger: &mut A,
    ) -> Result<Arrangement, EditorError> {
        let records = self.extract_at(cursor)?;
        Ok(RearrangeEngine::arrange(records, arranger))
    }
}

fn enclosing(
    doc: &Document,
    cursor: usize,
    len: usize,
) -> Result<&Element, EditorError> {
    if cursor > len {
        return Err(EditorError::InvalidOffset { offset: cursor, len });
    }
    doc.enclosing_element(cursor)
        .ok_or(EditorError::NoEnclosingElement(cursor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{FixedAttribute, KeepAll, KeepNames};

    const GLOSSARY: &str = "<!DOCTYPE glossary>\n<glossary>\n<entry term=\"beta\">B</entry>\n<entry term=\"alpha\">A</entry>\n</glossary>\n";

    fn inside_glossary() -> usize {
        GLOSSARY.find("<glossary>").unwrap() + "<glossary>".len()
    }

    fn session() -> EditSession {
        let mut names = NameProperties::new();
        names.set_attribute("glossary", "entry", "term");
        EditSession::new(SourceBuffer::from_source(GLOSSARY), names)
    }

    #[test]
    fn test_document_type() {
        assert_eq!(session().document_type().unwrap().as_deref(), Some("glossary"));
        assert_eq!(
            EditSession::from_source("<book/>").document_type().unwrap().as_deref(),
            Some("book")
        );
        assert_eq!(EditSession::from_source("text").document_type().unwrap(), None);
    }

    #[test]
    fn test_set_name_property_from_cursor() {
        let mut session = EditSession::from_source(GLOSSARY);
        let cursor = GLOSSARY.find("beta").unwrap();

        let stored = session
            .set_name_property(cursor, &mut FixedAttribute::new("term"))
            .unwrap();

        assert_eq!(stored.as_deref(), Some("term"));
        assert_eq!(session.names().attribute_for("glossary", "entry"), Some("term"));
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_declined_chooser_changes_nothing() {
        let mut session = EditSession::from_source(GLOSSARY);
        let cursor = GLOSSARY.find("beta").unwrap();

        let mut decline = |_: &Element| -> Option<String> { None };
        assert_eq!(session.set_name_property(cursor, &mut decline).unwrap(), None);
        assert!(session.names().is_empty());
    }

    #[test]
    fn test_candidates_at_cursor() {
        let mut session = session();
        let names = session.candidates_at_cursor(inside_glossary()).unwrap();

        assert_eq!(names, vec!["beta", "alpha"]);
        assert_eq!(session.buffer().live_markers(), 0);
    }

    #[test]
    fn test_cut_and_paste_at_cursor() {
        let mut session = session();

        let cut = session
            .cut_at_cursor(inside_glossary(), &mut KeepNames::new(["alpha", "beta"]))
            .unwrap();
        assert_eq!(cut, Some(2));
        assert_eq!(session.text(), "<!DOCTYPE glossary>\n<glossary>\n\n\n</glossary>\n");

        session.paste_at_cursor(inside_glossary()).unwrap();
        assert_eq!(
            session.text(),
            "<!DOCTYPE glossary>\n<glossary><entry term=\"alpha\">A</entry>\n<entry term=\"beta\">B</entry>\n\n\n\n</glossary>\n"
        );
    }

    #[test]
    fn test_cut_and_paste_with_non_ascii_text() {
        let source = "<!DOCTYPE d>\n<d>é<e t=\"ü\">ß</e>中<e t=\"b\">x</e>\n</d>\n";
        let mut session = EditSession::from_source(source);
        session.names_mut().set_attribute("d", "e", "t");
        let cursor = source.find("é").unwrap();

        assert_eq!(session.candidates_at_cursor(cursor).unwrap(), vec!["ü", "b"]);

        let cut = session
            .cut_at_cursor(cursor, &mut KeepNames::new(["b", "ü"]))
            .unwrap();
        assert_eq!(cut, Some(2));
        assert_eq!(session.text(), "<!DOCTYPE d>\n<d>é中\n</d>\n");

        let at = session.text().find("</d>").unwrap();
        session.paste_at_cursor(at).unwrap();
        assert_eq!(
            session.text(),
            "<!DOCTYPE d>\n<d>é中\n<e t=\"b\">x</e>\n<e t=\"ü\">ß</e>\n</d>\n"
        );
        assert_eq!(session.buffer().live_markers(), 0);
    }

    #[test]
    fn test_move_at_cursor() {
        let mut session = session();
        let to = GLOSSARY.find("</glossary>").unwrap();

        session
            .move_at_cursor(inside_glossary(), to, &mut KeepNames::new(["beta"]))
            .unwrap();

        assert_eq!(
            session.text(),
            "<!DOCTYPE glossary>\n<glossary>\n\n<entry term=\"alpha\">A</entry>\n<entry term=\"beta\">B</entry>\n</glossary>\n"
        );
        assert_eq!(session.buffer().live_markers(), 0);
    }

    #[test]
    fn test_cursor_errors() {
        let mut session = session();

        assert!(matches!(
            session.cut_at_cursor(10_000, &mut KeepAll),
            Err(EditorError::InvalidOffset { offset: 10_000, .. })
        ));
        assert!(matches!(
            session.cut_at_cursor(0, &mut KeepAll),
            Err(EditorError::NoEnclosingElement(0))
        ));
        assert!(matches!(
            EditSession::from_source("plain text").candidates_at_cursor(0),
            Err(EditorError::NoDocumentType)
        ));
    }

    #[test]
    fn test_unknown_document_type_offers_nothing() {
        let mut session = EditSession::from_source("<book><entry term=\"a\"/></book>");
        session.names_mut().set_attribute("glossary", "entry", "term");

        assert!(session.candidates_at_cursor(1).unwrap().is_empty());
    }
}
