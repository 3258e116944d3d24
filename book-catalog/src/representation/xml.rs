//! XML encoding through the quick-xml event writer
//!
//! Element names mirror the JSON field names. Optional fields that are
//! absent produce no element.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{EncodeError, Format};
use crate::catalog::Page;
use crate::models::{BookView, ReadingListView};

/// Types that know how to write themselves as an XML element
pub trait XmlElement {
    fn write_element(&self, doc: &mut XmlDocument) -> Result<(), EncodeError>;
}

/// Event writer over an in-memory buffer
pub struct XmlDocument {
    writer: Writer<Vec<u8>>,
}

impl XmlDocument {
    fn new() -> Result<Self, EncodeError> {
        let mut doc = Self {
            writer: Writer::new(Vec::new()),
        };
        doc.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(doc)
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), EncodeError> {
        self.writer
            .write_event(event)
            .map_err(|e| EncodeError::new(Format::Xml, e.to_string()))
    }

    pub fn start(&mut self, name: &str) -> Result<(), EncodeError> {
        self.write(Event::Start(BytesStart::new(name)))
    }

    pub fn end(&mut self, name: &str) -> Result<(), EncodeError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// `<name>value</name>`, with `value` escaped
    pub fn text(&mut self, name: &str, value: &str) -> Result<(), EncodeError> {
        self.start(name)?;
        self.write(Event::Text(BytesText::new(value)))?;
        self.end(name)
    }

    /// Like [`text`](Self::text), but writes nothing for `None`
    pub fn optional_text(&mut self, name: &str, value: Option<&str>) -> Result<(), EncodeError> {
        match value {
            Some(value) => self.text(name, value),
            None => Ok(()),
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

/// Encode `value` as a complete XML document
pub fn to_xml<T: XmlElement + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut doc = XmlDocument::new()?;
    value.write_element(&mut doc)?;
    Ok(doc.into_bytes())
}

impl XmlElement for BookView {
    fn write_element(&self, doc: &mut XmlDocument) -> Result<(), EncodeError> {
        doc.start("book")?;
        doc.text("id", &self.id.to_string())?;
        doc.text("title", &self.title)?;
        doc.optional_text("subtitle", self.subtitle.as_deref())?;
        doc.optional_text("author", self.author.as_deref())?;
        doc.optional_text("summary", self.summary.as_deref())?;
        doc.text("list", self.list.as_str())?;
        doc.text("cover", &self.cover)?;
        doc.end("book")
    }
}

impl XmlElement for Page<BookView> {
    fn write_element(&self, doc: &mut XmlDocument) -> Result<(), EncodeError> {
        doc.start("page")?;
        doc.text("total", &self.total.to_string())?;
        doc.text("page", &self.page.to_string())?;
        doc.text("pageSize", &self.page_size.to_string())?;
        doc.text("totalPages", &self.total_pages.to_string())?;
        doc.text("hasPrevious", &self.has_previous.to_string())?;
        doc.text("hasNext", &self.has_next.to_string())?;
        write_books(doc, &self.results)?;
        doc.end("page")
    }
}

impl XmlElement for ReadingListView {
    fn write_element(&self, doc: &mut XmlDocument) -> Result<(), EncodeError> {
        doc.start("readingList")?;
        doc.text("list", self.list.as_str())?;
        write_books(doc, &self.books)?;
        doc.end("readingList")
    }
}

fn write_books(doc: &mut XmlDocument, books: &[BookView]) -> Result<(), EncodeError> {
    doc.start("books")?;
    for book in books {
        book.write_element(doc)?;
    }
    doc.end("books")
}
