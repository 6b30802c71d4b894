use crate::domain::tree::{Document, Element, Node};
use crate::utils::error::{Result, UpdaterError};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::escape::{escape, partial_escape};
use quick_xml::Reader;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
enum SyntaxError {
    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("content is not valid UTF-8")]
    NotUtf8,

    #[error("closing tag without matching opening tag")]
    UnmatchedEnd,

    #[error("element <{0}> is never closed")]
    Unclosed(String),

    #[error("document has no root element")]
    NoRoot,

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("text content outside the root element")]
    ContentOutsideRoot,
}

#[derive(Default)]
struct TreeBuilder {
    declaration: Option<String>,
    prolog: Vec<Node>,
    root: Option<Element>,
    epilog: Vec<Node>,
    open: Vec<Element>,
}

impl TreeBuilder {
    fn push(&mut self, node: Node) -> std::result::Result<(), SyntaxError> {
        if let Some(parent) = self.open.last_mut() {
            parent.push_node(node);
            return Ok(());
        }

        match node {
            Node::Element(el) => {
                if self.root.is_some() {
                    return Err(SyntaxError::MultipleRoots);
                }
                self.root = Some(el);
            }
            // 根元素外的空白不保留
            Node::Text(t) if t.trim().is_empty() => {}
            Node::Text(_) | Node::CData(_) => return Err(SyntaxError::ContentOutsideRoot),
            other => {
                if self.root.is_some() {
                    self.epilog.push(other);
                } else {
                    self.prolog.push(other);
                }
            }
        }
        Ok(())
    }

    fn close(&mut self) -> std::result::Result<(), SyntaxError> {
        let element = self.open.pop().ok_or(SyntaxError::UnmatchedEnd)?;
        self.push(Node::Element(element))
    }

    fn finish(mut self) -> std::result::Result<Document, SyntaxError> {
        if let Some(unclosed) = self.open.pop() {
            return Err(SyntaxError::Unclosed(unclosed.name().to_string()));
        }
        let root = self.root.ok_or(SyntaxError::NoRoot)?;
        Ok(Document {
            declaration: self.declaration,
            prolog: self.prolog,
            root,
            epilog: self.epilog,
        })
    }
}

fn decode(bytes: &[u8]) -> std::result::Result<String, SyntaxError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| SyntaxError::NotUtf8)
}

fn element_from(start: &BytesStart) -> std::result::Result<Element, SyntaxError> {
    let mut element = Element::new(decode(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr?;
        let key = decode(attr.key.as_ref())?;
        let value = attr.unescape_value()?.into_owned();
        element.set_attribute(key, value);
    }
    Ok(element)
}

fn declaration_from(decl: &BytesDecl) -> std::result::Result<String, SyntaxError> {
    let mut out = format!("xml version=\"{}\"", decode(&decl.version()?)?);
    if let Some(encoding) = decl.encoding() {
        out.push_str(&format!(" encoding=\"{}\"", decode(&encoding?)?));
    }
    if let Some(standalone) = decl.standalone() {
        out.push_str(&format!(" standalone=\"{}\"", decode(&standalone?)?));
    }
    Ok(out)
}

fn read_document(text: &str) -> std::result::Result<Document, SyntaxError> {
    let mut reader = Reader::from_str(text);
    let mut builder = TreeBuilder::default();

    loop {
        match reader.read_event()? {
            Event::Start(start) => builder.open.push(element_from(&start)?),
            Event::Empty(start) => builder.push(Node::Element(element_from(&start)?))?,
            Event::End(_) => builder.close()?,
            Event::Text(t) => builder.push(Node::Text(t.unescape()?.into_owned()))?,
            Event::CData(c) => builder.push(Node::CData(decode(&c)?))?,
            Event::Comment(c) => builder.push(Node::Comment(decode(&c)?))?,
            Event::PI(pi) => builder.push(Node::ProcessingInstruction(decode(&pi)?))?,
            Event::DocType(d) => builder.push(Node::DocType(decode(&d)?.trim().to_string()))?,
            Event::Decl(decl) => builder.declaration = Some(declaration_from(&decl)?),
            Event::Eof => break,
        }
    }

    builder.finish()
}

/// Parses descriptor bytes into a mutable tree.
///
/// Any syntax problem (invalid UTF-8, mismatched tags, several roots...) is reported as
/// [`UpdaterError::MalformedDescriptor`] for `path`.
pub fn parse_descriptor(path: &Path, bytes: &[u8]) -> Result<Document> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| UpdaterError::malformed(path, format!("content is not valid UTF-8: {}", e)))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    read_document(text).map_err(|e| UpdaterError::malformed(path, e.to_string()))
}

/// Renders a tree back to XML. Output depends only on the tree.
pub fn render_descriptor(document: &Document) -> String {
    let mut out = String::new();

    if let Some(declaration) = &document.declaration {
        out.push_str("<?");
        out.push_str(declaration);
        out.push_str("?>\n");
    }
    for node in &document.prolog {
        write_node(&mut out, node);
        out.push('\n');
    }
    write_element(&mut out, &document.root);
    out.push('\n');
    for node in &document.epilog {
        write_node(&mut out, node);
        out.push('\n');
    }

    out
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.name());
    for (key, value) in element.attributes() {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }

    if element.children().is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in element.children() {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(element.name());
    out.push('>');
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(el) => write_element(out, el),
        Node::Text(t) => out.push_str(&partial_escape(t.as_str())),
        Node::CData(c) => {
            out.push_str("<![CDATA[");
            out.push_str(c);
            out.push_str("]]>");
        }
        Node::Comment(c) => {
            out.push_str("<!--");
            out.push_str(c);
            out.push_str("-->");
        }
        Node::ProcessingInstruction(pi) => {
            out.push_str("<?");
            out.push_str(pi);
            out.push_str("?>");
        }
        Node::DocType(d) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(d);
            out.push('>');
        }
    }
}
