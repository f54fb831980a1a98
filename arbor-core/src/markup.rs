//! Markup reader.
//!
//! Recognizes element-based input (`<name attr="value">...</name>`) and
//! parses it recursively into the tree model. This is a pragmatic,
//! best-effort structural reader: no namespaces, CDATA, comments, entity
//! decoding, or quote escaping.
//!
//! Closing tags are located by the first textual match ahead of the
//! cursor, not by a validated tag stack, and the sibling loop scans
//! forward to the end of the buffer. Same-named elements that nest
//! without self-closing can therefore mis-pair.

use std::borrow::Cow;

use memchr::memchr;

use crate::error::ReadError;
use crate::scan::{self, Cursor};
use crate::tree::{Document, NodeId};

/// Cheap anchored probe: does the buffer prefix look like markup?
pub fn looks_like_markup(src: &str) -> bool {
    scan::markup_prefix_at(src, 0)
}

/// Parse a markup buffer into a tree rooted at an unnamed container.
pub fn read(src: &str) -> Result<Document<'_>, ReadError> {
    let mut doc = Document::new();
    let root = doc.root_id();
    read_tags(&mut doc, src, root, 0)?;
    Ok(doc)
}

/// One recognized opening tag.
struct OpeningTag<'a> {
    name: &'a str,
    attrs: Vec<(&'a str, &'a str)>,
    self_closing: bool,
    /// Byte offset just past `>` or `/>`.
    end: usize,
}

/// Parse sibling elements under `parent`, starting at `start`.
///
/// Text that is not immediately inside an element is discarded. Returns
/// the cursor position after the last consumed closing tag.
fn read_tags<'a>(
    doc: &mut Document<'a>,
    src: &'a str,
    parent: NodeId,
    start: usize,
) -> Result<usize, ReadError> {
    let mut i = start;
    while let Some((at, tag)) = next_opening_tag(src, i) {
        tracing::trace!(name = tag.name, offset = at, "element open");
        let element = doc.add_child(parent, tag.name);
        for (key, value) in &tag.attrs {
            doc.set_attribute(element, *key, *value);
        }
        i = tag.end;
        if tag.self_closing {
            continue;
        }

        if scan::markup_prefix_at(src, i) {
            i = read_tags(doc, src, element, i)?;
        }
        let (text_end, close_end) =
            find_closing_tag(src, i, tag.name).ok_or_else(|| ReadError::UnterminatedElement {
                name: tag.name.to_string(),
                offset: i,
            })?;
        if !doc.has_children(element) {
            doc.set_value(element, Some(Cow::Borrowed(&src[i..text_end])));
        }
        i = close_end;
    }
    Ok(i)
}

/// Find the next opening tag at or after `from`.
///
/// Candidates are `<` bytes; a candidate that does not scan as an
/// opening tag is skipped and the search continues one byte later.
fn next_opening_tag(src: &str, from: usize) -> Option<(usize, OpeningTag<'_>)> {
    let bytes = src.as_bytes();
    let mut at = from;
    while at < bytes.len() {
        let lt = at + memchr(b'<', &bytes[at..])?;
        if let Some(tag) = opening_tag_at(src, lt) {
            return Some((lt, tag));
        }
        at = lt + 1;
    }
    None
}

/// Scan one opening tag at the `<` found at `lt`:
/// `<` ws* name (ws* name ws* `=` ws* `"`...`"`)* ws* (`>` | `/>`).
/// Duplicate attribute keys overwrite earlier ones in place.
fn opening_tag_at(src: &str, lt: usize) -> Option<OpeningTag<'_>> {
    let mut cur = Cursor::new(src, lt);
    if !cur.eat(b'<') {
        return None;
    }
    cur.skip_ws();
    let name = cur.ident()?;
    let mut attrs = Vec::new();
    loop {
        cur.skip_ws();
        if cur.eat_str("/>") {
            return Some(OpeningTag { name, attrs, self_closing: true, end: cur.pos() });
        }
        if cur.eat(b'>') {
            return Some(OpeningTag { name, attrs, self_closing: false, end: cur.pos() });
        }
        let key = cur.ident()?;
        cur.skip_ws();
        if !cur.eat(b'=') {
            return None;
        }
        cur.skip_ws();
        let value = cur.quoted()?;
        attrs.push((key, value));
    }
}

/// Locate the first textual closing tag `<` ws* `/` name ws* `>` at or
/// after `from`. Returns (start of `<`, end past `>`).
fn find_closing_tag(src: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let bytes = src.as_bytes();
    let mut at = from;
    while at < bytes.len() {
        let lt = at + memchr(b'<', &bytes[at..])?;
        if let Some(end) = closing_tag_at(src, lt, name) {
            return Some((lt, end));
        }
        at = lt + 1;
    }
    None
}

fn closing_tag_at(src: &str, lt: usize, name: &str) -> Option<usize> {
    let mut cur = Cursor::new(src, lt);
    if !cur.eat(b'<') {
        return None;
    }
    cur.skip_ws();
    if !cur.eat(b'/') {
        return None;
    }
    if !cur.eat_str(name) {
        return None;
    }
    cur.skip_ws();
    if !cur.eat(b'>') {
        return None;
    }
    Some(cur.pos())
}

// ============================================================================
// Tests
// ============================================================================
