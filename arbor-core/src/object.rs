//! Object-notation reader.
//!
//! Recognizes object-based input (`{"key": value, ...}`) and parses it
//! recursively into the same tree shape the markup reader produces, then
//! applies attribute reconciliation: object notation has no native
//! concept of "attribute" or "mixed text + children", so a conventional
//! key idiom (`#name` for the element's own text or content, `@attr`
//! for attributes) is mapped back onto element semantics, degrading to a
//! best-effort filter for objects that do not follow the idiom.
//!
//! Only nested objects, double-quoted strings, unsigned decimal
//! numerals, and `null` are accepted as values; arrays and booleans fail
//! with a fatal error.

use std::borrow::Cow;

use crate::error::ReadError;
use crate::scan::{self, Cursor};
use crate::tree::{Document, NodeId};

/// Cheap anchored probe: does the buffer prefix look like an object?
pub fn looks_like_object(src: &str) -> bool {
    scan::object_prefix_at(src, 0)
}

/// Parse an object buffer into a tree rooted at an unnamed container.
///
/// The top-level object's pairs become children of the root; every
/// nested object is reconciled bottom-up before it is attached.
pub fn read(src: &str) -> Result<Document<'_>, ReadError> {
    let mut doc = Document::new();
    let root = doc.root_id();
    read_object(&mut doc, src, root, 0)?;
    Ok(doc)
}

/// Parse one object starting at `start`, attaching each pair's node to
/// `parent` in encounter order. Returns the position past the closing
/// `}` and one optional trailing comma.
fn read_object<'a>(
    doc: &mut Document<'a>,
    src: &'a str,
    parent: NodeId,
    start: usize,
) -> Result<usize, ReadError> {
    let mut cur = Cursor::new(src, start);
    cur.skip_ws();
    if !cur.eat(b'{') {
        // Not an object at all: leave the cursor where it was.
        return Ok(start);
    }
    cur.skip_ws();

    loop {
        // Pair key: ws* `"`...`"` ws* `:` ws*
        let mark = cur.pos();
        cur.skip_ws();
        let Some(key) = cur.quoted() else {
            cur.set_pos(mark);
            break;
        };
        cur.skip_ws();
        if !cur.eat(b':') {
            cur.set_pos(mark);
            break;
        }
        cur.skip_ws();

        tracing::trace!(key, offset = cur.pos(), "pair");
        let node = doc.create(key);
        if scan::object_prefix_at(src, cur.pos()) {
            let end = read_object(doc, src, node, cur.pos())?;
            cur.set_pos(end);
            reconcile(doc, node);
        } else {
            let value = scalar(&mut cur)?;
            doc.set_value(node, value);
        }
        doc.attach(parent, node);
    }

    cur.skip_ws();
    if !cur.eat(b'}') {
        return Err(ReadError::UnterminatedObject { offset: cur.pos() });
    }
    cur.skip_ws();
    cur.eat(b',');
    Ok(cur.pos())
}

/// Scan one scalar value: quoted string, decimal numeral, or `null`
/// (which stores an absent value). Consumes one immediately following
/// comma; anything else is fatal.
fn scalar<'a>(cur: &mut Cursor<'a>) -> Result<Option<Cow<'a, str>>, ReadError> {
    cur.skip_ws();
    let value = if let Some(text) = cur.quoted() {
        Some(Cow::Borrowed(text))
    } else if let Some(number) = cur.number() {
        Some(Cow::Borrowed(number))
    } else if cur.eat_str("null") {
        None
    } else {
        return Err(ReadError::InvalidValue { offset: cur.pos() });
    };
    cur.eat(b',');
    Ok(value)
}

// ============================================================================
// Attribute reconciliation
// ============================================================================

/// True when `key` follows the reconciliation idiom: `#` or `@`
/// followed by an identifier (dots allowed in continuation).
fn is_attribute_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    bytes.len() >= 2
        && (bytes[0] == b'#' || bytes[0] == b'@')
        && scan::is_name_start(bytes[1])
        && bytes[2..].iter().all(|&b| scan::is_key_char(b))
}

/// True when `key` could name an element: letter or `_`, then word
/// characters or dots.
fn is_identifier(key: &str) -> bool {
    let bytes = key.as_bytes();
    !bytes.is_empty()
        && scan::is_name_start(bytes[0])
        && bytes[1..].iter().all(|&b| scan::is_key_char(b))
}

/// Decide whether a freshly parsed object encodes a markup record:
/// its children map must contain `#` + the node's own name, every key
/// must follow the `#`/`@` idiom, and no `@` key may name a child that
/// itself has children (an attribute value must be a leaf).
fn is_markup_record(doc: &Document<'_>, node: NodeId) -> bool {
    let Some(own) = doc.name(node) else {
        return false;
    };
    let map = doc.children_by_name(node);
    if !map.contains_key(format!("#{own}").as_str()) {
        return false;
    }
    for (key, &child) in &map {
        if !is_attribute_key(key) {
            return false;
        }
        if key.starts_with('@') && doc.has_children(child) {
            return false;
        }
    }
    true
}

/// Rewrite a freshly parsed object node into element shape.
///
/// Record style: a `#` entry contributes the node's own value (leaf) or
/// splices its children up one level (the key held the element's nested
/// content); an `@` entry becomes an attribute. Otherwise a best-effort
/// filter runs over the children map: a prefixed key is dropped when a
/// plain-named sibling exists and demoted to a plain child otherwise,
/// keys that could never name an element are dropped, and an object
/// left with no children becomes an empty element (`value = ""`).
///
/// Decisions are computed from the map snapshot, then applied through
/// the tree's detach/attach/set operations.
fn reconcile<'a>(doc: &mut Document<'a>, node: NodeId) {
    if is_markup_record(doc, node) {
        for (key, child) in doc.children_by_name(node) {
            if key.starts_with('#') {
                if doc.has_children(child) {
                    let _ = doc.remove_child(node, child);
                    for (_, grand) in doc.children_by_name(child) {
                        doc.attach(node, grand);
                    }
                } else {
                    let _ = doc.remove_child(node, child);
                    let text = doc.take_value(child);
                    doc.set_value(node, text);
                }
            } else {
                let _ = doc.remove_child(node, child);
                let value = doc.take_value(child).unwrap_or(Cow::Borrowed(""));
                doc.set_attribute(node, strip_sigil(key), value);
            }
        }
    } else {
        let map = doc.children_by_name(node);
        for (key, &child) in &map {
            if is_attribute_key(key) {
                if map.contains_key(&key[1..]) {
                    // The plain-named sibling wins.
                    let _ = doc.remove_child(node, child);
                } else {
                    doc.set_name(child, strip_sigil(key.clone()));
                }
            } else if !is_identifier(key) {
                let _ = doc.remove_child(node, child);
            }
        }
        if !doc.has_children(node) {
            doc.set_value(node, Some(Cow::Borrowed("")));
        }
    }
}

/// Strip the leading `#`/`@`, staying zero-copy for borrowed keys.
fn strip_sigil(key: Cow<'_, str>) -> Cow<'_, str> {
    match key {
        Cow::Borrowed(s) => Cow::Borrowed(&s[1..]),
        Cow::Owned(s) => Cow::Owned(s[1..].to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================
