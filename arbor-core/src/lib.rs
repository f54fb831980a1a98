//! Arbor core reader.
//!
//! Converts a single text buffer - markup (`<a attr="v">text</a>`) or
//! object notation (`{"a": {"@attr": "v", "#a": "text"}}`) - into one
//! generic, ordered tree, then renders the tree as a human-readable
//! listing (path, value, attributes).
//!
//! No external grammar library: both readers are hand-written recursive
//! descent over a byte cursor. The object reader additionally
//! reconstructs markup semantics (elements, attributes, text content)
//! out of plain key/value pairs via the `#`/`@` key idiom.
//!
//! # Architecture
//!
//! - **tree.rs** - arena-backed `Document`/`Node` model + listing renderer
//! - **scan.rs** - byte cursor, scanner functions, prefix sniffers
//! - **markup.rs** - recursive markup reader
//! - **object.rs** - object-notation reader + attribute reconciliation
//! - **error.rs** - fatal read failures
//!
//! # Example
//!
//! ```
//! let doc = arbor_core::read("<greeting lang=\"en\">hello</greeting>")
//!     .expect("well-formed input")
//!     .expect("recognized format");
//!
//! let greeting = doc.root().first_child().unwrap();
//! assert_eq!(greeting.name(), Some("greeting"));
//! assert_eq!(greeting.value(), Some("hello"));
//! println!("{doc}");
//! ```

pub mod error;
pub mod markup;
pub mod object;
pub mod scan;
pub mod tree;

pub use error::ReadError;
pub use markup::looks_like_markup;
pub use object::looks_like_object;
pub use tree::{Attribute, Document, Node, NodeId};

/// Convert a buffer into a tree with exactly one reader, picked by a
/// cheap prefix probe.
///
/// `Ok(None)` means neither probe recognized the input - a silent
/// no-result, not an error.
pub fn read(src: &str) -> Result<Option<Document<'_>>, ReadError> {
    if markup::looks_like_markup(src) {
        tracing::debug!(format = "markup", "reading buffer");
        markup::read(src).map(Some)
    } else if object::looks_like_object(src) {
        tracing::debug!(format = "object", "reading buffer");
        object::read(src).map(Some)
    } else {
        tracing::debug!("unrecognized format");
        Ok(None)
    }
}
