//! Fatal read failures.
//!
//! Every error aborts the whole read: there is no partial-tree salvage
//! and no per-node recovery. Unrecognized input is not an error - the
//! dispatcher reports it as a silent no-result instead.

use thiserror::Error;

/// Errors raised by the markup and object readers.
///
/// Offsets are byte positions into the input buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// A non-self-closing element's closing tag could not be located.
    #[error("enclosing tag expected for <{name}> at byte {offset}")]
    UnterminatedElement {
        /// Name of the element still open.
        name: String,
        /// Position the closing-tag search started from.
        offset: usize,
    },

    /// A closing `}` was not found where the object grammar requires one.
    #[error("object end expected at byte {offset}")]
    UnterminatedObject {
        /// Position the close scan started from.
        offset: usize,
    },

    /// A key's value position matched neither nested object, string,
    /// number, nor null.
    #[error("attribute value expected at byte {offset}")]
    InvalidValue {
        /// Position of the unrecognized value.
        offset: usize,
    },
}
