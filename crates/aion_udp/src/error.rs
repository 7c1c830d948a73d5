//! Compile-time error taxonomy for UDP rule tables.
//!
//! Evaluation itself is total: these errors can only occur
//! while compiling a textual rule table into a [`UdpDefinition`](crate::UdpDefinition)
//! or while registering/looking up a definition by label.

/// Errors that can occur while compiling or registering a UDP definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UdpError {
    /// A row's character count didn't match its expected shape.
    #[error("row {row_index}: expected {expected} characters, found {found} (\"{row_text}\")")]
    MalformedRow {
        /// 0-based index of the offending row.
        row_index: usize,
        /// The offending row's full text.
        row_text: String,
        /// Expected character count for this row kind.
        expected: usize,
        /// Actual character count found.
        found: usize,
    },

    /// A row contained a character outside the permitted alphabet for its
    /// column.
    #[error(
        "row {row_index}, column {column}: unknown pattern character '{ch}' (\"{row_text}\")"
    )]
    UnknownPattern {
        /// 0-based index of the offending row.
        row_index: usize,
        /// The offending row's full text.
        row_text: String,
        /// 0-based column within the row.
        column: usize,
        /// The offending character.
        ch: char,
    },

    /// A row had more than one edge character.
    #[error("row {row_index}: more than one edge character (\"{row_text}\")")]
    MultipleEdges {
        /// 0-based index of the offending row.
        row_index: usize,
        /// The offending row's full text.
        row_text: String,
    },

    /// The declared port count exceeds the mask word width minus one.
    #[error("port count {port_count} exceeds maximum of {max}")]
    PortCountExceeded {
        /// The requested port count.
        port_count: u32,
        /// The maximum supported port count ([`crate::state::MAX_PORTS`]).
        max: u32,
    },

    /// Two UDP definitions were registered under the same label.
    #[error("duplicate UDP definition for label \"{label}\"")]
    DuplicateDefinition {
        /// The conflicting label.
        label: String,
    },

    /// An instance referenced a label with no registered definition.
    #[error("unknown UDP definition for label \"{label}\"")]
    UnknownDefinition {
        /// The unresolved label.
        label: String,
    },
}
