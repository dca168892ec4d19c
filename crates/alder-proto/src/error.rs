//! Data-model error types.

use thiserror::Error;

/// Result type alias for record-model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing or validating record-model values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Label exceeds maximum length of 63 bytes.
    #[error("label too long: {length} bytes exceeds maximum of 63")]
    LabelTooLong {
        /// Actual label length.
        length: usize,
    },

    /// Name exceeds maximum wire length of 255 bytes.
    #[error("name too long: {length} bytes exceeds maximum of 255")]
    NameTooLong {
        /// Actual name length.
        length: usize,
    },

    /// Invalid character in a label.
    #[error("invalid character {character:?} at position {position} in label")]
    InvalidLabelChar {
        /// The offending character.
        character: char,
        /// Byte position within the label.
        position: usize,
    },

    /// Name octets are not a valid uncompressed label sequence.
    #[error("malformed name octets at offset {offset}: {message}")]
    MalformedName {
        /// Byte offset of the problem.
        offset: usize,
        /// Description of the problem.
        message: &'static str,
    },
}
