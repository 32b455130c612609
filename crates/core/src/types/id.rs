//! Document identifiers.
//!
//! Every stored record carries a 12-byte object id assigned by the document
//! store. Over HTTP the id travels as 24 hexadecimal characters; this type
//! validates that shape before any store call is made.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`DocumentId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentIdError {
    /// Wrong number of characters.
    #[error("document id must be {expected} hex characters (got {actual})")]
    Length {
        /// Required length.
        expected: usize,
        /// Length of the rejected input.
        actual: usize,
    },
    /// A character outside `[0-9a-fA-F]`.
    #[error("document id must be hexadecimal")]
    NotHex,
}

/// A validated document id in its 24-character hex form.
///
/// Parsing lower-cases the input, so ids compare equal regardless of the case
/// the client sent.
///
/// ```
/// use parts_core::DocumentId;
///
/// let id = DocumentId::parse("65A1F0C2B3D4E5F6A7B8C9D0").unwrap();
/// assert_eq!(id.as_str(), "65a1f0c2b3d4e5f6a7b8c9d0");
/// assert!(DocumentId::parse("42").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Length of the hex form.
    pub const HEX_LENGTH: usize = 24;

    /// Parse a `DocumentId` from its hex form.
    ///
    /// # Errors
    ///
    /// Returns an error unless the input is exactly 24 hexadecimal characters.
    pub fn parse(s: &str) -> Result<Self, DocumentIdError> {
        if s.len() != Self::HEX_LENGTH {
            return Err(DocumentIdError::Length {
                expected: Self::HEX_LENGTH,
                actual: s.len(),
            });
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DocumentIdError::NotHex);
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Returns the lower-case hex form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = DocumentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = DocumentIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}
