//! Folder identifiers and filename validation.
//!
//! Identifiers and filenames are interpolated into filesystem paths under the
//! storage root, so both are validated to shapes that cannot traverse outside
//! it. A malformed value is rejected before any path is built.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on the number of words in an identifier.
pub const MAX_ID_WORDS: usize = 8;

/// A human-readable folder identifier: hyphen-joined alphabetic words,
/// e.g. `oak-lime-pine`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FolderId(String);

impl FolderId {
    /// Parse and validate an identifier.
    ///
    /// Accepts one to [`MAX_ID_WORDS`] non-empty ASCII-alphabetic tokens
    /// joined by single hyphens. The parsed value is safe to use as a path
    /// component.
    pub fn parse(value: &str) -> Result<Self> {
        let tokens: Vec<&str> = value.split('-').collect();
        if tokens.is_empty() || tokens.len() > MAX_ID_WORDS {
            return Err(Error::InvalidFolderId(value.to_string()));
        }
        for token in &tokens {
            if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(Error::InvalidFolderId(value.to_string()));
            }
        }
        Ok(Self(value.to_string()))
    }

    /// Build an identifier by joining dictionary words.
    ///
    /// The words come from a [`crate::corpus::WordCorpus`], which only holds
    /// alphabetic tokens, so joining cannot produce an invalid shape.
    pub fn from_words<W: AsRef<str>>(words: &[W]) -> Self {
        let joined = words
            .iter()
            .map(|w| w.as_ref())
            .collect::<Vec<_>>()
            .join("-");
        Self(joined)
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FolderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for FolderId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<FolderId> for String {
    fn from(id: FolderId) -> Self {
        id.0
    }
}

/// Characters forbidden in filenames, beyond path separators.
const FORBIDDEN_FILENAME_CHARS: &[char] = &[':', '*', '?', '"', '<', '>', '|'];

/// Validate a caller-supplied filename.
///
/// Rejects empty names, `.` and `..`, path separators, control characters,
/// and shell-hostile punctuation. Anything accepted here is a single safe
/// path component inside a folder.
pub fn validate_filename(name: &str) -> Result<()> {
    let reject = || Error::InvalidFilename(name.to_string());

    if name.is_empty() || name == "." || name == ".." {
        return Err(reject());
    }
    if name.contains('/') || name.contains('\\') {
        return Err(reject());
    }
    if name
        .chars()
        .any(|c| c.is_control() || FORBIDDEN_FILENAME_CHARS.contains(&c))
    {
        return Err(reject());
    }
    // Belt and braces: the name must resolve to exactly one normal component.
    let mut components = std::path::Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(std::path::Component::Normal(_)), None) => Ok(()),
        _ => Err(reject()),
    }
}
