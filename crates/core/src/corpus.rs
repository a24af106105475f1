//! The word corpus backing identifier allocation.
//!
//! The corpus is loaded once at startup and is immutable afterwards. It is an
//! explicitly constructed value owned by the process and passed to the
//! allocator, not a hidden global.

use crate::error::{Error, Result};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Built-in word list used when no dictionary path is configured.
const DEFAULT_WORD_LIST: &str = include_str!("words.txt");

/// Minimum number of usable words after filtering.
///
/// The allocator retries until it finds an unused identifier; with a corpus
/// below this size that loop could become tight, so a too-small corpus is a
/// fatal configuration error at startup.
pub const MIN_CORPUS_WORDS: usize = 64;

/// An immutable, filtered set of candidate identifier words.
#[derive(Clone, Debug)]
pub struct WordCorpus {
    words: Vec<String>,
}

impl WordCorpus {
    /// Load the corpus from a newline-delimited word list file.
    pub fn load(path: &Path, min_len: usize, max_len: usize) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, min_len, max_len)
    }

    /// Build the corpus from the embedded default word list.
    pub fn builtin(min_len: usize, max_len: usize) -> Result<Self> {
        Self::from_reader(DEFAULT_WORD_LIST.as_bytes(), min_len, max_len)
    }

    /// Build the corpus from any newline-delimited reader.
    ///
    /// Keeps words whose length lies in `[min_len, max_len]`, drops anything
    /// containing an underscore, lowercases and deduplicates. Fails with
    /// [`Error::CorpusTooSmall`] if fewer than [`MIN_CORPUS_WORDS`] survive.
    pub fn from_reader<R: Read>(reader: R, min_len: usize, max_len: usize) -> Result<Self> {
        let mut words: Vec<String> = BufReader::new(reader)
            .lines()
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .map(|line| line.trim().to_ascii_lowercase())
            .filter(|w| {
                w.len() >= min_len
                    && w.len() <= max_len
                    && !w.contains('_')
                    && w.chars().all(|c| c.is_ascii_alphabetic())
            })
            .collect();
        words.sort();
        words.dedup();

        if words.len() < MIN_CORPUS_WORDS {
            return Err(Error::CorpusTooSmall {
                found: words.len(),
                min: MIN_CORPUS_WORDS,
            });
        }
        Ok(Self { words })
    }

    /// The filtered words, in stable order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of usable words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the corpus is empty (never true for a constructed corpus).
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
