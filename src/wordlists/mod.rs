//! Dictionary and blacklist
//!
//! The dictionary is bucketed by word length, the way the site serves it; the
//! blacklist retracts entries without rebuilding the dictionary.

pub mod cache;
mod embedded;
pub mod loader;

pub use embedded::{BLACKLIST, BLACKLIST_COUNT, DICTIONARY, DICTIONARY_COUNT};

use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use tracing::warn;

use crate::core::Version;

fn normalize(word: &str) -> Option<String> {
    let word = word.trim().to_lowercase();
    (!word.is_empty()).then_some(word)
}

/// Valid words grouped by their letter count
///
/// Every word in bucket `k` has exactly `k` letters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    buckets: BTreeMap<usize, FxHashSet<String>>,
    version: Option<Version>,
}

impl Dictionary {
    /// Build a dictionary from loose words, bucketing each by length
    ///
    /// # Examples
    /// ```
    /// use salita::wordlists::Dictionary;
    ///
    /// let dictionary = Dictionary::from_words(["Bahay", "keso", "sampu"]);
    /// assert!(dictionary.contains("BAHAY"));
    /// assert_eq!(dictionary.words_of_length(5).count(), 2);
    /// ```
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::default();
        for word in words {
            dictionary.insert(word.as_ref());
        }
        dictionary
    }

    /// Build a dictionary from length buckets as served
    ///
    /// Words filed under the wrong length are moved to the right bucket.
    pub fn from_buckets<I, W, S>(buckets: I) -> Self
    where
        I: IntoIterator<Item = (usize, W)>,
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::default();
        for (length, words) in buckets {
            for word in words {
                let word = word.as_ref();
                let actual = word.trim().chars().count();
                if actual != length {
                    warn!(
                        word,
                        bucket = length,
                        actual,
                        "dictionary word filed under wrong length"
                    );
                }
                dictionary.insert(word);
            }
        }
        dictionary
    }

    /// The bundled dictionary compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_words(DICTIONARY)
    }

    /// Stamp the dictionary with the version it was published as
    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    #[must_use]
    pub fn version(&self) -> Option<Version> {
        self.version
    }

    fn insert(&mut self, word: &str) {
        if let Some(word) = normalize(word) {
            self.buckets
                .entry(word.chars().count())
                .or_default()
                .insert(word);
        }
    }

    /// Case-insensitive membership test
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        normalize(word).is_some_and(|word| {
            self.buckets
                .get(&word.chars().count())
                .is_some_and(|bucket| bucket.contains(&word))
        })
    }

    /// Words with exactly `length` letters
    pub fn words_of_length(&self, length: usize) -> impl Iterator<Item = &str> {
        self.buckets
            .get(&length)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Every word, across all lengths
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.buckets.values().flatten().map(String::as_str)
    }

    /// Flatten all buckets into a single searchable set
    #[must_use]
    pub fn flatten(&self) -> FxHashSet<&str> {
        self.iter().collect()
    }

    /// Lengths that have at least one word
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.keys().copied()
    }

    /// Total number of words
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(FxHashSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Words excluded from play even though the dictionary contains them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist(FxHashSet<String>);

impl Blacklist {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(words.into_iter().filter_map(|w| normalize(w.as_ref())).collect())
    }

    /// The bundled blacklist compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_words(BLACKLIST)
    }

    /// Case-insensitive membership test
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        normalize(word).is_some_and(|word| self.0.contains(&word))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
