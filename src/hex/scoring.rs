//! Word validity and point scoring for the hex mode
//!
//! A hex round is a seven-letter root word with one fixed center letter. Any
//! dictionary word built only from the root's letters (repetition allowed) that
//! uses the center letter is an answer.

use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::wordlists::{Blacklist, Dictionary};

/// Shortest accepted answer
pub const MIN_WORD_LENGTH: usize = 4;

/// Longest accepted answer
pub const MAX_WORD_LENGTH: usize = 19;

/// Distinct letters a pangram uses, one of every root letter
pub const PANGRAM_LETTERS: usize = 7;

/// Extra points awarded for a pangram
pub const PANGRAM_BONUS: u32 = 7;

/// Result of the length guard run before validity checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordLength {
    Acceptable,
    TooShort,
    TooLong,
}

/// Every accepted answer for a round, with the totals shown to the player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    /// Accepted answers, sorted
    pub words: Vec<String>,
    /// Points for finding every answer
    pub max_score: u32,
    pub num_words: usize,
    pub num_pangrams: usize,
}

impl WordList {
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.binary_search_by(|w| w.as_str().cmp(word)).is_ok()
    }

    /// Answers that are pangrams
    pub fn pangrams(&self) -> impl Iterator<Item = &str> {
        self.words
            .iter()
            .map(String::as_str)
            .filter(|w| is_pangram(w))
    }
}

/// Check `word` against the answer length bounds
#[must_use]
pub fn check_length(word: &str) -> WordLength {
    let len = word.chars().count();
    if len < MIN_WORD_LENGTH {
        WordLength::TooShort
    } else if len > MAX_WORD_LENGTH {
        WordLength::TooLong
    } else {
        WordLength::Acceptable
    }
}

/// True when `word` has exactly seven distinct letters
///
/// # Examples
/// ```
/// use salita::hex::is_pangram;
///
/// assert!(is_pangram("eksport"));
/// assert!(!is_pangram("manong"));
/// ```
#[must_use]
pub fn is_pangram(word: &str) -> bool {
    word.chars().collect::<FxHashSet<_>>().len() == PANGRAM_LETTERS
}

/// Points earned for `word`
///
/// Four-letter words score 1, longer words score their length, and pangrams
/// add [`PANGRAM_BONUS`].
#[must_use]
pub fn word_score(word: &str) -> u32 {
    let len = u32::try_from(word.chars().count()).unwrap_or(u32::MAX);
    let base = if len == 4 { 1 } else { len };
    if is_pangram(word) {
        base.saturating_add(PANGRAM_BONUS)
    } else {
        base
    }
}

/// Whether `word` is an accepted answer for the round
///
/// The length guard is not applied here; see [`check_length`].
#[must_use]
pub fn is_valid_word(
    word: &str,
    dictionary: &Dictionary,
    root_word: &str,
    blacklist: &Blacklist,
    center_letter: char,
) -> bool {
    let word = word.trim().to_lowercase();
    let center_letter = center_letter.to_lowercase().next().unwrap_or(center_letter);
    let root_letters: FxHashSet<char> = root_word.to_lowercase().chars().collect();

    word.contains(center_letter)
        && word.chars().all(|c| root_letters.contains(&c))
        && !blacklist.contains(&word)
        && dictionary.contains(&word)
}

/// Every accepted answer for a root word and center letter
///
/// Blacklisted words are excluded from the list and from every total.
#[must_use]
pub fn build_word_list(
    root_word: &str,
    center_letter: char,
    blacklist: &Blacklist,
    dictionary: &Dictionary,
) -> WordList {
    let candidates: Vec<&str> = (MIN_WORD_LENGTH..=MAX_WORD_LENGTH)
        .flat_map(|length| dictionary.words_of_length(length))
        .collect();

    let mut words: Vec<String> = candidates
        .par_iter()
        .filter(|word| is_valid_word(word, dictionary, root_word, blacklist, center_letter))
        .map(|word| (*word).to_string())
        .collect();
    words.sort_unstable();

    let max_score = words.iter().map(|w| word_score(w)).sum();
    let num_pangrams = words.iter().filter(|w| is_pangram(w)).count();

    WordList {
        num_words: words.len(),
        words,
        max_score,
        num_pangrams,
    }
}
