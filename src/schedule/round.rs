//! Round data as published for each mode and date

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::hex::WordList;

/// Sequential round identifier; older rounds were published with numeric ids,
/// newer hex rounds with string ids
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameId {
    Number(u64),
    Text(String),
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for GameId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for GameId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Public round data for a classic mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassicRound {
    pub game_id: GameId,
    pub date: NaiveDate,
    pub solution_word: String,
}

/// Public round data for the hex mode as published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexPuzzle {
    pub game_id: GameId,
    pub date: NaiveDate,
    /// Seven distinct letters are expected
    pub root_word: String,
    /// One of the root word's letters; every answer must use it
    pub center_letter: char,
}

impl HexPuzzle {
    /// Lowercase root word and center letter, the form answers are checked in
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.root_word = self.root_word.trim().to_lowercase();
        self.center_letter = self
            .center_letter
            .to_lowercase()
            .next()
            .unwrap_or(self.center_letter);
        self
    }
}

/// A hex puzzle with the totals derived from its full word list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexRound {
    #[serde(flatten)]
    pub puzzle: HexPuzzle,
    pub max_score: u32,
    pub num_words: usize,
    pub num_pangrams: usize,
}

impl HexRound {
    /// Attach the totals of `words`, the puzzle's accepted-answer list
    #[must_use]
    pub fn new(puzzle: HexPuzzle, words: &WordList) -> Self {
        Self {
            puzzle: puzzle.normalized(),
            max_score: words.max_score,
            num_words: words.num_words,
            num_pangrams: words.num_pangrams,
        }
    }

    #[must_use]
    pub fn game_id(&self) -> &GameId {
        &self.puzzle.game_id
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.puzzle.date
    }

    #[must_use]
    pub fn root_word(&self) -> &str {
        &self.puzzle.root_word
    }

    #[must_use]
    pub fn center_letter(&self) -> char {
        self.puzzle.center_letter
    }
}
