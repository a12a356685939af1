//! Per-mode progress for the classic game
//!
//! Transitions consume the record and return the updated one; nothing here
//! touches the store or the clock.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::wire::optional_timestamp;
use crate::core::{
    LetterMark, LetterStatus, Word, WordError, is_solved, mark_guess, merge_letter_statuses,
};
use crate::error::GuessError;
use crate::schedule::{ClassicMode, ClassicRound, GameId, Mode, effective_date};
use crate::wordlists::Dictionary;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Win,
    Lose,
}

impl GameStatus {
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// One accepted guess with its feedback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guess {
    pub guessed_at: DateTime<FixedOffset>,
    pub word: Vec<LetterMark>,
}

impl Guess {
    /// The guessed word as typed (lowercase)
    #[must_use]
    pub fn text(&self) -> String {
        self.word.iter().map(|m| m.letter).collect()
    }
}

/// What happened to a submitted guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess was recorded
    Scored {
        marks: Vec<LetterMark>,
        status: GameStatus,
    },
    /// The round is already won or lost; nothing changed
    GameOver,
}

/// Saved progress and statistics for one classic mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserGameData {
    pub num_played: u32,
    pub num_wins: u32,
    pub win_streak: u32,
    pub longest_win_streak: u32,
    #[serde(with = "optional_timestamp")]
    pub last_win_date: Option<DateTime<FixedOffset>>,
    pub history: Vec<Guess>,
    /// Wins by number of guesses used; index 0 is a first-guess win
    pub turn_stats: Vec<u32>,
    pub game_status: GameStatus,
    #[serde(with = "optional_timestamp")]
    pub game_start_date: Option<DateTime<FixedOffset>>,
    pub game_id: Option<GameId>,
    /// Revealed once the round is over
    pub correct_answer: Option<String>,
}

/// Aggregate statistics for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSummary {
    pub played: u32,
    pub wins: u32,
    /// Rounded to the nearest whole percent
    pub win_percentage: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub distribution: Vec<u32>,
}

/// Validate and score a guess without touching any state
///
/// # Errors
/// `IncompleteWord` when the guess is not the mode's length, `InvalidWord`
/// when it is not in the dictionary.
pub fn check_guess(
    guess: &str,
    solution: &str,
    mode: ClassicMode,
    dictionary: &Dictionary,
) -> Result<Vec<LetterMark>, GuessError> {
    let expected = mode.word_length();
    if guess.trim().chars().count() != expected {
        return Err(GuessError::IncompleteWord { expected });
    }
    let word = Word::new(guess).map_err(|err| match err {
        WordError::Empty => GuessError::IncompleteWord { expected },
        WordError::InvalidCharacters => GuessError::InvalidWord(guess.trim().to_string()),
    })?;

    if word.len() != expected {
        return Err(GuessError::IncompleteWord { expected });
    }
    if !dictionary.contains(word.text()) {
        return Err(GuessError::InvalidWord(word.text().to_string()));
    }

    let solution: Vec<char> = solution.trim().to_lowercase().chars().collect();
    Ok(mark_guess(word.letters(), &solution))
}

impl UserGameData {
    /// A blank record for `mode`
    #[must_use]
    pub fn new(mode: ClassicMode) -> Self {
        Self::default().normalize(mode)
    }

    /// Restore the size invariants a hand-edited or migrated save may break
    #[must_use]
    pub fn normalize(mut self, mode: ClassicMode) -> Self {
        self.turn_stats.resize(mode.num_tries(), 0);
        self.history.truncate(mode.num_tries());
        self
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.game_status.is_finished()
    }

    /// Apply an already-scored guess
    ///
    /// A finished round is returned unchanged.
    #[must_use]
    pub fn record_guess(
        mut self,
        mode: ClassicMode,
        marks: Vec<LetterMark>,
        now: DateTime<FixedOffset>,
        solution: &str,
    ) -> Self {
        if self.is_finished() {
            return self;
        }

        let solved = is_solved(&marks);
        self.history.push(Guess {
            guessed_at: now,
            word: marks,
        });
        if self.history.len() == 1 {
            self.game_start_date = Some(now);
        }

        if solved {
            self.game_status = GameStatus::Win;
            self.num_played += 1;
            self.num_wins += 1;
            self.last_win_date = Some(now);
            self.win_streak += 1;
            self.longest_win_streak = self.longest_win_streak.max(self.win_streak);
            if self.turn_stats.len() < mode.num_tries() {
                self.turn_stats.resize(mode.num_tries(), 0);
            }
            if let Some(slot) = self.turn_stats.get_mut(self.history.len() - 1) {
                *slot += 1;
            }
            self.correct_answer = Some(solution.to_lowercase());
        } else if self.history.len() >= mode.num_tries() {
            self.game_status = GameStatus::Lose;
            self.num_played += 1;
            self.win_streak = 0;
            self.correct_answer = Some(solution.to_lowercase());
        }

        self
    }

    /// Bring a stored record in line with the round now being served
    ///
    /// A record started on an earlier round loses its attempt (history,
    /// status, start date, revealed answer) but keeps every counter. Calling
    /// this again with the same round changes nothing.
    #[must_use]
    pub fn reconcile(mut self, mode: ClassicMode, round: &ClassicRound) -> Self {
        self = self.normalize(mode);

        let started_earlier = self.game_start_date.is_some_and(|start| {
            effective_date(Mode::Classic(mode), start.date_naive()) != round.date
        });
        let other_round = self.game_id.as_ref().is_some_and(|id| *id != round.game_id)
            && (!self.history.is_empty() || self.game_start_date.is_some());

        if started_earlier || other_round {
            info!(
                %mode,
                game_id = %round.game_id,
                played = self.num_played,
                "new round; clearing previous attempt"
            );
            self.history.clear();
            self.game_status = GameStatus::Playing;
            self.game_start_date = None;
            self.correct_answer = None;
        } else if self.is_finished() {
            self.correct_answer = Some(round.solution_word.to_lowercase());
        }

        if self.game_id.as_ref() != Some(&round.game_id) {
            debug!(%mode, game_id = %round.game_id, "adopting round id");
            self.game_id = Some(round.game_id.clone());
        }
        self
    }

    /// Best status per letter across the attempt, for the on-screen keyboard
    #[must_use]
    pub fn keyboard(&self) -> BTreeMap<char, LetterStatus> {
        merge_letter_statuses(self.history.iter().map(|g| g.word.as_slice()))
    }

    /// Guesses left in the current attempt
    #[must_use]
    pub fn remaining_tries(&self, mode: ClassicMode) -> usize {
        mode.num_tries().saturating_sub(self.history.len())
    }

    #[must_use]
    pub fn win_percentage(&self) -> u32 {
        if self.num_played == 0 {
            return 0;
        }
        let played = u64::from(self.num_played);
        let rounded = (u64::from(self.num_wins) * 200 + played) / (played * 2);
        u32::try_from(rounded).unwrap_or(100)
    }

    #[must_use]
    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            played: self.num_played,
            wins: self.num_wins,
            win_percentage: self.win_percentage(),
            current_streak: self.win_streak,
            longest_streak: self.longest_win_streak,
            distribution: self.turn_stats.clone(),
        }
    }
}
