//! Saved progress for the hex game
//!
//! The hex family keeps a single envelope: the state itself carries the
//! version stamp and identity.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;
use uuid::Uuid;

use super::wire::{optional_letter, optional_text, optional_timestamp};
use crate::core::{BUILD_VERSION, Version};
use crate::hex::{Rank, WordLength, check_length, is_pangram, is_valid_word, rank, word_score};
use crate::schedule::{GameId, HexRound, Mode, effective_date};
use crate::wordlists::{Blacklist, Dictionary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessedWord {
    pub word: String,
    pub is_pangram: bool,
}

/// Score reached on a round, next to what was possible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub score: u32,
    pub max_score: u32,
}

/// What happened to a submitted hex word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexOutcome {
    Accepted {
        word: String,
        points: u32,
        is_pangram: bool,
        /// Running score after this word
        score: u32,
    },
    /// Found earlier this round; no points
    AlreadyAnswered(String),
    TooShort,
    TooLong,
    MissingCenterLetter,
    /// Uses a letter outside the puzzle
    InvalidLetters,
    NotInWordList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HexGameState {
    pub version: Version,
    pub uuid: Uuid,
    #[serde(with = "optional_text")]
    pub root_word: Option<String>,
    #[serde(with = "optional_letter")]
    pub center_letter: Option<char>,
    #[serde(with = "optional_text")]
    pub prev_root_word: Option<String>,
    #[serde(with = "optional_letter")]
    pub prev_center_letter: Option<char>,
    pub game_id: Option<GameId>,
    pub score: u32,
    pub scores: BTreeMap<NaiveDate, ScoreEntry>,
    #[serde(with = "optional_timestamp")]
    pub game_start_date: Option<DateTime<FixedOffset>>,
    pub guessed_words: Vec<GuessedWord>,
}

impl Default for HexGameState {
    fn default() -> Self {
        Self::fresh(BUILD_VERSION)
    }
}

impl HexGameState {
    /// A blank state with a new identity
    #[must_use]
    pub fn fresh(version: Version) -> Self {
        Self {
            version,
            uuid: Uuid::new_v4(),
            root_word: None,
            center_letter: None,
            prev_root_word: None,
            prev_center_letter: None,
            game_id: None,
            score: 0,
            scores: BTreeMap::new(),
            game_start_date: None,
            guessed_words: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_found(&self, word: &str) -> bool {
        self.guessed_words.iter().any(|g| g.word == word)
    }

    /// Bring the saved state in line with the round now being served
    ///
    /// A new round moves the current puzzle into the `prev_*` fields and clears
    /// the found words. A round republished under the same id with different
    /// letters keeps only the words that are still answers.
    #[must_use]
    pub fn reconcile(
        mut self,
        round: &HexRound,
        now: DateTime<FixedOffset>,
        dictionary: &Dictionary,
        blacklist: &Blacklist,
    ) -> Self {
        let started_earlier = self
            .game_start_date
            .is_some_and(|start| effective_date(Mode::Hex, start.date_naive()) != round.date());
        let new_round = self.root_word.is_none()
            || self.game_id.as_ref() != Some(round.game_id())
            || started_earlier;

        if new_round {
            info!(game_id = %round.game_id(), root = round.root_word(), "new hex round");
            if self.root_word.is_some() {
                self.prev_root_word = self.root_word.take();
                self.prev_center_letter = self.center_letter.take();
            }
            self.root_word = Some(round.root_word().to_string());
            self.center_letter = Some(round.center_letter());
            self.game_id = Some(round.game_id().clone());
            self.score = 0;
            self.guessed_words.clear();
            self.game_start_date = Some(now);
            return self;
        }

        let republished = self.root_word.as_deref() != Some(round.root_word())
            || self.center_letter != Some(round.center_letter());
        if republished {
            info!(
                game_id = %round.game_id(),
                root = round.root_word(),
                "hex round changed; rechecking found words"
            );
            self.root_word = Some(round.root_word().to_string());
            self.center_letter = Some(round.center_letter());
            let (root, center) = (round.root_word(), round.center_letter());
            self.guessed_words
                .retain(|g| is_valid_word(&g.word, dictionary, root, blacklist, center));
        }

        self.score = self.guessed_words.iter().map(|g| word_score(&g.word)).sum();
        if republished && !self.guessed_words.is_empty() {
            self.record_score(round);
        }
        self
    }

    /// Check and score a submitted word
    ///
    /// Only an `Accepted` outcome changes the state.
    #[must_use]
    pub fn record_word(
        mut self,
        input: &str,
        round: &HexRound,
        dictionary: &Dictionary,
        blacklist: &Blacklist,
    ) -> (Self, HexOutcome) {
        let word = input.trim().to_lowercase();
        let (root, center) = (round.root_word(), round.center_letter());

        let outcome = match check_length(&word) {
            WordLength::TooShort => HexOutcome::TooShort,
            WordLength::TooLong => HexOutcome::TooLong,
            WordLength::Acceptable if self.has_found(&word) => HexOutcome::AlreadyAnswered(word),
            WordLength::Acceptable if !word.contains(center) => HexOutcome::MissingCenterLetter,
            WordLength::Acceptable if !word.chars().all(|c| root.contains(c)) => {
                HexOutcome::InvalidLetters
            }
            WordLength::Acceptable
                if !is_valid_word(&word, dictionary, root, blacklist, center) =>
            {
                HexOutcome::NotInWordList
            }
            WordLength::Acceptable => {
                let points = word_score(&word);
                let pangram = is_pangram(&word);
                self.guessed_words.push(GuessedWord {
                    word: word.clone(),
                    is_pangram: pangram,
                });
                self.score += points;
                self.record_score(round);
                HexOutcome::Accepted {
                    word,
                    points,
                    is_pangram: pangram,
                    score: self.score,
                }
            }
        };

        (self, outcome)
    }

    fn record_score(&mut self, round: &HexRound) {
        self.scores.insert(
            round.date(),
            ScoreEntry {
                score: self.score,
                max_score: round.max_score,
            },
        );
    }

    /// Current rank on `round`, `None` when the round has no answers
    #[must_use]
    pub fn rank(&self, round: &HexRound) -> Option<Rank> {
        rank(self.score, round.max_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::build_word_list;
    use crate::schedule::HexPuzzle;

    fn at(stamp: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(stamp).unwrap()
    }

    fn dictionary() -> Dictionary {
        Dictionary::from_words([
            "keso", "pote", "tore", "torpe", "poker", "eksport", "tropeo", "kotse", "tekst",
            "salita", "tala", "lagi", "ligtas", "salitang",
        ])
    }

    fn blacklist() -> Blacklist {
        Blacklist::from_words(["poker"])
    }

    fn round(id: &str, day: u32, root: &str, center: char) -> HexRound {
        let puzzle = HexPuzzle {
            game_id: GameId::from(id),
            date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            root_word: root.into(),
            center_letter: center,
        };
        let words = build_word_list(root, center, &blacklist(), &dictionary());
        HexRound::new(puzzle, &words)
    }

    fn submit(state: HexGameState, word: &str, round: &HexRound) -> (HexGameState, HexOutcome) {
        state.record_word(word, round, &dictionary(), &blacklist())
    }

    fn reconcile_at(state: HexGameState, round: &HexRound, stamp: &str) -> HexGameState {
        state.reconcile(round, at(stamp), &dictionary(), &blacklist())
    }

    fn started(round: &HexRound) -> HexGameState {
        reconcile_at(HexGameState::fresh(BUILD_VERSION), round, "2026-10-15T08:00:00+08:00")
    }

    #[test]
    fn first_reconcile_adopts_round() {
        let r = round("hex-33", 15, "eksport", 'o');
        let state = started(&r);

        assert_eq!(state.root_word.as_deref(), Some("eksport"));
        assert_eq!(state.center_letter, Some('o'));
        assert_eq!(state.prev_root_word, None);
        assert_eq!(state.game_id, Some(GameId::from("hex-33")));
        assert!(state.game_start_date.is_some());
    }

    #[test]
    fn accepted_words_score_and_track() {
        let r = round("hex-33", 15, "eksport", 'o');
        let (state, outcome) = submit(started(&r), "Torpe", &r);
        assert_eq!(
            outcome,
            HexOutcome::Accepted {
                word: "torpe".into(),
                points: 5,
                is_pangram: false,
                score: 5
            }
        );

        let (state, outcome) = submit(state, "eksport", &r);
        assert!(matches!(
            outcome,
            HexOutcome::Accepted { points: 14, is_pangram: true, score: 19, .. }
        ));
        assert_eq!(state.score, 19);
        assert_eq!(
            state.scores[&NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()],
            ScoreEntry {
                score: 19,
                max_score: r.max_score
            }
        );
    }

    #[test]
    fn uppercase_puzzle_accepts_lowercase_answers() {
        let r = round("hex-33", 15, "EKSPORT", 'O');
        let lower = round("hex-33", 15, "eksport", 'o');
        assert_eq!(r.num_words, lower.num_words);
        assert_eq!(r.max_score, lower.max_score);

        let (state, outcome) = submit(started(&r), "torpe", &r);
        assert!(matches!(outcome, HexOutcome::Accepted { points: 5, .. }));
        assert_eq!(state.root_word.as_deref(), Some("eksport"));
        assert_eq!(state.center_letter, Some('o'));

        let (_, outcome) = submit(state, "KESO", &r);
        assert!(matches!(outcome, HexOutcome::Accepted { points: 1, score: 6, .. }));
    }

    #[test]
    fn resubmission_is_a_soft_notice() {
        let r = round("hex-33", 15, "eksport", 'o');
        let (state, _) = submit(started(&r), "keso", &r);
        let (again, outcome) = submit(state.clone(), "KESO", &r);

        assert_eq!(outcome, HexOutcome::AlreadyAnswered("keso".into()));
        assert_eq!(again, state);
    }

    #[test]
    fn rejections_do_not_change_state() {
        let r = round("hex-33", 15, "eksport", 'o');
        let state = started(&r);

        for (word, expected) in [
            ("kes", HexOutcome::TooShort),
            ("eksportekspor-tekspo", HexOutcome::TooLong),
            ("tekst", HexOutcome::MissingCenterLetter),
            ("salita", HexOutcome::MissingCenterLetter),
            ("botes", HexOutcome::InvalidLetters),
            ("poker", HexOutcome::NotInWordList),
            ("toro", HexOutcome::NotInWordList),
        ] {
            let (after, outcome) = submit(state.clone(), word, &r);
            assert_eq!(outcome, expected, "{word}");
            assert_eq!(after, state);
        }
    }

    #[test]
    fn reconcile_same_round_is_idempotent() {
        let r = round("hex-33", 15, "eksport", 'o');
        let (state, _) = submit(started(&r), "keso", &r);
        let later = at("2026-10-17T10:00:00+08:00");

        let once = state.clone().reconcile(&r, later, &dictionary(), &blacklist());
        let twice = once.clone().reconcile(&r, later, &dictionary(), &blacklist());
        assert_eq!(once, state);
        assert_eq!(twice, once);
    }

    #[test]
    fn rollover_moves_current_round_to_previous() {
        let first = round("hex-33", 15, "eksport", 'o');
        let (state, _) = submit(started(&first), "keso", &first);

        let next = round("hex-34", 19, "salitang", 'a');
        let state = reconcile_at(state, &next, "2026-10-19T07:00:00+08:00");

        assert_eq!(state.prev_root_word.as_deref(), Some("eksport"));
        assert_eq!(state.prev_center_letter, Some('o'));
        assert_eq!(state.root_word.as_deref(), Some("salitang"));
        assert_eq!(state.score, 0);
        assert!(state.guessed_words.is_empty());
        assert_eq!(state.game_start_date, Some(at("2026-10-19T07:00:00+08:00")));
        // history of past rounds survives
        assert_eq!(state.scores.len(), 1);
    }

    #[test]
    fn republished_round_keeps_still_valid_words() {
        let original = round("hex-33", 15, "eksport", 'o');
        let (state, _) = submit(started(&original), "keso", &original);
        let (state, _) = submit(state, "torpe", &original);
        assert_eq!(state.score, 6);

        // same id, center letter moved to k
        let fixed = round("hex-33", 15, "eksport", 'k');
        let state = reconcile_at(state, &fixed, "2026-10-15T12:00:00+08:00");

        assert_eq!(state.center_letter, Some('k'));
        assert_eq!(state.guessed_words.len(), 1);
        assert_eq!(state.guessed_words[0].word, "keso");
        assert_eq!(state.score, 1);
        assert_eq!(state.prev_root_word, None);
    }

    #[test]
    fn rank_follows_score() {
        let r = round("hex-33", 15, "eksport", 'o');
        let state = started(&r);
        assert_eq!(state.rank(&r).unwrap().index, 0);

        let (state, _) = submit(state, "eksport", &r);
        assert!(state.rank(&r).unwrap().index > 0);
    }

    #[test]
    fn wire_format() {
        let r = round("hex-33", 15, "eksport", 'o');
        let (state, _) = submit(started(&r), "eksport", &r);
        let value = serde_json::to_value(&state).unwrap();

        assert_eq!(value["rootWord"], "eksport");
        assert_eq!(value["centerLetter"], "o");
        assert_eq!(value["prevRootWord"], "");
        assert_eq!(value["gameId"], "hex-33");
        assert_eq!(
            value["guessedWords"][0],
            serde_json::json!({"word": "eksport", "isPangram": true})
        );
        assert_eq!(value["scores"]["2026-10-15"]["score"], 14);

        let back: HexGameState = serde_json::from_value(value).unwrap();
        assert_eq!(back, state);
    }
}
