//! Per-letter feedback for a classic guess
//!
//! Each guessed letter is classified as one of:
//! - `Wrong` (letter not in the remaining solution letters)
//! - `WrongSpot` (letter in the solution, different position)
//! - `Correct` (letter in the same position)
//!
//! Statuses are ordered `Wrong < WrongSpot < Correct`, which is also the
//! precedence used when summarizing many guesses into one status per letter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Feedback for a single guessed letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LetterStatus {
    Wrong,
    WrongSpot,
    Correct,
}

/// A guessed letter together with its feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterMark {
    pub letter: char,
    pub status: LetterStatus,
}

/// Score `guess` against `solution`
///
/// Implements the standard two-pass rule so repeated letters are never
/// over-credited: each solution slot can back at most one non-wrong mark.
///
/// # Algorithm
/// 1. First pass: exact position matches become `Correct` and consume their slot
/// 2. Second pass: every other letter takes the leftmost unused slot holding the
///    same letter (`WrongSpot`), or is `Wrong` when none is left
///
/// Both sequences are expected to have equal length; letters of `guess` beyond
/// the end of `solution` can only ever be `WrongSpot` or `Wrong`.
///
/// # Examples
/// ```
/// use salita::core::{LetterStatus, score_guess};
///
/// let guess: Vec<char> = "llama".chars().collect();
/// let solution: Vec<char> = "lemon".chars().collect();
/// let statuses = score_guess(&guess, &solution);
///
/// assert_eq!(statuses[0], LetterStatus::Correct);
/// assert_eq!(statuses[1], LetterStatus::Wrong); // the only L is already used
/// ```
#[must_use]
pub fn score_guess(guess: &[char], solution: &[char]) -> Vec<LetterStatus> {
    let mut statuses = vec![LetterStatus::Wrong; guess.len()];
    let mut used = vec![false; solution.len()];

    for (i, (g, s)) in guess.iter().zip(solution).enumerate() {
        if g == s {
            statuses[i] = LetterStatus::Correct;
            used[i] = true;
        }
    }

    for (i, letter) in guess.iter().enumerate() {
        if statuses[i] == LetterStatus::Correct {
            continue;
        }

        let slot = (0..solution.len()).find(|&j| !used[j] && solution[j] == *letter);

        if let Some(j) = slot {
            statuses[i] = LetterStatus::WrongSpot;
            used[j] = true;
        }
    }

    statuses
}

/// Score and pair each guessed letter with its status
#[must_use]
pub fn mark_guess(guess: &[char], solution: &[char]) -> Vec<LetterMark> {
    guess
        .iter()
        .zip(score_guess(guess, solution))
        .map(|(&letter, status)| LetterMark { letter, status })
        .collect()
}

/// True when every letter of a scored guess is `Correct`
#[must_use]
pub fn is_solved(marks: &[LetterMark]) -> bool {
    !marks.is_empty() && marks.iter().all(|m| m.status == LetterStatus::Correct)
}

/// Best known status for every letter seen across a set of guesses
///
/// A letter known `Correct` anywhere is never downgraded by a later guess.
pub fn merge_letter_statuses<'a, I>(rows: I) -> BTreeMap<char, LetterStatus>
where
    I: IntoIterator<Item = &'a [LetterMark]>,
{
    let mut best = BTreeMap::new();
    for mark in rows.into_iter().flatten() {
        best.entry(mark.letter)
            .and_modify(|status: &mut LetterStatus| *status = (*status).max(mark.status))
            .or_insert(mark.status);
    }
    best
}
