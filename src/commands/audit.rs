//! Audit every scheduled hex round
//!
//! Builds each round's answer list and reports the totals players will see,
//! flagging rounds that cannot be completed (no pangram).

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::warn;

use crate::hex::{build_word_list, is_pangram};
use crate::schedule::{GameId, RoundSchedule};
use crate::wordlists::{Blacklist, Dictionary};

/// Totals for one scheduled hex round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRow {
    pub date: NaiveDate,
    pub game_id: GameId,
    pub root_word: String,
    pub center_letter: char,
    pub max_score: u32,
    pub num_words: usize,
    pub num_pangrams: usize,
    /// Root word is itself a seven-letter pangram
    pub root_is_pangram: bool,
}

/// Build every scheduled hex round's word list in parallel, sorted by date
pub fn run_audit(
    schedule: &RoundSchedule,
    dictionary: &Dictionary,
    blacklist: &Blacklist,
    show_progress: bool,
) -> Vec<AuditRow> {
    let pb = if show_progress {
        let pb = ProgressBar::new(schedule.hex.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
        {
            pb.set_style(style.progress_chars("█▓▒░"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut rows: Vec<AuditRow> = schedule
        .hex
        .par_iter()
        .map(|scheduled| {
            let puzzle = &scheduled.puzzle;
            let words =
                build_word_list(&puzzle.root_word, puzzle.center_letter, blacklist, dictionary);
            pb.set_message(puzzle.root_word.clone());
            pb.inc(1);

            AuditRow {
                date: puzzle.date,
                game_id: puzzle.game_id.clone(),
                root_word: puzzle.root_word.clone(),
                center_letter: puzzle.center_letter,
                max_score: words.max_score,
                num_words: words.num_words,
                num_pangrams: words.num_pangrams,
                root_is_pangram: is_pangram(&puzzle.root_word),
            }
        })
        .collect();
    pb.finish_with_message("done");

    rows.sort_by_key(|row| row.date);
    for row in rows.iter().filter(|row| row.num_pangrams == 0) {
        warn!(date = %row.date, root = row.root_word.as_str(), "hex round has no pangram");
    }
    rows
}
