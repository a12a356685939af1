//! The hex (seven-letter anagram) mode: answer rules, scoring and ranks

mod rank;
mod scoring;

pub use rank::{Rank, next_rank, rank};
pub use scoring::{
    MAX_WORD_LENGTH, MIN_WORD_LENGTH, PANGRAM_BONUS, PANGRAM_LETTERS, WordLength, WordList,
    build_word_list, check_length, is_pangram, is_valid_word, word_score,
};

use rand::Rng;
use rand::seq::SliceRandom;

/// The root word's letters with the center letter removed, shuffled
///
/// Only the outer ring moves; the center letter stays fixed for display.
pub fn shuffle_letters<R: Rng + ?Sized>(
    root_word: &str,
    center_letter: char,
    rng: &mut R,
) -> Vec<char> {
    let mut outer: Vec<char> = Vec::new();
    for letter in root_word.to_lowercase().chars() {
        if letter != center_letter && !outer.contains(&letter) {
            outer.push(letter);
        }
    }
    outer.shuffle(rng);
    outer
}
