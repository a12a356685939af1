//! Core domain types for the word games
//!
//! This module contains the fundamental domain types with no I/O.
//! All types here are pure and testable in isolation.

mod status;
mod version;
mod word;

pub use status::{
    LetterMark, LetterStatus, is_solved, mark_guess, merge_letter_statuses, score_guess,
};
pub use version::{
    BUILD_VERSION, MIN_DICTIONARY_VERSION, MIN_SUPPORTED_VERSION, Version, is_supported_version,
};
pub use word::{Word, WordError};
