//! Formatting utilities for terminal output

use colored::{ColoredString, Colorize};

use super::share::{Theme, status_emoji};
use crate::core::{LetterMark, LetterStatus};

/// A letter as a colored tile
#[must_use]
pub fn letter_tile(letter: char, status: Option<LetterStatus>) -> ColoredString {
    let text = format!(" {} ", letter.to_uppercase());
    match status {
        Some(LetterStatus::Correct) => text.black().on_green().bold(),
        Some(LetterStatus::WrongSpot) => text.black().on_yellow().bold(),
        Some(LetterStatus::Wrong) => text.white().on_bright_black(),
        None => text.bold(),
    }
}

/// A scored guess as a row of colored tiles
#[must_use]
pub fn colored_row(marks: &[LetterMark]) -> String {
    marks
        .iter()
        .map(|mark| letter_tile(mark.letter, Some(mark.status)).to_string())
        .collect()
}

/// A scored guess as emoji squares
#[must_use]
pub fn emoji_row(marks: &[LetterMark], theme: Theme) -> String {
    marks
        .iter()
        .map(|mark| status_emoji(mark.status, theme))
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: u32, max: u32, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        let ratio = u64::from(value.min(max)) * width as u64 / u64::from(max);
        usize::try_from(ratio).unwrap_or(width)
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
