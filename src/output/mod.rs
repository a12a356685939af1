//! Terminal output formatting
//!
//! Display utilities for the CLI, and the share cards players copy out.

pub mod display;
pub mod formatters;
pub mod share;

pub use display::{
    print_audit, print_board, print_classic_header, print_found_words, print_guess_error,
    print_hex_outcome, print_hex_status, print_keyboard, print_result, print_stats,
    print_word_list,
};
pub use share::{SHARE_FOOTER, Theme, classic_share_text, hex_share_text};
