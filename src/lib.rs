//! Salita
//!
//! Game state and scoring for a daily Tagalog word-guessing family: three
//! classic letter-feedback modes (Main, Mini, Max) and a hex spelling-bee mode.
//!
//! # Quick Start
//!
//! ```rust
//! use salita::core::{LetterStatus, score_guess};
//!
//! let guess: Vec<char> = "llama".chars().collect();
//! let solution: Vec<char> = "lemon".chars().collect();
//!
//! let statuses = score_guess(&guess, &solution);
//! assert_eq!(statuses[0], LetterStatus::Correct);
//! assert_eq!(statuses[1], LetterStatus::Wrong);
//! ```

// Core domain types
pub mod core;

// Errors shared across layers
pub mod error;

// Versions and enabled modes
pub mod config;

// Word lists and the cached dictionary
pub mod wordlists;

// Round schedule and date rules
pub mod schedule;

// Hex word lists, scoring and ranks
pub mod hex;

// Saved progress
pub mod persistence;

// Game state machines and the player session
pub mod game;

// Command implementations
pub mod commands;

// Terminal output and share cards
pub mod output;
