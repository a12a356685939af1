//! Classic mode from the terminal
//!
//! Text-based interactive play, plus a one-shot guess for scripting.

use anyhow::Result;
use colored::Colorize;

use super::get_user_input;
use crate::error::{GuessError, SessionError};
use crate::game::{Clock, GuessOutcome, Session};
use crate::output::{
    Theme, print_board, print_classic_header, print_guess_error, print_keyboard, print_result,
    print_stats,
};
use crate::persistence::Store;
use crate::schedule::{ClassicMode, RoundSource};

/// Play today's round for `mode` until it is finished or the player quits
///
/// # Errors
///
/// Returns an error if reading input fails, the mode is not enabled, or
/// progress cannot be saved.
pub fn run_play<S: Store, R: RoundSource, C: Clock>(
    session: &mut Session<S, R, C>,
    mode: ClassicMode,
    theme: Theme,
) -> Result<()> {
    let round = session
        .round(mode)
        .ok_or(SessionError::ModeDisabled(mode.into()))?
        .clone();
    print_classic_header(mode, &round);
    print_board(mode, session.classic_state(mode));

    println!("Type a {}-letter word. Commands: 'quit' to exit\n", mode.word_length());

    while !session.classic_state(mode).is_finished() {
        let input = get_user_input("Guess")?;
        match input.to_lowercase().as_str() {
            "quit" | "q" | "exit" => {
                println!("\n👋 Your progress is saved.\n");
                return Ok(());
            }
            "" => continue,
            _ => {}
        }

        match session.submit_guess(mode, &input) {
            Ok(GuessOutcome::Scored { .. }) => {
                print_board(mode, session.classic_state(mode));
                print_keyboard(&session.keyboard(mode));
            }
            Ok(GuessOutcome::GameOver) => break,
            Err(SessionError::Guess(GuessError::RoundExpired)) => {
                print_guess_error(&GuessError::RoundExpired);
                return Ok(());
            }
            Err(SessionError::Guess(err)) => print_guess_error(&err),
            Err(err) => return Err(err.into()),
        }
    }

    finish(session, mode, theme);
    Ok(())
}

/// Submit a single guess and show the board
///
/// # Errors
///
/// Returns an error if the guess is refused or progress cannot be saved.
pub fn run_guess<S: Store, R: RoundSource, C: Clock>(
    session: &mut Session<S, R, C>,
    mode: ClassicMode,
    word: &str,
    theme: Theme,
) -> Result<()> {
    match session.submit_guess(mode, word)? {
        GuessOutcome::Scored { .. } => {
            print_board(mode, session.classic_state(mode));
            print_keyboard(&session.keyboard(mode));
            if session.classic_state(mode).is_finished() {
                finish(session, mode, theme);
            }
        }
        GuessOutcome::GameOver => {
            println!("{}", "Today's round is already over.".yellow());
            finish(session, mode, theme);
        }
    }
    Ok(())
}

fn finish<S: Store, R: RoundSource, C: Clock>(
    session: &Session<S, R, C>,
    mode: ClassicMode,
    theme: Theme,
) {
    let data = session.classic_state(mode);
    print_result(data);
    if let Some(text) = session.share_classic(mode, theme) {
        println!("\n{text}\n");
    }
    print_stats(mode, &data.summary());
}
