//! Hex mode from the terminal

use anyhow::Result;
use colored::Colorize;

use super::get_user_input;
use crate::error::{GuessError, SessionError};
use crate::game::{Clock, HexOutcome, Session};
use crate::output::{
    print_found_words, print_guess_error, print_hex_outcome, print_hex_status, print_word_list,
};
use crate::persistence::Store;
use crate::schedule::{Mode, RoundSource};

/// Play the current hex round interactively
///
/// # Errors
///
/// Returns an error if reading input fails, hex is not enabled, or progress
/// cannot be saved.
pub fn run_hex<S: Store, R: RoundSource, C: Clock>(session: &mut Session<S, R, C>) -> Result<()> {
    let mut rng = rand::rng();
    let mut outer = session
        .shuffled_letters(&mut rng)
        .ok_or(SessionError::ModeDisabled(Mode::Hex))?;
    show(session, &outer);

    println!("Commands: 'shuffle', 'words', 'prev', 'share', 'quit'\n");

    loop {
        let input = get_user_input("Word")?;
        match input.to_lowercase().as_str() {
            "quit" | "q" | "exit" => {
                println!("\n👋 Your progress is saved.\n");
                return Ok(());
            }
            "shuffle" | "s" => {
                if let Some(letters) = session.shuffled_letters(&mut rng) {
                    outer = letters;
                }
                show(session, &outer);
            }
            "words" | "w" => print_found_words(session.hex_state()),
            "prev" | "p" => match session.previous_answers() {
                Some(list) => print_word_list("Previous round answers", &list),
                None => println!("No previous round yet.\n"),
            },
            "share" => {
                if let Some(text) = session.share_hex() {
                    println!("\n{text}\n");
                }
            }
            "" => {}
            _ => match session.submit_word(&input) {
                Ok(outcome) => {
                    print_hex_outcome(&outcome);
                    if matches!(outcome, HexOutcome::Accepted { .. }) {
                        show(session, &outer);
                    }
                }
                Err(SessionError::Guess(GuessError::RoundExpired)) => {
                    print_guess_error(&GuessError::RoundExpired);
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            },
        }
    }
}

/// Submit a single hex word
///
/// # Errors
///
/// Returns an error if hex is not enabled, the round has expired, or progress
/// cannot be saved.
pub fn run_hex_word<S: Store, R: RoundSource, C: Clock>(
    session: &mut Session<S, R, C>,
    word: &str,
) -> Result<()> {
    let outcome = session.submit_word(word)?;
    print_hex_outcome(&outcome);

    let state = session.hex_state();
    if let Some(round) = session.hex_round() {
        println!(
            "   Score: {} / {}",
            state.score.to_string().bright_yellow().bold(),
            round.max_score
        );
    }
    Ok(())
}

fn show<S: Store, R: RoundSource, C: Clock>(session: &Session<S, R, C>, outer: &[char]) {
    if let Some(round) = session.hex_round() {
        print_hex_status(session.hex_state(), round, outer);
    }
}
