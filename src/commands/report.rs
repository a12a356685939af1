//! Statistics, share cards and resetting progress

use anyhow::Result;
use colored::Colorize;

use super::get_user_input;
use crate::game::{Clock, Session};
use crate::output::{Theme, print_stats};
use crate::persistence::Store;
use crate::schedule::{ClassicMode, RoundSource};

/// Print statistics for every enabled classic mode
pub fn run_stats<S: Store, R: RoundSource, C: Clock>(session: &Session<S, R, C>) {
    for &mode in &session.config().classic_modes {
        print_stats(mode, &session.classic_state(mode).summary());
    }
    if let Some(round) = session.hex_round() {
        let state = session.hex_state();
        println!(
            "\n🐝 {} {} / {} points, {} words",
            "Hex:".bright_cyan().bold(),
            state.score,
            round.max_score,
            state.guessed_words.len()
        );
    }
    println!();
}

/// Print share cards: one mode, or every finished round when `mode` is `None`
pub fn run_share<S: Store, R: RoundSource, C: Clock>(
    session: &Session<S, R, C>,
    mode: Option<ClassicMode>,
    hex: bool,
    theme: Theme,
) {
    let modes = match mode {
        Some(mode) => vec![mode],
        None => session.config().classic_modes.clone(),
    };

    let mut printed = false;
    for mode in modes {
        if let Some(text) = session.share_classic(mode, theme) {
            println!("{text}\n");
            printed = true;
        }
    }
    if (hex || mode.is_none())
        && let Some(text) = session.share_hex()
    {
        println!("{text}\n");
        printed = true;
    }

    if !printed {
        println!("{}", "Nothing to share yet. Finish a round first.".yellow());
    }
}

/// Delete all saved progress, asking first unless `confirmed`
///
/// # Errors
///
/// Returns an error if reading input fails or the saves cannot be rewritten.
pub fn run_reset<S: Store, R: RoundSource, C: Clock>(
    session: &mut Session<S, R, C>,
    confirmed: bool,
) -> Result<()> {
    let confirmed = confirmed
        || matches!(
            get_user_input("Delete all progress and statistics? (yes/no)")?
                .to_lowercase()
                .as_str(),
            "yes" | "y"
        );

    if confirmed {
        session.reset_all()?;
        println!("{}", "🔄 All progress has been reset.".green().bold());
    } else {
        println!("Nothing was changed.");
    }
    Ok(())
}
