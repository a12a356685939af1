//! Display functions for game state and command results

use colored::Colorize;
use std::collections::BTreeMap;

use super::formatters::{colored_row, create_progress_bar, letter_tile};
use crate::commands::AuditRow;
use crate::core::LetterStatus;
use crate::error::GuessError;
use crate::game::{GameStatus, HexGameState, HexOutcome, StatsSummary, UserGameData};
use crate::hex::{WordList, next_rank};
use crate::schedule::{ClassicMode, ClassicRound, HexRound};

const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjklñ", "zxcvbnm"];

/// Print the banner for a classic round
pub fn print_classic_header(mode: ClassicMode, round: &ClassicRound) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        format!("SALITA {}", mode.label().to_uppercase()).bright_cyan().bold(),
        format!("#{}", round.game_id).bright_yellow().bold()
    );
    println!(
        " {} letters, {} tries  ·  {}",
        mode.word_length(),
        mode.num_tries(),
        round.date
    );
    println!("{}", "═".repeat(60).cyan());
}

/// Print every guess so far, plus empty rows for the tries left
pub fn print_board(mode: ClassicMode, data: &UserGameData) {
    println!();
    for guess in &data.history {
        println!("   {}", colored_row(&guess.word));
    }
    let blank = " · ".repeat(mode.word_length());
    for _ in 0..data.remaining_tries(mode) {
        println!("   {}", blank.bright_black());
    }
    println!();
}

/// Print the on-screen keyboard with the best known status of each letter
pub fn print_keyboard(keyboard: &BTreeMap<char, LetterStatus>) {
    for (indent, row) in KEYBOARD_ROWS.iter().enumerate() {
        let keys: String = row
            .chars()
            .map(|c| letter_tile(c, keyboard.get(&c).copied()).to_string())
            .collect();
        println!("   {}{keys}", " ".repeat(indent * 2));
    }
    println!();
}

/// Print why a guess was refused
pub fn print_guess_error(err: &GuessError) {
    println!("{} {err}\n", "✗".red().bold());
}

/// Print the end-of-round message
pub fn print_result(data: &UserGameData) {
    match data.game_status {
        GameStatus::Playing => {}
        GameStatus::Win => println!(
            "{}",
            format!("✅ Solved in {} guesses!", data.history.len())
                .green()
                .bold()
        ),
        GameStatus::Lose => println!(
            "{} {}",
            "❌ Out of tries. The word was".red().bold(),
            data.correct_answer
                .as_deref()
                .unwrap_or_default()
                .to_uppercase()
                .bright_yellow()
                .bold()
        ),
    }
}

/// Print player statistics for a mode
pub fn print_stats(mode: ClassicMode, stats: &StatsSummary) {
    println!("\n📊 {}", format!("{} statistics", mode.label()).bright_cyan().bold());
    println!("   Played:          {}", stats.played);
    println!(
        "   Win %:           {}",
        stats.win_percentage.to_string().bright_yellow().bold()
    );
    println!("   Current streak:  {}", stats.current_streak);
    println!("   Longest streak:  {}", stats.longest_streak);

    println!("\n📈 {}", "Guess distribution:".bright_cyan().bold());
    let most = stats.distribution.iter().copied().max().unwrap_or(0);
    for (i, &count) in stats.distribution.iter().enumerate() {
        let bar = create_progress_bar(count, most, 30);
        println!("   {}: {} {count}", i + 1, bar.green());
    }
}

/// Print the hex puzzle, score and rank
pub fn print_hex_status(state: &HexGameState, round: &HexRound, outer: &[char]) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "SALITA HEX".bright_cyan().bold(),
        format!("#{}", round.game_id()).bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    let (top, bottom) = outer.split_at(outer.len() / 2);
    let ring = |letters: &[char]| -> String {
        letters
            .iter()
            .map(|&c| letter_tile(c, None).to_string())
            .collect()
    };
    println!("\n        {}", ring(top));
    println!(
        "      {}{}",
        " ".repeat(3),
        letter_tile(round.center_letter(), Some(LetterStatus::Correct))
    );
    println!("        {}\n", ring(bottom));

    println!(
        "   Score: {} / {}   Words: {} / {}   Pangrams: {} / {}",
        state.score.to_string().bright_yellow().bold(),
        round.max_score,
        state.guessed_words.len(),
        round.num_words,
        state.guessed_words.iter().filter(|g| g.is_pangram).count(),
        round.num_pangrams
    );
    if let Some(rank) = state.rank(round) {
        println!(
            "   Rank:  {} {}  [{}]",
            rank.icon,
            rank.name.bright_green().bold(),
            create_progress_bar(state.score, round.max_score, 30).green()
        );
    }
    if let Some((next, missing)) = next_rank(state.score, round.max_score) {
        println!("   {missing} more points to {}", next.name.bright_white());
    }
    println!();
}

/// Print the words found this round
pub fn print_found_words(state: &HexGameState) {
    if state.guessed_words.is_empty() {
        println!("   No words found yet.\n");
        return;
    }
    let mut words: Vec<_> = state.guessed_words.iter().collect();
    words.sort_by(|a, b| a.word.cmp(&b.word));
    for found in words {
        if found.is_pangram {
            println!("   • {}", found.word.to_uppercase().bright_yellow().bold());
        } else {
            println!("   • {}", found.word.to_uppercase());
        }
    }
    println!();
}

/// Print the answers to a finished round
pub fn print_word_list(title: &str, list: &WordList) {
    println!(
        "\n{} ({} words, {} points)",
        title.bright_cyan().bold(),
        list.num_words,
        list.max_score
    );
    for word in &list.words {
        println!("   • {}", word.to_uppercase());
    }
    println!();
}

/// Print what happened to a hex word
pub fn print_hex_outcome(outcome: &HexOutcome) {
    match outcome {
        HexOutcome::Accepted {
            word,
            points,
            is_pangram,
            score,
        } => {
            let label = if *is_pangram { "Pangram!" } else { "Nice!" };
            println!(
                "{} {} +{points}  (score {score})\n",
                label.green().bold(),
                word.to_uppercase().bright_white().bold()
            );
        }
        HexOutcome::AlreadyAnswered(word) => {
            println!("{} {} was already found\n", "•".yellow(), word.to_uppercase());
        }
        HexOutcome::TooShort => println!("{} Too short\n", "✗".red().bold()),
        HexOutcome::TooLong => println!("{} Too long\n", "✗".red().bold()),
        HexOutcome::MissingCenterLetter => {
            println!("{} Missing center letter\n", "✗".red().bold());
        }
        HexOutcome::InvalidLetters => {
            println!("{} Uses letters outside the puzzle\n", "✗".red().bold());
        }
        HexOutcome::NotInWordList => println!("{} Not in word list\n", "✗".red().bold()),
    }
}

/// Print the hex round audit table
pub fn print_audit(rows: &[AuditRow]) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "HEX ROUND AUDIT".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!(
        "\n   {:<10} {:<12} {:<10} {:>6} {:>6} {:>8}",
        "Date", "Game", "Root", "Score", "Words", "Pangrams"
    );
    for row in rows {
        let line = format!(
            "   {:<10} {:<12} {:<10} {:>6} {:>6} {:>8}",
            row.date.to_string(),
            row.game_id.to_string(),
            format!("{}/{}", row.root_word, row.center_letter),
            row.max_score,
            row.num_words,
            row.num_pangrams
        );
        if row.num_pangrams == 0 {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
    println!();
}
