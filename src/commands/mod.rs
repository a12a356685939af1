//! Command implementations

pub mod audit;
pub mod hex;
pub mod play;
pub mod report;

pub use audit::{AuditRow, run_audit};
pub use hex::{run_hex, run_hex_word};
pub use play::{run_guess, run_play};
pub use report::{run_reset, run_share, run_stats};

use std::io::{self, Write};

/// Get user input with a prompt
fn get_user_input(prompt: &str) -> io::Result<String> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_string())
}
