//! Game state: per-mode progress records and the session that drives them

mod classic;
mod clock;
mod hex;
mod session;
mod wire;

pub use classic::{Guess, GuessOutcome, GameStatus, StatsSummary, UserGameData, check_guess};
pub use clock::{Clock, FixedClock, SystemClock};
pub use hex::{GuessedWord, HexGameState, HexOutcome, ScoreEntry};
pub use session::{Session, SessionParts};
