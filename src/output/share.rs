//! Plain-text share cards
//!
//! Players paste these into chats, so the exact bytes are part of the
//! contract: the same finished game always renders the same text.

use super::formatters::emoji_row;
use crate::core::LetterStatus;
use crate::game::{GameStatus, HexGameState, UserGameData};
use crate::hex::rank;
use crate::schedule::{ClassicMode, GameId, HexRound};

/// Site identifier closing every share card
pub const SHARE_FOOTER: &str = "#Salita";

/// Display theme, which decides the tile used for wrong letters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

#[must_use]
pub const fn status_emoji(status: LetterStatus, theme: Theme) -> &'static str {
    match (status, theme) {
        (LetterStatus::Correct, _) => "🟩",
        (LetterStatus::WrongSpot, _) => "🟨",
        (LetterStatus::Wrong, Theme::Dark) => "⬛",
        (LetterStatus::Wrong, Theme::Light) => "⬜",
    }
}

/// Emoji grid for a finished classic round
///
/// Returns `None` while the round is still being played.
///
/// # Examples
/// ```
/// use chrono::DateTime;
/// use salita::core::{LetterMark, LetterStatus};
/// use salita::game::UserGameData;
/// use salita::output::share::{Theme, classic_share_text};
/// use salita::schedule::{ClassicMode, GameId};
///
/// let marks: Vec<LetterMark> = "bahay"
///     .chars()
///     .map(|letter| LetterMark { letter, status: LetterStatus::Correct })
///     .collect();
/// let now = DateTime::parse_from_rfc3339("2026-10-17T09:00:00+08:00").unwrap();
/// let data = UserGameData::new(ClassicMode::Main)
///     .record_guess(ClassicMode::Main, marks, now, "bahay");
///
/// let text =
///     classic_share_text(ClassicMode::Main, &GameId::Number(412), &data, Theme::Dark).unwrap();
/// assert_eq!(text, "🟩🟩🟩🟩🟩\nSalita Main #412 1/6\n#Salita");
/// ```
#[must_use]
pub fn classic_share_text(
    mode: ClassicMode,
    game_id: &GameId,
    data: &UserGameData,
    theme: Theme,
) -> Option<String> {
    let tries = match data.game_status {
        GameStatus::Playing => return None,
        GameStatus::Win => data.history.len().to_string(),
        GameStatus::Lose => "X".to_string(),
    };

    let mut lines: Vec<String> = data
        .history
        .iter()
        .map(|guess| emoji_row(&guess.word, theme))
        .collect();
    lines.push(format!("Salita {} #{game_id} {tries}/{}", mode.label(), mode.num_tries()));
    lines.push(SHARE_FOOTER.to_string());

    Some(lines.join("\n"))
}

/// Share card for the hex round in progress
///
/// The header counts found words, the second line shows the rank and score.
#[must_use]
pub fn hex_share_text(state: &HexGameState, round: &HexRound) -> String {
    let header = format!(
        "Salita Hex #{} {}/{}",
        round.game_id(),
        state.guessed_words.len(),
        round.num_words
    );
    let score = format!("{}/{}", state.score, round.max_score);
    let standing = match rank(state.score, round.max_score) {
        Some(rank) => format!("{} {} {score}", rank.icon, rank.name),
        None => score,
    };

    [header, standing, SHARE_FOOTER.to_string()].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BUILD_VERSION, LetterMark};
    use crate::game::GuessedWord;
    use crate::schedule::HexPuzzle;
    use chrono::{DateTime, NaiveDate};
    use LetterStatus::{Correct, Wrong, WrongSpot};

    fn row(statuses: &[LetterStatus]) -> Vec<LetterMark> {
        statuses
            .iter()
            .map(|&status| LetterMark { letter: 'a', status })
            .collect()
    }

    fn finished(rows: &[&[LetterStatus]], solution: &str) -> UserGameData {
        let now = DateTime::parse_from_rfc3339("2026-10-17T09:00:00+08:00").unwrap();
        rows.iter().fold(UserGameData::new(ClassicMode::Main), |data, statuses| {
            data.record_guess(ClassicMode::Main, row(statuses), now, solution)
        })
    }

    #[test]
    fn emoji_mapping() {
        assert_eq!(status_emoji(Correct, Theme::Light), "🟩");
        assert_eq!(status_emoji(WrongSpot, Theme::Dark), "🟨");
        assert_eq!(status_emoji(Wrong, Theme::Dark), "⬛");
        assert_eq!(status_emoji(Wrong, Theme::Light), "⬜");
    }

    #[test]
    fn win_in_two() {
        let data = finished(&[&[Wrong, Correct, Wrong, Wrong, Wrong], &[Correct; 5]], "bahay");
        let game_id = GameId::Number(412);
        let text = classic_share_text(ClassicMode::Main, &game_id, &data, Theme::Dark).unwrap();
        assert_eq!(text, "⬛🟩⬛⬛⬛\n🟩🟩🟩🟩🟩\nSalita Main #412 2/6\n#Salita");
    }

    #[test]
    fn light_theme_loss() {
        let guess: &[LetterStatus] = &[Wrong, WrongSpot, Wrong, Wrong, Wrong];
        let data = finished(&[guess; 6], "bahay");
        let text =
            classic_share_text(ClassicMode::Main, &GameId::Number(7), &data, Theme::Light).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "⬜🟨⬜⬜⬜");
        assert_eq!(lines[6], "Salita Main #7 X/6");
        assert_eq!(lines[7], SHARE_FOOTER);
    }

    #[test]
    fn unfinished_round_has_no_card() {
        let data = finished(&[&[Wrong; 5]], "bahay");
        let text = classic_share_text(ClassicMode::Main, &GameId::Number(1), &data, Theme::Dark);
        assert_eq!(text, None);
    }

    fn hex_round(max_score: u32, num_words: usize) -> HexRound {
        HexRound {
            puzzle: HexPuzzle {
                game_id: GameId::from("hex-33"),
                date: NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
                root_word: "eksport".into(),
                center_letter: 'o',
            },
            max_score,
            num_words,
            num_pangrams: 1,
        }
    }

    #[test]
    fn hex_card() {
        let mut state = HexGameState::fresh(BUILD_VERSION);
        state.score = 19;
        state.guessed_words = vec![
            GuessedWord {
                word: "torpe".into(),
                is_pangram: false,
            },
            GuessedWord {
                word: "eksport".into(),
                is_pangram: true,
            },
        ];

        let text = hex_share_text(&state, &hex_round(40, 10));
        assert_eq!(text, "Salita Hex #hex-33 2/10\n🐝 henyo 19/40\n#Salita");
    }

    #[test]
    fn hex_card_without_answers() {
        let state = HexGameState::fresh(BUILD_VERSION);
        let text = hex_share_text(&state, &hex_round(0, 0));
        assert_eq!(text, "Salita Hex #hex-33 0/0\n0/0\n#Salita");
    }
}
