//! Where round data comes from
//!
//! The engine only sees the [`RoundSource`] trait. [`ScheduleSource`] serves a
//! published schedule (usually the JSON file the site's round endpoint serves).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::{ClassicMode, ClassicRound, HexPuzzle, Mode};
use crate::error::FetchError;

/// Supplies the public data of the round published for a date
pub trait RoundSource {
    /// Fetch the classic round for `mode` published on `date`
    ///
    /// # Errors
    /// `RoundNotFound` when nothing is published, `PrivateRound` when the round
    /// is not available to this caller.
    fn fetch_classic(&self, mode: ClassicMode, date: NaiveDate) -> Result<ClassicRound, FetchError>;

    /// Fetch the hex puzzle published on `date`
    ///
    /// # Errors
    /// Same as [`RoundSource::fetch_classic`].
    fn fetch_hex(&self, date: NaiveDate) -> Result<HexPuzzle, FetchError>;
}

/// A scheduled classic round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledClassic {
    #[serde(flatten)]
    pub round: ClassicRound,
    /// Private rounds are only served to authorized callers
    #[serde(default)]
    pub private: bool,
}

/// A scheduled hex puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledHex {
    #[serde(flatten)]
    pub puzzle: HexPuzzle,
    #[serde(default)]
    pub private: bool,
}

/// Every published round, grouped by mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSchedule {
    #[serde(default)]
    pub main: Vec<ScheduledClassic>,
    #[serde(default)]
    pub mini: Vec<ScheduledClassic>,
    #[serde(default)]
    pub max: Vec<ScheduledClassic>,
    #[serde(default)]
    pub hex: Vec<ScheduledHex>,
}

impl RoundSchedule {
    /// Load a schedule from a JSON file
    ///
    /// # Errors
    /// Returns `FetchError::Api` if the file cannot be read or parsed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| FetchError::from_io("rounds", &e))?;
        let schedule: Self =
            serde_json::from_str(&content).map_err(|e| FetchError::from_json("rounds", &e))?;

        info!(
            path = %path.display(),
            main = schedule.main.len(),
            mini = schedule.mini.len(),
            max = schedule.max.len(),
            hex = schedule.hex.len(),
            "loaded round schedule"
        );
        Ok(schedule)
    }

    /// Rounds scheduled for a classic mode
    #[must_use]
    pub fn classic(&self, mode: ClassicMode) -> &[ScheduledClassic] {
        match mode {
            ClassicMode::Main => &self.main,
            ClassicMode::Mini => &self.mini,
            ClassicMode::Max => &self.max,
        }
    }

    fn classic_mut(&mut self, mode: ClassicMode) -> &mut Vec<ScheduledClassic> {
        match mode {
            ClassicMode::Main => &mut self.main,
            ClassicMode::Mini => &mut self.mini,
            ClassicMode::Max => &mut self.max,
        }
    }
}

/// Serves rounds out of an in-memory [`RoundSchedule`]
#[derive(Debug, Clone, Default)]
pub struct ScheduleSource {
    schedule: RoundSchedule,
    authorized: bool,
}

impl ScheduleSource {
    #[must_use]
    pub fn new(schedule: RoundSchedule) -> Self {
        Self {
            schedule,
            authorized: false,
        }
    }

    /// Load the schedule file at `path`
    ///
    /// # Errors
    /// See [`RoundSchedule::from_path`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FetchError> {
        RoundSchedule::from_path(path).map(Self::new)
    }

    /// Allow private rounds to be served
    #[must_use]
    pub fn authorized(mut self, authorized: bool) -> Self {
        self.authorized = authorized;
        self
    }

    /// Publish a public classic round
    #[must_use]
    pub fn with_classic(mut self, mode: ClassicMode, round: ClassicRound) -> Self {
        self.schedule
            .classic_mut(mode)
            .push(ScheduledClassic { round, private: false });
        self
    }

    /// Publish a public hex puzzle
    #[must_use]
    pub fn with_hex(mut self, puzzle: HexPuzzle) -> Self {
        self.schedule.hex.push(ScheduledHex {
            puzzle,
            private: false,
        });
        self
    }

    #[must_use]
    pub fn schedule(&self) -> &RoundSchedule {
        &self.schedule
    }

    fn check_access(&self, private: bool) -> Result<(), FetchError> {
        if private && !self.authorized {
            return Err(FetchError::PrivateRound);
        }
        Ok(())
    }
}

impl RoundSource for ScheduleSource {
    fn fetch_classic(
        &self,
        mode: ClassicMode,
        date: NaiveDate,
    ) -> Result<ClassicRound, FetchError> {
        let scheduled = self
            .schedule
            .classic(mode)
            .iter()
            .find(|s| s.round.date == date)
            .ok_or(FetchError::RoundNotFound(Mode::Classic(mode)))?;

        self.check_access(scheduled.private)?;
        debug!(%mode, %date, game_id = %scheduled.round.game_id, "fetched classic round");
        Ok(scheduled.round.clone())
    }

    fn fetch_hex(&self, date: NaiveDate) -> Result<HexPuzzle, FetchError> {
        let scheduled = self
            .schedule
            .hex
            .iter()
            .find(|s| s.puzzle.date == date)
            .ok_or(FetchError::RoundNotFound(Mode::Hex))?;

        self.check_access(scheduled.private)?;
        debug!(%date, game_id = %scheduled.puzzle.game_id, "fetched hex puzzle");
        Ok(scheduled.puzzle.clone().normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::GameId;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    const SCHEDULE: &str = r#"{
        "main": [
            {"gameId": 410, "date": "2026-10-15", "solutionWord": "kotse"},
            {"gameId": 411, "date": "2026-10-16", "solutionWord": "torpe", "private": true}
        ],
        "hex": [
            {"gameId": "hex-33", "date": "2026-10-15", "rootWord": "eksport", "centerLetter": "o"}
        ]
    }"#;

    fn source() -> ScheduleSource {
        ScheduleSource::new(serde_json::from_str(SCHEDULE).unwrap())
    }

    #[test]
    fn fetch_published_classic_round() {
        let round = source().fetch_classic(ClassicMode::Main, date(15)).unwrap();
        assert_eq!(round.game_id, GameId::Number(410));
        assert_eq!(round.solution_word, "kotse");
    }

    #[test]
    fn missing_round_names_the_mode() {
        let err = source().fetch_classic(ClassicMode::Mini, date(15)).unwrap_err();
        assert!(matches!(
            err,
            FetchError::RoundNotFound(Mode::Classic(ClassicMode::Mini))
        ));

        let err = source().fetch_hex(date(12)).unwrap_err();
        assert!(matches!(err, FetchError::RoundNotFound(Mode::Hex)));
    }

    #[test]
    fn private_rounds_need_authorization() {
        let err = source().fetch_classic(ClassicMode::Main, date(16)).unwrap_err();
        assert!(matches!(err, FetchError::PrivateRound));

        let round = source()
            .authorized(true)
            .fetch_classic(ClassicMode::Main, date(16))
            .unwrap();
        assert_eq!(round.solution_word, "torpe");
    }

    #[test]
    fn fetch_hex_puzzle() {
        let puzzle = source().fetch_hex(date(15)).unwrap();
        assert_eq!(puzzle.root_word, "eksport");
        assert_eq!(puzzle.center_letter, 'o');
        assert_eq!(puzzle.game_id, GameId::from("hex-33"));
    }

    #[test]
    fn fetch_hex_lowercases_puzzle() {
        let json = r#"{"hex": [{
            "gameId": "hex-34", "date": "2026-10-19", "rootWord": "SALITANG", "centerLetter": "A"
        }]}"#;
        let source = ScheduleSource::new(serde_json::from_str(json).unwrap());
        let puzzle = source.fetch_hex(date(19)).unwrap();
        assert_eq!(puzzle.root_word, "salitang");
        assert_eq!(puzzle.center_letter, 'a');
    }

    #[test]
    fn builder_publishes_rounds() {
        let source = ScheduleSource::default().with_classic(
            ClassicMode::Max,
            ClassicRound {
                game_id: 7.into(),
                date: date(1),
                solution_word: "halaman".into(),
            },
        );
        assert!(source.fetch_classic(ClassicMode::Max, date(1)).is_ok());
        assert!(source.fetch_classic(ClassicMode::Main, date(1)).is_err());
    }

    #[test]
    fn from_path_reports_missing_file() {
        let err = ScheduleSource::from_path("/nonexistent/rounds.json").unwrap_err();
        assert!(matches!(err, FetchError::Api { status: 404, .. }));
    }

    #[test]
    fn bundled_schedule_parses() {
        let schedule =
            RoundSchedule::from_path(concat!(env!("CARGO_MANIFEST_DIR"), "/data/rounds.json"))
                .unwrap();
        assert!(!schedule.main.is_empty());
        assert!(!schedule.hex.is_empty());
        assert!(
            schedule
                .hex
                .iter()
                .all(|h| crate::schedule::is_hex_publish_day(h.puzzle.date))
        );
    }
}
