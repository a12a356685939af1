//! Daily round scheduling
//!
//! Classic modes publish a round every calendar day. The hex mode publishes only
//! on Mondays and Thursdays, so "today's" hex round is the one from the most
//! recent publish day.

mod round;
mod source;

pub use round::{ClassicRound, GameId, HexPuzzle, HexRound};
pub use source::{RoundSchedule, RoundSource, ScheduleSource, ScheduledClassic, ScheduledHex};

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weekdays on which a new hex round is published
///
/// Monday to Thursday is three days and Thursday to Monday is four, so the most
/// recent publish day before any date is unambiguous.
pub const HEX_PUBLISH_DAYS: [Weekday; 2] = [Weekday::Mon, Weekday::Thu];

/// The classic (letter-feedback) game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassicMode {
    /// Five letters, six tries
    Main,
    /// Four letters, five tries
    Mini,
    /// Seven letters, eight tries
    Max,
}

impl ClassicMode {
    pub const ALL: [Self; 3] = [Self::Main, Self::Mini, Self::Max];

    /// Letters per word
    #[must_use]
    pub const fn word_length(self) -> usize {
        match self {
            Self::Main => 5,
            Self::Mini => 4,
            Self::Max => 7,
        }
    }

    /// Guesses allowed per round
    #[must_use]
    pub const fn num_tries(self) -> usize {
        match self {
            Self::Main => 6,
            Self::Mini => 5,
            Self::Max => 8,
        }
    }

    /// Lowercase identifier used in save files and on the command line
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Mini => "mini",
            Self::Max => "max",
        }
    }

    /// Display name
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Mini => "Mini",
            Self::Max => "Max",
        }
    }
}

impl fmt::Display for ClassicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ClassicMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown mode: {s} (expected main, mini or max)"))
    }
}

/// Any game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Classic(ClassicMode),
    Hex,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic(mode) => mode.fmt(f),
            Self::Hex => f.write_str("hex"),
        }
    }
}

impl From<ClassicMode> for Mode {
    fn from(mode: ClassicMode) -> Self {
        Self::Classic(mode)
    }
}

/// Whether a new hex round is published on `date`
#[must_use]
pub fn is_hex_publish_day(date: NaiveDate) -> bool {
    HEX_PUBLISH_DAYS.contains(&date.weekday())
}

/// The date of the round that is current on `date`
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use salita::schedule::{Mode, effective_date};
///
/// let saturday = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
/// let thursday = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
/// assert_eq!(effective_date(Mode::Hex, saturday), thursday);
/// ```
#[must_use]
pub fn effective_date(mode: Mode, date: NaiveDate) -> NaiveDate {
    match mode {
        Mode::Classic(_) => date,
        Mode::Hex => {
            let today = date.weekday().num_days_from_monday();
            let days_back = HEX_PUBLISH_DAYS
                .iter()
                .map(|day| (today + 7 - day.num_days_from_monday()) % 7)
                .min()
                .unwrap_or(0);
            date.checked_sub_days(Days::new(u64::from(days_back)))
                .unwrap_or(date)
        }
    }
}

/// The date of the round published one scheduling step before the round
/// that is current on `date`
#[must_use]
pub fn previous_round_date(mode: Mode, date: NaiveDate) -> NaiveDate {
    let current = effective_date(mode, date);
    current
        .pred_opt()
        .map_or(current, |day_before| effective_date(mode, day_before))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn classic_modes_use_calendar_date() {
        let day = date(2026, 10, 17);
        for mode in ClassicMode::ALL {
            assert_eq!(effective_date(mode.into(), day), day);
            assert_eq!(previous_round_date(mode.into(), day), date(2026, 10, 16));
        }
    }

    #[test]
    fn hex_publish_days_are_their_own_round() {
        let monday = date(2026, 10, 12);
        let thursday = date(2026, 10, 15);
        assert!(is_hex_publish_day(monday));
        assert!(is_hex_publish_day(thursday));
        assert_eq!(effective_date(Mode::Hex, monday), monday);
        assert_eq!(effective_date(Mode::Hex, thursday), thursday);
    }

    #[test]
    fn hex_collapses_to_most_recent_publish_day() {
        let monday = date(2026, 10, 12);
        let thursday = date(2026, 10, 15);
        // Tue, Wed -> Monday
        assert_eq!(effective_date(Mode::Hex, date(2026, 10, 13)), monday);
        assert_eq!(effective_date(Mode::Hex, date(2026, 10, 14)), monday);
        // Fri, Sat, Sun -> Thursday
        assert_eq!(effective_date(Mode::Hex, date(2026, 10, 16)), thursday);
        assert_eq!(effective_date(Mode::Hex, date(2026, 10, 17)), thursday);
        assert_eq!(effective_date(Mode::Hex, date(2026, 10, 18)), thursday);
    }

    #[test]
    fn hex_previous_round() {
        // Saturday -> current Thursday -> previous Monday
        assert_eq!(
            previous_round_date(Mode::Hex, date(2026, 10, 17)),
            date(2026, 10, 12)
        );
        // Monday -> previous Thursday
        assert_eq!(
            previous_round_date(Mode::Hex, date(2026, 10, 19)),
            date(2026, 10, 15)
        );
        // Wednesday -> current Monday -> previous Thursday
        assert_eq!(
            previous_round_date(Mode::Hex, date(2026, 10, 14)),
            date(2026, 10, 8)
        );
    }

    #[test]
    fn hex_effective_date_across_year_boundary() {
        // 2027-01-01 is a Friday
        assert_eq!(
            effective_date(Mode::Hex, date(2027, 1, 1)),
            date(2026, 12, 31)
        );
    }

    #[test]
    fn classic_mode_parameters() {
        assert_eq!(ClassicMode::Main.word_length(), 5);
        assert_eq!(ClassicMode::Main.num_tries(), 6);
        assert_eq!(ClassicMode::Mini.word_length(), 4);
        assert_eq!(ClassicMode::Max.word_length(), 7);
    }

    #[test]
    fn classic_mode_from_str() {
        assert_eq!("main".parse::<ClassicMode>(), Ok(ClassicMode::Main));
        assert_eq!(" MAX ".parse::<ClassicMode>(), Ok(ClassicMode::Max));
        assert!("hex".parse::<ClassicMode>().is_err());
    }

    #[test]
    fn mode_display() {
        assert_eq!(Mode::Hex.to_string(), "hex");
        assert_eq!(Mode::from(ClassicMode::Mini).to_string(), "mini");
    }
}
