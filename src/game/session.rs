//! A player's session: today's rounds, their saved progress, and every action
//! that changes it
//!
//! All collaborators are owned by the session and all mutation goes through
//! `&mut self`. Every accepted action is persisted before it returns.

use chrono::NaiveDate;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::classic::{GuessOutcome, UserGameData, check_guess};
use super::clock::{Clock, SystemClock};
use super::hex::{HexGameState, HexOutcome};
use crate::config::GameConfig;
use crate::core::LetterStatus;
use crate::error::{GuessError, SessionError};
use crate::hex::{WordList, build_word_list, shuffle_letters};
use crate::output::share::{Theme, classic_share_text, hex_share_text};
use crate::persistence::{ClassicSave, Envelope, Store, gateway};
use crate::schedule::{ClassicMode, ClassicRound, HexRound, Mode, RoundSource, effective_date};
use crate::wordlists::{Blacklist, Dictionary};

/// Everything a session needs to open
pub struct SessionParts<S, R, C = SystemClock> {
    pub config: GameConfig,
    pub dictionary: Dictionary,
    pub blacklist: Blacklist,
    pub store: S,
    pub rounds: R,
    pub clock: C,
}

pub struct Session<S, R, C = SystemClock> {
    config: GameConfig,
    dictionary: Dictionary,
    blacklist: Blacklist,
    store: S,
    rounds: R,
    clock: C,
    classic: ClassicSave,
    classic_rounds: BTreeMap<ClassicMode, ClassicRound>,
    hex: HexGameState,
    hex_round: Option<HexRound>,
}

impl<S: Store, R: RoundSource, C: Clock> Session<S, R, C> {
    /// Fetch today's rounds, load both saves and reconcile them
    ///
    /// Nothing is accepted until this returns, and a fetch failure aborts it.
    ///
    /// # Errors
    /// `Fetch` if a round for an enabled mode cannot be loaded, `Store` if the
    /// reconciled saves cannot be written.
    pub fn open(parts: SessionParts<S, R, C>) -> Result<Self, SessionError> {
        let SessionParts {
            config,
            dictionary,
            blacklist,
            mut store,
            rounds,
            clock,
        } = parts;
        let today = clock.today();

        let mut classic_rounds = BTreeMap::new();
        for &mode in &config.classic_modes {
            let round = rounds.fetch_classic(mode, effective_date(mode.into(), today))?;
            classic_rounds.insert(mode, round);
        }

        let hex_round = if config.hex_enabled {
            let puzzle = rounds.fetch_hex(effective_date(Mode::Hex, today))?;
            let words =
                build_word_list(&puzzle.root_word, puzzle.center_letter, &blacklist, &dictionary);
            Some(HexRound::new(puzzle, &words))
        } else {
            None
        };

        let (current, minimum) = (config.build_version, config.min_supported_version);
        let (classic, opened) =
            gateway::open_envelope::<_, ClassicSave>(&mut store, current, minimum)?;
        debug!(?opened, "opened classic save");
        let (hex, opened) =
            gateway::open_envelope::<_, HexGameState>(&mut store, current, minimum)?;
        debug!(?opened, "opened hex save");

        let mut session = Self {
            config,
            dictionary,
            blacklist,
            store,
            rounds,
            clock,
            classic,
            classic_rounds,
            hex,
            hex_round,
        };
        session.reconcile()?;

        info!(
            %today,
            modes = session.classic_rounds.len(),
            hex = session.hex_round.is_some(),
            "session ready"
        );
        Ok(session)
    }

    /// Align both saves with the loaded rounds and persist them
    fn reconcile(&mut self) -> Result<(), SessionError> {
        for (&mode, round) in &self.classic_rounds {
            let data = std::mem::take(self.classic.mode_mut(mode));
            *self.classic.mode_mut(mode) = data.reconcile(mode, round);
        }

        if let Some(round) = &self.hex_round {
            let state = std::mem::take(&mut self.hex);
            self.hex = state.reconcile(round, self.clock.now(), &self.dictionary, &self.blacklist);
        }

        gateway::save(&mut self.store, &self.classic)?;
        gateway::save(&mut self.store, &self.hex)?;
        Ok(())
    }

    /// Refuse input once the clock has moved on to a later round
    fn ensure_current(&self, mode: Mode, round_date: NaiveDate) -> Result<(), SessionError> {
        if effective_date(mode, self.clock.today()) == round_date {
            Ok(())
        } else {
            Err(GuessError::RoundExpired.into())
        }
    }

    /// Submit a classic guess
    ///
    /// A finished round yields `GameOver` and changes nothing.
    ///
    /// # Errors
    /// `Guess` for a refused guess (wrong length, unknown word, expired
    /// round), `ModeDisabled` for a mode this session did not load, `Store`
    /// if the result cannot be saved.
    pub fn submit_guess(
        &mut self,
        mode: ClassicMode,
        guess: &str,
    ) -> Result<GuessOutcome, SessionError> {
        let round = self
            .classic_rounds
            .get(&mode)
            .ok_or(SessionError::ModeDisabled(mode.into()))?;
        self.ensure_current(mode.into(), round.date)?;
        if self.classic.mode(mode).is_finished() {
            return Ok(GuessOutcome::GameOver);
        }

        let solution = round.solution_word.clone();
        let marks = check_guess(guess, &solution, mode, &self.dictionary)?;

        let data = std::mem::take(self.classic.mode_mut(mode));
        let data = data.record_guess(mode, marks.clone(), self.clock.now(), &solution);
        let status = data.game_status;
        *self.classic.mode_mut(mode) = data;

        gateway::save(&mut self.store, &self.classic)?;
        debug!(%mode, ?status, "recorded guess");
        Ok(GuessOutcome::Scored { marks, status })
    }

    /// Submit a hex word
    ///
    /// # Errors
    /// `Guess(RoundExpired)` when the round is over, `ModeDisabled` when no
    /// hex round was loaded, `Store` if an accepted word cannot be saved.
    pub fn submit_word(&mut self, word: &str) -> Result<HexOutcome, SessionError> {
        let round = self
            .hex_round
            .as_ref()
            .ok_or(SessionError::ModeDisabled(Mode::Hex))?;
        self.ensure_current(Mode::Hex, round.date())?;

        let state = std::mem::take(&mut self.hex);
        let (state, outcome) = state.record_word(word, round, &self.dictionary, &self.blacklist);
        self.hex = state;

        if matches!(outcome, HexOutcome::Accepted { .. }) {
            gateway::save(&mut self.store, &self.hex)?;
        }
        Ok(outcome)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn classic_state(&self, mode: ClassicMode) -> &UserGameData {
        self.classic.mode(mode)
    }

    /// Today's round for `mode`, if the mode is enabled
    #[must_use]
    pub fn round(&self, mode: ClassicMode) -> Option<&ClassicRound> {
        self.classic_rounds.get(&mode)
    }

    #[must_use]
    pub fn hex_state(&self) -> &HexGameState {
        &self.hex
    }

    #[must_use]
    pub fn hex_round(&self) -> Option<&HexRound> {
        self.hex_round.as_ref()
    }

    /// Best status per letter for the on-screen keyboard
    #[must_use]
    pub fn keyboard(&self, mode: ClassicMode) -> BTreeMap<char, LetterStatus> {
        self.classic.mode(mode).keyboard()
    }

    /// Share card for a finished classic round
    #[must_use]
    pub fn share_classic(&self, mode: ClassicMode, theme: Theme) -> Option<String> {
        let round = self.classic_rounds.get(&mode)?;
        classic_share_text(mode, &round.game_id, self.classic.mode(mode), theme)
    }

    /// Share card for the current hex round
    #[must_use]
    pub fn share_hex(&self) -> Option<String> {
        self.hex_round
            .as_ref()
            .map(|round| hex_share_text(&self.hex, round))
    }

    /// Every answer to the previous hex round, blacklist excluded
    #[must_use]
    pub fn previous_answers(&self) -> Option<WordList> {
        let root = self.hex.prev_root_word.as_deref()?;
        let center = self.hex.prev_center_letter?;
        Some(build_word_list(root, center, &self.blacklist, &self.dictionary))
    }

    /// The current puzzle's outer letters in random order
    pub fn shuffled_letters<G: Rng + ?Sized>(&self, rng: &mut G) -> Option<Vec<char>> {
        let round = self.hex_round.as_ref()?;
        Some(shuffle_letters(round.root_word(), round.center_letter(), rng))
    }

    /// Delete both saves and start over with fresh envelopes
    ///
    /// # Errors
    /// Returns `Store` if the saves cannot be removed or rewritten.
    pub fn reset_all(&mut self) -> Result<(), SessionError> {
        gateway::remove::<_, ClassicSave>(&mut self.store)?;
        gateway::remove::<_, HexGameState>(&mut self.store)?;

        self.classic = ClassicSave::fresh(self.config.build_version);
        self.hex = HexGameState::fresh(self.config.build_version);
        info!(
            classic = %self.classic.uuid,
            hex = %self.hex.uuid,
            "reset all progress"
        );
        self.reconcile()
    }

    /// Give back the store, e.g. to reopen a session on it
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Version;
    use crate::error::FetchError;
    use crate::game::{FixedClock, GameStatus};
    use crate::persistence::{CLASSIC_KEY, HEX_KEY, MemoryStore};
    use crate::schedule::{GameId, HexPuzzle, ScheduleSource};
    use chrono::{DateTime, FixedOffset};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::{Value, json};

    type TestSession<'a> = Session<MemoryStore, ScheduleSource, &'a FixedClock>;

    fn at(stamp: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(stamp).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn classic(id: u64, d: u32, word: &str) -> ClassicRound {
        ClassicRound {
            game_id: id.into(),
            date: date(d),
            solution_word: word.into(),
        }
    }

    fn hex(id: &str, d: u32, root: &str, center: char) -> HexPuzzle {
        HexPuzzle {
            game_id: GameId::from(id),
            date: date(d),
            root_word: root.into(),
            center_letter: center,
        }
    }

    fn rounds() -> ScheduleSource {
        ScheduleSource::default()
            .with_classic(ClassicMode::Main, classic(410, 15, "lapis"))
            .with_classic(ClassicMode::Main, classic(411, 16, "kotse"))
            .with_classic(ClassicMode::Main, classic(412, 17, "bahay"))
            .with_classic(ClassicMode::Main, classic(413, 18, "lapis"))
            .with_classic(ClassicMode::Main, classic(414, 19, "sampu"))
            .with_hex(hex("hex-33", 15, "eksport", 'o'))
            .with_hex(hex("hex-34", 19, "salitang", 'a'))
    }

    fn config() -> GameConfig {
        GameConfig {
            classic_modes: vec![ClassicMode::Main],
            ..GameConfig::default()
        }
    }

    fn open(store: MemoryStore, clock: &FixedClock) -> TestSession<'_> {
        Session::open(SessionParts {
            config: config(),
            dictionary: Dictionary::embedded(),
            blacklist: Blacklist::embedded(),
            store,
            rounds: rounds(),
            clock,
        })
        .unwrap()
    }

    fn stored(store: &MemoryStore, key: &str) -> Value {
        serde_json::from_str(&store.get(key).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn bahay_in_two() {
        let clock = FixedClock::new(at("2026-10-17T09:00:00+08:00"));
        let mut session = open(MemoryStore::new(), &clock);

        let outcome = session.submit_guess(ClassicMode::Main, "SAMPU").unwrap();
        let GuessOutcome::Scored { marks, status } = outcome else {
            panic!("guess was not scored");
        };
        let statuses: Vec<_> = marks.iter().map(|m| m.status).collect();
        assert_eq!(
            statuses,
            vec![
                LetterStatus::Wrong,
                LetterStatus::Correct,
                LetterStatus::Wrong,
                LetterStatus::Wrong,
                LetterStatus::Wrong
            ]
        );
        assert_eq!(status, GameStatus::Playing);

        let outcome = session.submit_guess(ClassicMode::Main, "BAHAY").unwrap();
        assert!(matches!(outcome, GuessOutcome::Scored { status: GameStatus::Win, .. }));

        let data = session.classic_state(ClassicMode::Main);
        assert_eq!(data.num_wins, 1);
        assert_eq!(data.turn_stats[1], 1);

        let saved = stored(&session.into_store(), CLASSIC_KEY);
        assert_eq!(saved["main"]["gameStatus"], "win");
        assert_eq!(saved["main"]["numWins"], 1);
        assert_eq!(saved["main"]["correctAnswer"], "bahay");
    }

    #[test]
    fn refused_guesses_change_nothing() {
        let clock = FixedClock::new(at("2026-10-17T09:00:00+08:00"));
        let mut session = open(MemoryStore::new(), &clock);
        let before = session.classic_state(ClassicMode::Main).clone();

        let err = session.submit_guess(ClassicMode::Main, "tubo").unwrap_err();
        assert!(matches!(err, SessionError::Guess(GuessError::IncompleteWord { expected: 5 })));
        let err = session.submit_guess(ClassicMode::Main, "zzzzz").unwrap_err();
        assert!(matches!(err, SessionError::Guess(GuessError::InvalidWord(_))));

        assert_eq!(session.classic_state(ClassicMode::Main), &before);
    }

    #[test]
    fn finished_round_reports_game_over() {
        let clock = FixedClock::new(at("2026-10-17T09:00:00+08:00"));
        let mut session = open(MemoryStore::new(), &clock);
        session.submit_guess(ClassicMode::Main, "bahay").unwrap();

        assert_eq!(
            session.submit_guess(ClassicMode::Main, "sampu").unwrap(),
            GuessOutcome::GameOver
        );
        assert_eq!(session.classic_state(ClassicMode::Main).history.len(), 1);
    }

    #[test]
    fn disabled_mode_is_refused() {
        let clock = FixedClock::new(at("2026-10-17T09:00:00+08:00"));
        let mut session = open(MemoryStore::new(), &clock);
        let err = session.submit_guess(ClassicMode::Mini, "tubo").unwrap_err();
        assert!(matches!(err, SessionError::ModeDisabled(Mode::Classic(ClassicMode::Mini))));
    }

    #[test]
    fn same_day_reload_is_idempotent() {
        let clock = FixedClock::new(at("2026-10-17T09:00:00+08:00"));
        let mut session = open(MemoryStore::new(), &clock);
        session.submit_guess(ClassicMode::Main, "sampu").unwrap();
        session.submit_word("torpe").unwrap();
        let store = session.into_store();
        let classic_before = stored(&store, CLASSIC_KEY);
        let hex_before = stored(&store, HEX_KEY);

        clock.set(at("2026-10-17T22:00:00+08:00"));
        let store = open(store, &clock).into_store();
        let store = open(store, &clock).into_store();

        assert_eq!(stored(&store, CLASSIC_KEY), classic_before);
        assert_eq!(stored(&store, HEX_KEY), hex_before);
    }

    #[test]
    fn next_day_rolls_over_but_keeps_counters() {
        let clock = FixedClock::new(at("2026-10-17T09:00:00+08:00"));
        let mut session = open(MemoryStore::new(), &clock);
        session.submit_guess(ClassicMode::Main, "bahay").unwrap();

        clock.set(at("2026-10-18T08:00:00+08:00"));
        let session = open(session.into_store(), &clock);
        let data = session.classic_state(ClassicMode::Main);

        assert!(data.history.is_empty());
        assert_eq!(data.game_status, GameStatus::Playing);
        assert_eq!(data.game_id, Some(GameId::Number(413)));
        assert_eq!(data.num_wins, 1);
        assert_eq!(data.win_streak, 1);
        assert_eq!(session.share_classic(ClassicMode::Main, Theme::Dark), None);
    }

    #[test]
    fn guess_after_midnight_is_refused() {
        let clock = FixedClock::new(at("2026-10-17T23:59:00+08:00"));
        let mut session = open(MemoryStore::new(), &clock);
        session.submit_guess(ClassicMode::Main, "sampu").unwrap();

        clock.set(at("2026-10-18T00:00:30+08:00"));
        let err = session.submit_guess(ClassicMode::Main, "bahay").unwrap_err();
        assert!(matches!(err, SessionError::Guess(GuessError::RoundExpired)));
        assert_eq!(session.classic_state(ClassicMode::Main).history.len(), 1);
    }

    #[test]
    fn hex_round_spans_publish_gap() {
        // Saturday still plays Thursday's round
        let clock = FixedClock::new(at("2026-10-15T09:00:00+08:00"));
        let mut session = open(MemoryStore::new(), &clock);
        session.submit_word("keso").unwrap();

        clock.set(at("2026-10-17T09:00:00+08:00"));
        let mut session = open(session.into_store(), &clock);
        assert_eq!(session.hex_state().score, 1);

        let outcome = session.submit_word("keso").unwrap();
        assert_eq!(outcome, HexOutcome::AlreadyAnswered("keso".into()));
        assert_eq!(session.hex_state().score, 1);
    }

    #[test]
    fn hex_rollover_exposes_previous_answers() {
        let clock = FixedClock::new(at("2026-10-18T09:00:00+08:00"));
        let mut session = open(MemoryStore::new(), &clock);
        session.submit_word("eksport").unwrap();
        assert_eq!(session.previous_answers(), None);

        // Monday publishes the next hex round
        clock.set(at("2026-10-19T09:00:00+08:00"));
        let session = open(session.into_store(), &clock);

        let state = session.hex_state();
        assert_eq!(state.root_word.as_deref(), Some("salitang"));
        assert_eq!(state.prev_root_word.as_deref(), Some("eksport"));
        assert_eq!(state.score, 0);

        let previous = session.previous_answers().unwrap();
        assert!(previous.contains("eksport"));
        assert!(!previous.contains("poker"));
    }

    #[test]
    fn missing_round_aborts_open() {
        let clock = FixedClock::new(at("2026-10-25T09:00:00+08:00"));
        let result = Session::open(SessionParts {
            config: config(),
            dictionary: Dictionary::embedded(),
            blacklist: Blacklist::embedded(),
            store: MemoryStore::new(),
            rounds: rounds(),
            clock: &clock,
        });
        assert!(matches!(
            result.err(),
            Some(SessionError::Fetch(FetchError::RoundNotFound(_)))
        ));
    }

    #[test]
    fn old_save_is_hard_reset_on_open() {
        let mut store = MemoryStore::new();
        store
            .set(
                CLASSIC_KEY,
                &json!({
                    "version": "v0.2.2",
                    "uuid": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                    "main": { "numWins": 5 }
                })
                .to_string(),
            )
            .unwrap();

        let clock = FixedClock::new(at("2026-10-17T09:00:00+08:00"));
        let session = open(store, &clock);
        assert_eq!(session.classic_state(ClassicMode::Main).num_wins, 0);

        let saved = stored(&session.into_store(), CLASSIC_KEY);
        assert_eq!(saved["version"], Version::new(0, 3, 0).to_string());
        assert_ne!(saved["uuid"], "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn corrupt_save_starts_fresh() {
        let mut store = MemoryStore::new();
        store.set(CLASSIC_KEY, "{{{").unwrap();
        store.set(HEX_KEY, "null").unwrap();

        let clock = FixedClock::new(at("2026-10-17T09:00:00+08:00"));
        let session = open(store, &clock);
        assert_eq!(session.classic_state(ClassicMode::Main).num_played, 0);
        assert_eq!(session.hex_state().root_word.as_deref(), Some("eksport"));
    }

    #[test]
    fn reset_all_replaces_identities() {
        let clock = FixedClock::new(at("2026-10-17T09:00:00+08:00"));
        let mut session = open(MemoryStore::new(), &clock);
        session.submit_guess(ClassicMode::Main, "bahay").unwrap();
        let old_uuid = stored(&MemoryStore::clone(&session.store), CLASSIC_KEY)["uuid"].clone();

        session.reset_all().unwrap();
        assert_eq!(session.classic_state(ClassicMode::Main).num_wins, 0);
        assert_eq!(session.classic_state(ClassicMode::Main).game_id, Some(GameId::Number(412)));

        let saved = stored(&session.into_store(), CLASSIC_KEY);
        assert_ne!(saved["uuid"], old_uuid);
    }

    #[test]
    fn share_and_shuffle() {
        let clock = FixedClock::new(at("2026-10-17T09:00:00+08:00"));
        let mut session = open(MemoryStore::new(), &clock);
        session.submit_guess(ClassicMode::Main, "bahay").unwrap();

        assert_eq!(
            session.share_classic(ClassicMode::Main, Theme::Light).unwrap(),
            "🟩🟩🟩🟩🟩\nSalita Main #412 1/6\n#Salita"
        );
        assert!(session.share_hex().unwrap().starts_with("Salita Hex #hex-33 0/"));

        let mut rng = StdRng::seed_from_u64(3);
        let letters = session.shuffled_letters(&mut rng).unwrap();
        assert_eq!(letters.len(), 6);
        assert!(!letters.contains(&'o'));
        assert_eq!(session.keyboard(ClassicMode::Main)[&'b'], LetterStatus::Correct);
    }
}
