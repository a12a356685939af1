//! Salita - CLI
//!
//! Play the daily classic and hex rounds from the terminal, inspect statistics,
//! print share cards and audit the round schedule.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, TimeZone};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use salita::{
    commands::{
        run_audit, run_guess, run_hex, run_hex_word, run_play, run_reset, run_share, run_stats,
    },
    config::GameConfig,
    core::Version,
    game::{Clock, FixedClock, Session, SessionParts, SystemClock},
    output::{Theme, print_audit},
    persistence::{FileStore, Store},
    schedule::{ClassicMode, ScheduleSource},
    wordlists::{Blacklist, Dictionary, cache, loader},
};

#[derive(Parser)]
#[command(
    name = "salita",
    about = "Daily Tagalog word games: classic Main/Mini/Max rounds and the hex spelling round",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding rounds.json and optional dictionary.json / blacklist.txt
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Round schedule file (defaults to <data-dir>/rounds.json)
    #[arg(long, global = true)]
    rounds: Option<PathBuf>,

    /// Directory where progress is saved
    #[arg(long, global = true, default_value = ".salita")]
    save_dir: PathBuf,

    /// Play as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// Config file (defaults to $SALITA_CONFIG_PATH or config/salita.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Allow private rounds to be served
    #[arg(long, global = true)]
    authorized: bool,

    /// Light-theme share cards
    #[arg(long, global = true)]
    light: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play today's classic round interactively (default)
    Play {
        /// main, mini or max
        #[arg(default_value = "main")]
        mode: ClassicMode,
    },

    /// Submit one guess to today's classic round
    Guess {
        /// The guess
        word: String,

        /// main, mini or max
        #[arg(short, long, default_value = "main")]
        mode: ClassicMode,
    },

    /// Play the current hex round interactively
    Hex,

    /// Submit one word to the current hex round
    HexWord {
        /// The word
        word: String,
    },

    /// Show statistics for every mode
    Stats,

    /// Print share cards for finished rounds
    Share {
        /// Only this classic mode
        #[arg(short, long)]
        mode: Option<ClassicMode>,

        /// Include the hex round
        #[arg(long)]
        hex: bool,
    },

    /// Delete all saved progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Build every scheduled hex round and report its totals
    Audit,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = GameConfig::load(cli.config.as_deref());
    let theme = if cli.light { Theme::Light } else { Theme::Dark };

    let rounds_path = cli
        .rounds
        .clone()
        .unwrap_or_else(|| cli.data_dir.join("rounds.json"));
    let rounds = ScheduleSource::from_path(&rounds_path)
        .with_context(|| format!("Failed to load round schedule from {}", rounds_path.display()))?
        .authorized(cli.authorized);

    let mut store = FileStore::open(&cli.save_dir)
        .with_context(|| format!("Failed to open save directory {}", cli.save_dir.display()))?;
    let dictionary = load_dictionary(&cli.data_dir, &mut store, config.min_dictionary_version);
    let blacklist = load_blacklist(&cli.data_dir);

    let command = cli.command.unwrap_or(Commands::Play { mode: ClassicMode::Main });
    if matches!(command, Commands::Audit) {
        let rows = run_audit(rounds.schedule(), &dictionary, &blacklist, true);
        print_audit(&rows);
        return Ok(());
    }

    let clock: Box<dyn Clock> = match cli.date {
        Some(date) => Box::new(FixedClock::new(local_noon(date))),
        None => Box::new(SystemClock),
    };

    let mut session = Session::open(SessionParts {
        config,
        dictionary,
        blacklist,
        store,
        rounds,
        clock,
    })
    .context("Failed to start today's rounds")?;

    match command {
        Commands::Play { mode } => run_play(&mut session, mode, theme),
        Commands::Guess { word, mode } => run_guess(&mut session, mode, &word, theme),
        Commands::Hex => run_hex(&mut session),
        Commands::HexWord { word } => run_hex_word(&mut session, &word),
        Commands::Stats => {
            run_stats(&session);
            Ok(())
        }
        Commands::Share { mode, hex } => {
            run_share(&session, mode, hex, theme);
            Ok(())
        }
        Commands::Reset { yes } => run_reset(&mut session, yes),
        Commands::Audit => Ok(()),
    }
}

/// Log to stderr, `warn` and above unless `RUST_LOG` says otherwise
fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();
}

/// Prefer a versioned `dictionary.json` from the data directory, then the
/// cached copy, then the bundled list
fn load_dictionary<S: Store>(data_dir: &Path, store: &mut S, minimum: Version) -> Dictionary {
    let path = data_dir.join("dictionary.json");
    if path.exists() {
        match loader::load_dictionary(&path) {
            Ok(dictionary) if dictionary.version().is_some_and(|v| v.is_supported(minimum)) => {
                if let Err(err) = cache::store_cached(store, &dictionary) {
                    warn!(error = %err, "failed to cache dictionary");
                }
                return dictionary;
            }
            Ok(_) => {
                warn!(path = %path.display(), "dictionary file is older than supported");
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to load dictionary file");
            }
        }
    }

    if let Some(dictionary) = cache::load_cached(store, minimum) {
        info!(words = dictionary.len(), "using cached dictionary");
        return dictionary;
    }

    Dictionary::embedded()
}

fn load_blacklist(data_dir: &Path) -> Blacklist {
    let path = data_dir.join("blacklist.txt");
    if !path.exists() {
        return Blacklist::embedded();
    }
    loader::load_blacklist(&path).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "failed to load blacklist; using bundled list");
        Blacklist::embedded()
    })
}

/// Noon local time on `date`, so replayed days never straddle midnight
fn local_noon(date: NaiveDate) -> chrono::DateTime<chrono::FixedOffset> {
    let noon = date.and_time(chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
    Local
        .from_local_datetime(&noon)
        .earliest()
        .map_or_else(|| noon.and_utc().fixed_offset(), |dt| dt.fixed_offset())
}
