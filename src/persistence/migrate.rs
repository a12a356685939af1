//! Forward migrations for saves written by older builds
//!
//! Each step is a pure rewrite of the raw JSON object, keyed by the version
//! that introduced the new layout. Steps run in ascending order and only when
//! the save is older than their target.

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::core::Version;
use crate::hex::is_pangram;
use crate::schedule::ClassicMode;

type Object = Map<String, Value>;

/// A single layout change
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    /// Version whose layout this step produces
    pub target: Version,
    pub apply: fn(Object) -> Object,
}

/// Every known layout change, ascending by target
pub const MIGRATIONS: [Migration; 2] = [
    Migration {
        target: Version::new(0, 2, 5),
        apply: rename_root_word_ids,
    },
    Migration {
        target: Version::new(0, 3, 0),
        apply: structure_saved_words,
    },
];

/// Apply every step with `from < target <= to`, in order
#[must_use]
pub fn migrate(mut object: Object, from: Version, to: Version) -> Object {
    for step in MIGRATIONS
        .iter()
        .filter(|step| from < step.target && step.target <= to)
    {
        debug!(%from, target = %step.target, "applying save migration");
        object = (step.apply)(object);
    }
    object
}

fn rename(object: &mut Object, old: &str, new: &str) {
    if let Some(value) = object.remove(old) {
        object.entry(new).or_insert(value);
    }
}

/// v0.2.5: hex saves name the root word itself, not its id
fn rename_root_word_ids(mut object: Object) -> Object {
    rename(&mut object, "rootWordId", "rootWord");
    rename(&mut object, "prevRootWordId", "prevRootWord");
    object
}

/// v0.3.0: hex guessed words carry their pangram flag, classic statuses are
/// named rather than numbered, and turn stats cover every try
fn structure_saved_words(mut object: Object) -> Object {
    if let Some(Value::Array(words)) = object.get_mut("guessedWords") {
        for entry in words.iter_mut() {
            if let Value::String(word) = entry {
                let word = std::mem::take(word);
                let pangram = is_pangram(&word);
                *entry = json!({ "word": word, "isPangram": pangram });
            }
        }
    }

    for mode in ClassicMode::ALL {
        let Some(Value::Object(data)) = object.get_mut(mode.key()) else {
            continue;
        };

        if let Some(code) = data.get("gameStatus").and_then(Value::as_u64) {
            let status = match code {
                1 => "win",
                2 => "lose",
                _ => "playing",
            };
            data.insert("gameStatus".into(), Value::from(status));
        }

        if let Some(Value::Array(stats)) = data.get_mut("turnStats")
            && stats.len() < mode.num_tries()
        {
            stats.resize(mode.num_tries(), Value::from(0));
        }
    }

    object
}
