//! A versioned copy of the dictionary kept in the save store
//!
//! Cached copies older than the minimum dictionary version are ignored so a
//! retracted word list is never served from a stale cache.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::Dictionary;
use crate::core::Version;
use crate::error::StoreError;
use crate::persistence::Store;

/// Store key of the cached dictionary
pub const DICTIONARY_KEY: &str = "salita.dictionary";

#[derive(Debug, Serialize, Deserialize)]
struct CachedDictionary {
    version: Version,
    words: BTreeMap<usize, Vec<String>>,
}

/// The cached dictionary, if present and not older than `minimum`
pub fn load_cached<S: Store + ?Sized>(store: &S, minimum: Version) -> Option<Dictionary> {
    let raw = match store.get(DICTIONARY_KEY) {
        Ok(raw) => raw?,
        Err(err) => {
            warn!(error = %err, "could not read dictionary cache");
            return None;
        }
    };

    let cached: CachedDictionary = match serde_json::from_str(&raw) {
        Ok(cached) => cached,
        Err(err) => {
            warn!(error = %err, "ignoring corrupt dictionary cache");
            return None;
        }
    };

    if !cached.version.is_supported(minimum) {
        debug!(version = %cached.version, %minimum, "dictionary cache is outdated");
        return None;
    }

    Some(Dictionary::from_buckets(cached.words).with_version(cached.version))
}

/// Cache `dictionary` in the store
///
/// Dictionaries without a version stamp are not cached, since they could never
/// be validated on the way back out.
///
/// # Errors
/// Returns `StoreError` if the store cannot be written.
pub fn store_cached<S: Store + ?Sized>(
    store: &mut S,
    dictionary: &Dictionary,
) -> Result<(), StoreError> {
    let Some(version) = dictionary.version() else {
        return Ok(());
    };

    let words = dictionary
        .lengths()
        .map(|length| {
            let mut words: Vec<String> =
                dictionary.words_of_length(length).map(str::to_string).collect();
            words.sort_unstable();
            (length, words)
        })
        .collect();

    let raw = serde_json::to_string(&CachedDictionary { version, words })?;
    store.set(DICTIONARY_KEY, &raw)?;
    debug!(%version, words = dictionary.len(), "cached dictionary");
    Ok(())
}
