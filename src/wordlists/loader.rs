//! Word list loading utilities
//!
//! Dictionaries come either as plain text (one word per line) or as the JSON
//! document the site serves: length buckets keyed by word length plus an
//! optional version stamp.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::{Blacklist, Dictionary};
use crate::core::Version;
use crate::error::FetchError;

#[derive(Debug, Deserialize)]
struct DictionaryDocument {
    #[serde(default)]
    version: Option<String>,
    #[serde(flatten)]
    buckets: BTreeMap<String, Vec<String>>,
}

/// Words from a plain-text list, skipping blanks and `#` comments
fn text_words(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Parse the served JSON dictionary document
///
/// # Errors
/// Returns `FetchError::Api` if the document is not valid JSON.
pub fn dictionary_from_json(content: &str) -> Result<Dictionary, FetchError> {
    let document: DictionaryDocument =
        serde_json::from_str(content).map_err(|e| FetchError::from_json("dictionary", &e))?;

    let buckets = document
        .buckets
        .into_iter()
        .filter_map(|(key, words)| match key.parse::<usize>() {
            Ok(length) if length > 0 => Some((length, words)),
            _ => {
                warn!(key = %key, "ignoring dictionary bucket with non-numeric length");
                None
            }
        });
    let mut dictionary = Dictionary::from_buckets(buckets);

    if let Some(stamp) = document.version {
        match Version::parse(&stamp) {
            Some(version) => dictionary = dictionary.with_version(version),
            None => warn!(stamp = %stamp, "ignoring malformed dictionary version"),
        }
    }

    Ok(dictionary)
}

/// Load a dictionary file, JSON if the extension says so, plain text otherwise
///
/// # Errors
///
/// Returns `FetchError::Api` if the file cannot be read or parsed.
///
/// # Examples
/// ```no_run
/// use salita::wordlists::loader::load_dictionary;
///
/// let dictionary = load_dictionary("data/dictionary.json").unwrap();
/// println!("Loaded {} words", dictionary.len());
/// ```
pub fn load_dictionary<P: AsRef<Path>>(path: P) -> Result<Dictionary, FetchError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| FetchError::from_io("dictionary", &e))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let dictionary = if is_json {
        dictionary_from_json(&content)?
    } else {
        Dictionary::from_words(text_words(&content))
    };

    info!(path = %path.display(), words = dictionary.len(), "loaded dictionary");
    Ok(dictionary)
}

/// Load a plain-text blacklist
///
/// # Errors
///
/// Returns `FetchError::Api` if the file cannot be read.
pub fn load_blacklist<P: AsRef<Path>>(path: P) -> Result<Blacklist, FetchError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| FetchError::from_io("blacklist", &e))?;
    let blacklist = Blacklist::from_words(text_words(&content));

    info!(path = %path.display(), words = blacklist.len(), "loaded blacklist");
    Ok(blacklist)
}
