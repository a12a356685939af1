//! Reading and writing envelopes through a [`Store`]
//!
//! Loading never fails on bad data: absent, unparseable or non-object saves
//! read as an empty object, and anything that cannot be brought up to the
//! current layout is replaced by a fresh envelope.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::migrate::migrate;
use super::{Envelope, Store};
use crate::core::Version;
use crate::error::StoreError;

/// How an envelope was obtained by [`open_envelope`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opened {
    /// Nothing was saved yet
    Created,
    /// Saved at the current version
    Loaded,
    /// Saved by an older supported build and migrated forward
    Migrated { from: Version },
    /// Missing, unsupported or undecodable version; replaced with a fresh envelope
    Reset,
}

/// Raw JSON object stored under `key`
///
/// Read failures, corrupt JSON and non-object values all yield an empty map.
pub fn load<S: Store + ?Sized>(store: &S, key: &str) -> Map<String, Value> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Map::new(),
        Err(err) => {
            warn!(key, error = %err, "could not read save; treating as absent");
            return Map::new();
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!(key, "save is not a JSON object; treating as absent");
            Map::new()
        }
        Err(err) => {
            warn!(key, error = %err, "save is not valid JSON; treating as absent");
            Map::new()
        }
    }
}

/// Overwrite the stored copy of `envelope`
///
/// # Errors
/// Returns `StoreError` if encoding or the store write fails.
pub fn save<S: Store + ?Sized, E: Envelope>(store: &mut S, envelope: &E) -> Result<(), StoreError> {
    let raw = serde_json::to_string(envelope)?;
    store.set(E::KEY, &raw)?;
    debug!(key = E::KEY, bytes = raw.len(), "saved envelope");
    Ok(())
}

/// Delete the stored envelope of type `E`
///
/// # Errors
/// Returns `StoreError` if the store cannot be written.
pub fn remove<S: Store + ?Sized, E: Envelope>(store: &mut S) -> Result<(), StoreError> {
    store.remove(E::KEY)
}

/// Load the envelope of type `E`, gating on its version stamp
///
/// Saves older than `minimum` (or without a readable stamp) are hard reset:
/// a fresh envelope stamped `current` is persisted immediately. Supported
/// older saves run through the migration chain and are re-stamped `current`.
///
/// # Errors
/// Returns `StoreError` only if a replacement envelope cannot be persisted.
pub fn open_envelope<S, E>(
    store: &mut S,
    current: Version,
    minimum: Version,
) -> Result<(E, Opened), StoreError>
where
    S: Store + ?Sized,
    E: Envelope,
{
    let mut object = load(store, E::KEY);
    if object.is_empty() {
        let envelope = E::fresh(current);
        save(store, &envelope)?;
        info!(key = E::KEY, version = %current, "created new save");
        return Ok((envelope, Opened::Created));
    }

    let stamp = object
        .get("version")
        .and_then(Value::as_str)
        .and_then(Version::parse);
    let Some(stamp) = stamp.filter(|v| v.is_supported(minimum)) else {
        warn!(key = E::KEY, %minimum, "save version missing or unsupported; resetting");
        return hard_reset(store, current);
    };

    let migrated = stamp < current;
    if migrated {
        object = migrate(object, stamp, current);
    }
    object.insert("version".into(), Value::from(current.to_string()));

    match serde_json::from_value::<E>(Value::Object(object)) {
        Ok(envelope) if migrated => {
            save(store, &envelope)?;
            info!(key = E::KEY, from = %stamp, to = %current, "migrated save");
            Ok((envelope, Opened::Migrated { from: stamp }))
        }
        Ok(envelope) => Ok((envelope, Opened::Loaded)),
        Err(err) => {
            warn!(key = E::KEY, error = %err, "save does not decode; resetting");
            hard_reset(store, current)
        }
    }
}

fn hard_reset<S, E>(store: &mut S, current: Version) -> Result<(E, Opened), StoreError>
where
    S: Store + ?Sized,
    E: Envelope,
{
    let envelope = E::fresh(current);
    save(store, &envelope)?;
    Ok((envelope, Opened::Reset))
}
