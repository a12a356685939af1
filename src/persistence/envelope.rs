//! Versioned top-level save records, one per game family

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::Version;
use crate::game::{HexGameState, UserGameData};
use crate::schedule::ClassicMode;

/// Store key of the classic family save
pub const CLASSIC_KEY: &str = "salita.classic";

/// Store key of the hex family save
pub const HEX_KEY: &str = "salita.hex";

/// A save record stamped with the build version that wrote it
pub trait Envelope: Serialize + DeserializeOwned {
    /// Store key the envelope lives under
    const KEY: &'static str;

    /// A brand-new envelope with a fresh identity
    fn fresh(version: Version) -> Self;

    fn version(&self) -> Version;
}

/// Progress for every classic mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassicSave {
    pub version: Version,
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    #[serde(default)]
    pub main: UserGameData,
    #[serde(default)]
    pub mini: UserGameData,
    #[serde(default)]
    pub max: UserGameData,
}

impl ClassicSave {
    #[must_use]
    pub fn mode(&self, mode: ClassicMode) -> &UserGameData {
        match mode {
            ClassicMode::Main => &self.main,
            ClassicMode::Mini => &self.mini,
            ClassicMode::Max => &self.max,
        }
    }

    pub fn mode_mut(&mut self, mode: ClassicMode) -> &mut UserGameData {
        match mode {
            ClassicMode::Main => &mut self.main,
            ClassicMode::Mini => &mut self.mini,
            ClassicMode::Max => &mut self.max,
        }
    }
}

impl Envelope for ClassicSave {
    const KEY: &'static str = CLASSIC_KEY;

    fn fresh(version: Version) -> Self {
        Self {
            version,
            uuid: Uuid::new_v4(),
            main: UserGameData::new(ClassicMode::Main),
            mini: UserGameData::new(ClassicMode::Mini),
            max: UserGameData::new(ClassicMode::Max),
        }
    }

    fn version(&self) -> Version {
        self.version
    }
}

impl Envelope for HexGameState {
    const KEY: &'static str = HEX_KEY;

    fn fresh(version: Version) -> Self {
        Self::fresh(version)
    }

    fn version(&self) -> Version {
        self.version
    }
}
