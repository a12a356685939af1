//! Build and save-file version stamps
//!
//! Versions are written as `vMAJOR.MINOR.PATCH` and compared component-wise,
//! major first. A stamp is supported when it is not older than a minimum.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Version of this build, stamped into every envelope it writes
pub const BUILD_VERSION: Version = Version::new(0, 3, 0);

/// Oldest save-file version that can still be migrated forward
pub const MIN_SUPPORTED_VERSION: Version = Version::new(0, 2, 3);

/// Oldest cached dictionary version that is still trusted
pub const MIN_DICTIONARY_VERSION: Version = Version::new(0, 2, 0);

/// A `vMAJOR.MINOR.PATCH` version
///
/// Field order matters: the derived `Ord` compares major, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `v1.2.3` (the leading `v` is optional)
    ///
    /// Returns `None` for anything that is not exactly three numeric components.
    ///
    /// # Examples
    /// ```
    /// use salita::core::Version;
    ///
    /// assert_eq!(Version::parse("v0.2.3"), Some(Version::new(0, 2, 3)));
    /// assert_eq!(Version::parse("0.2"), None);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let text = text
            .strip_prefix('v')
            .or_else(|| text.strip_prefix('V'))
            .unwrap_or(text);

        let mut parts = text.split('.').map(|part| part.parse::<u32>().ok());
        let major = parts.next()??;
        let minor = parts.next()??;
        let patch = parts.next()??;

        if parts.next().is_some() {
            return None;
        }

        Some(Self::new(major, minor, patch))
    }

    /// Whether this version is at least `minimum`
    #[must_use]
    pub fn is_supported(self, minimum: Self) -> bool {
        self >= minimum
    }
}

/// Whether a stamped version string is still compatible with `minimum`
///
/// Components compare lexicographically, not one by one: `v0.3.0` satisfies a
/// `v0.2.3` minimum even though its patch is lower. A higher-priority component
/// that is strictly lower makes the version unsupported regardless of the lower
/// components. Unparseable stamps are never supported.
#[must_use]
pub fn is_supported_version(version: &str, minimum: Version) -> bool {
    Version::parse(version).is_some_and(|v| v.is_supported(minimum))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid version string: {s}"))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_and_without_prefix() {
        assert_eq!(Version::parse("v1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(Version::parse("1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(Version::parse(" V0.0.9 "), Some(Version::new(0, 0, 9)));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(Version::parse(""), None);
        assert_eq!(Version::parse("v1.2"), None);
        assert_eq!(Version::parse("v1.2.3.4"), None);
        assert_eq!(Version::parse("v1.x.3"), None);
        assert_eq!(Version::parse("v-1.2.3"), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let version = Version::new(0, 2, 3);
        assert_eq!(version.to_string(), "v0.2.3");
        assert_eq!(version.to_string().parse::<Version>(), Ok(version));
    }

    #[test]
    fn equal_version_is_supported() {
        assert!(is_supported_version("v0.2.3", Version::new(0, 2, 3)));
    }

    #[test]
    fn lower_patch_is_unsupported() {
        assert!(!is_supported_version("v0.2.2", Version::new(0, 2, 3)));
    }

    #[test]
    fn higher_priority_component_decides() {
        let minimum = Version::new(0, 2, 3);
        // Minor is higher, so the lower patch does not matter
        assert!(is_supported_version("v0.3.0", minimum));
        assert!(is_supported_version("v1.0.0", minimum));
        // Minor is lower, so the higher patch does not help
        assert!(!is_supported_version("v0.1.9", minimum));
        // Major is lower
        assert!(!is_supported_version("v0.9.9", Version::new(1, 0, 0)));
    }

    #[test]
    fn unparseable_is_unsupported() {
        assert!(!is_supported_version("", MIN_SUPPORTED_VERSION));
        assert!(!is_supported_version("latest", MIN_SUPPORTED_VERSION));
    }

    #[test]
    fn build_version_is_supported() {
        assert!(BUILD_VERSION.is_supported(MIN_SUPPORTED_VERSION));
        assert_eq!(BUILD_VERSION.to_string(), format!("v{}", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn serde_as_string() {
        let json = serde_json::to_string(&Version::new(0, 3, 0)).unwrap();
        assert_eq!(json, "\"v0.3.0\"");
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Version::new(0, 3, 0));
        assert!(serde_json::from_str::<Version>("\"nope\"").is_err());
    }
}
