//! Gaming platforms a game record can belong to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The platform a game runs on.
///
/// Serialized as a lowercase snake_case tag (`"pc"`, `"xbox_one"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Pc,
    Mac,
    Linux,
    Android,
    Ios,
    Switch,
    Wii,
    WiiU,
    N64,
    Snes,
    Nes,
    Ps1,
    Ps2,
    Ps3,
    Ps4,
    Ps5,
    Psp,
    Xbox,
    Xbox360,
    XboxOne,
    XboxSeries,
}

impl Platform {
    /// Every platform, in declaration order.
    pub const ALL: [Platform; 21] = [
        Platform::Pc,
        Platform::Mac,
        Platform::Linux,
        Platform::Android,
        Platform::Ios,
        Platform::Switch,
        Platform::Wii,
        Platform::WiiU,
        Platform::N64,
        Platform::Snes,
        Platform::Nes,
        Platform::Ps1,
        Platform::Ps2,
        Platform::Ps3,
        Platform::Ps4,
        Platform::Ps5,
        Platform::Psp,
        Platform::Xbox,
        Platform::Xbox360,
        Platform::XboxOne,
        Platform::XboxSeries,
    ];

    /// Returns the stable tag used in JSON and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Pc => "pc",
            Platform::Mac => "mac",
            Platform::Linux => "linux",
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Switch => "switch",
            Platform::Wii => "wii",
            Platform::WiiU => "wii_u",
            Platform::N64 => "n64",
            Platform::Snes => "snes",
            Platform::Nes => "nes",
            Platform::Ps1 => "ps1",
            Platform::Ps2 => "ps2",
            Platform::Ps3 => "ps3",
            Platform::Ps4 => "ps4",
            Platform::Ps5 => "ps5",
            Platform::Psp => "psp",
            Platform::Xbox => "xbox",
            Platform::Xbox360 => "xbox360",
            Platform::XboxOne => "xbox_one",
            Platform::XboxSeries => "xbox_series",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ModelError;

    /// Parses a platform tag case-insensitively. `-` is accepted in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Platform::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownPlatform(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_str_case_insensitive() {
        assert_eq!("PC".parse::<Platform>().unwrap(), Platform::Pc);
        assert_eq!("Xbox-One".parse::<Platform>().unwrap(), Platform::XboxOne);
        assert_eq!(" wii_u ".parse::<Platform>().unwrap(), Platform::WiiU);
    }

    #[test]
    fn test_platform_from_str_unknown() {
        let err = "dreamcast".parse::<Platform>().unwrap_err();
        assert_eq!(err.to_string(), "unknown platform: dreamcast");
    }

    #[test]
    fn test_platform_serde_tag_matches_as_str() {
        for platform in Platform::ALL {
            let json = serde_json::to_string(&platform).unwrap();
            assert_eq!(json, format!("\"{}\"", platform.as_str()));
        }
    }
}
