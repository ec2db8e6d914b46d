use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// What the player does with the dealt opening hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeepMode {
    /// Keep the four dealt cards.
    #[default]
    Keep,
    /// Return the opening hand and reshuffle before the mulligan draw.
    #[serde(alias = "nokeep", alias = "noKeep", alias = "no-keep")]
    NoKeep,
}

impl KeepMode {
    pub const ALL: [KeepMode; 2] = [KeepMode::Keep, KeepMode::NoKeep];

    pub const fn as_str(self) -> &'static str {
        match self {
            KeepMode::Keep => "keep",
            KeepMode::NoKeep => "no_keep",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            KeepMode::Keep => "Keep opening hand",
            KeepMode::NoKeep => "Reshuffle opening hand",
        }
    }
}

impl fmt::Display for KeepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeepMode {
    type Err = ParseKeepModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(KeepMode::Keep),
            "no_keep" | "nokeep" | "no-keep" => Ok(KeepMode::NoKeep),
            _ => Err(ParseKeepModeError(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeepModeError(String);

impl fmt::Display for ParseKeepModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown keep mode '{}' (expected 'keep' or 'no_keep')",
            self.0
        )
    }
}

impl std::error::Error for ParseKeepModeError {}
