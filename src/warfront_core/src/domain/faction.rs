use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The side a player fights for. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Faction {
    Usa,
    Russia,
    China,
    Europe,
}

impl Faction {
    pub const ALL: [Faction; 4] = [Faction::Usa, Faction::Russia, Faction::China, Faction::Europe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Faction::Usa => "USA",
            Faction::Russia => "RUSSIA",
            Faction::China => "CHINA",
            Faction::Europe => "EUROPE",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown faction: {0}")]
pub struct ParseFactionError(pub String);

impl FromStr for Faction {
    type Err = ParseFactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Faction::ALL
            .into_iter()
            .find(|faction| faction.as_str() == s)
            .ok_or_else(|| ParseFactionError(s.to_string()))
    }
}
