use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::moves::CardZone;

/// Identifies one card the user picked, written as `<zone code>-<index>`.
///
/// Identifiers are unique within a single rendered view; the server decides
/// whether the selection is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardSelection {
    pub zone: CardZone,
    pub index: usize,
}

impl CardSelection {
    pub const fn new(zone: CardZone, index: usize) -> Self {
        Self { zone, index }
    }
}

impl fmt::Display for CardSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.zone.code(), self.index)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected `<zone>-<index>`, got `{0}`")]
    MissingSeparator(String),
    #[error("unknown zone `{0}`")]
    UnknownZone(String),
    #[error("invalid card index `{0}`")]
    InvalidIndex(String),
}

impl FromStr for CardSelection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((zone, index)) = s.split_once('-') else {
            return Err(ParseError::MissingSeparator(s.to_owned()));
        };

        let mut code = zone.chars();
        let zone = match (code.next(), code.next()) {
            (Some(c), None) => CardZone::from_code(c),
            _ => None,
        }
        .ok_or_else(|| ParseError::UnknownZone(zone.to_owned()))?;

        // only plain digits, `usize::from_str` would also take a leading `+`
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidIndex(index.to_owned()));
        }
        let index = index
            .parse()
            .map_err(|_| ParseError::InvalidIndex(index.to_owned()))?;

        Ok(CardSelection { zone, index })
    }
}

impl Serialize for CardSelection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CardSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        s.parse().map_err(serde::de::Error::custom)
    }
}
