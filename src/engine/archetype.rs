// src/engine/archetype.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// The four financial archetypes a quiz attempt can resolve to.
///
/// Declaration order is the canonical order used for tie-breaking:
/// an earlier variant wins over a later one with the same score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Archetype {
    Avoider,
    Gambler,
    Realist,
    Architect,
}

impl Archetype {
    /// All archetypes in canonical order.
    pub const ALL: [Archetype; 4] = [
        Archetype::Avoider,
        Archetype::Gambler,
        Archetype::Realist,
        Archetype::Architect,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::Avoider => "Avoider",
            Archetype::Gambler => "Gambler",
            Archetype::Realist => "Realist",
            Archetype::Architect => "Architect",
        }
    }

    /// Position of the archetype in canonical order (0..4).
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = EngineError;

    /// Parses an archetype name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Archetype::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownArchetype(s.to_string()))
    }
}

/// Per-archetype point totals for one attempt.
///
/// Serialized with the archetype names as keys, e.g.
/// `{"Avoider": 9, "Gambler": 6, "Realist": 18, "Architect": 12}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTally {
    #[serde(rename = "Avoider")]
    pub avoider: i64,
    #[serde(rename = "Gambler")]
    pub gambler: i64,
    #[serde(rename = "Realist")]
    pub realist: i64,
    #[serde(rename = "Architect")]
    pub architect: i64,
}

impl ScoreTally {
    pub fn get(&self, archetype: Archetype) -> i64 {
        match archetype {
            Archetype::Avoider => self.avoider,
            Archetype::Gambler => self.gambler,
            Archetype::Realist => self.realist,
            Archetype::Architect => self.architect,
        }
    }

    fn slot_mut(&mut self, archetype: Archetype) -> &mut i64 {
        match archetype {
            Archetype::Avoider => &mut self.avoider,
            Archetype::Gambler => &mut self.gambler,
            Archetype::Realist => &mut self.realist,
            Archetype::Architect => &mut self.architect,
        }
    }

    /// Returns a copy with `points` added to one archetype; the others are untouched.
    pub fn with_points(mut self, archetype: Archetype, points: i64) -> Self {
        *self.slot_mut(archetype) += points;
        self
    }

    /// True while no points have been recorded.
    pub fn is_empty(&self) -> bool {
        Archetype::ALL.into_iter().all(|a| self.get(a) == 0)
    }

    /// Iterates `(archetype, points)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Archetype, i64)> + '_ {
        Archetype::ALL.into_iter().map(|a| (a, self.get(a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_archetype_names() {
        assert_eq!("Realist".parse::<Archetype>().unwrap(), Archetype::Realist);
        assert_eq!("architect".parse::<Archetype>().unwrap(), Archetype::Architect);
        assert!(matches!(
            "Saver".parse::<Archetype>(),
            Err(EngineError::UnknownArchetype(_))
        ));
    }

    #[test]
    fn test_tally_serializes_with_archetype_keys() {
        let tally = ScoreTally::default()
            .with_points(Archetype::Gambler, 3)
            .with_points(Archetype::Gambler, 4);

        let value = serde_json::to_value(tally).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"Avoider": 0, "Gambler": 7, "Realist": 0, "Architect": 0})
        );
    }

    #[test]
    fn test_unknown_tally_key_is_rejected() {
        let parsed = serde_json::from_str::<Archetype>("\"Hoarder\"");
        assert!(parsed.is_err());
    }
}
