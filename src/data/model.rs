use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::config::SENTINEL;

// ---------------------------------------------------------------------------
// ShotOutcome
// ---------------------------------------------------------------------------

/// Result of a shot. Only `Goal` changes how a marker is drawn; every other
/// outcome keeps its source text for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShotOutcome {
    Goal,
    Other(String),
}

impl ShotOutcome {
    pub fn parse(s: &str) -> Self {
        if s == "Goal" {
            ShotOutcome::Goal
        } else {
            ShotOutcome::Other(s.to_string())
        }
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, ShotOutcome::Goal)
    }
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotOutcome::Goal => write!(f, "Goal"),
            ShotOutcome::Other(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// ShotEvent – one retained row of the source table
// ---------------------------------------------------------------------------

/// A single shot. Coordinates use the StatsBomb 120 × 80 pitch.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotEvent {
    pub team: String,
    pub player: String,
    /// `[x, y]`: x along the pitch length (0..120), y across it (0..80).
    pub location: [f64; 2],
    /// StatsBomb expected goals.
    pub xg: f64,
    pub outcome: ShotOutcome,
}

// ---------------------------------------------------------------------------
// Selection – one dropdown value
// ---------------------------------------------------------------------------

/// A dropdown choice: either the sentinel ("no filter") or a concrete name.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Selection {
    #[default]
    Any,
    Value(String),
}

impl Selection {
    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::Any => None,
            Selection::Value(v) => Some(v),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Selection::Any)
    }

    /// Does `field` pass this selection?
    pub fn matches(&self, field: &str) -> bool {
        self.value().map_or(true, |v| v == field)
    }
}

impl From<&str> for Selection {
    /// The sentinel label maps back to `Any`, like the dropdown does.
    fn from(s: &str) -> Self {
        if s.is_empty() || s == SENTINEL {
            Selection::Any
        } else {
            Selection::Value(s.to_string())
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Any => write!(f, "{SENTINEL}"),
            Selection::Value(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// ShotDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All shots of one file, indexed 0..n in file order, with the dropdown
/// vocabularies computed once at load time.
#[derive(Debug, Clone, Default)]
pub struct ShotDataset {
    pub shots: Vec<ShotEvent>,
    /// Distinct non-empty team names, ascending.
    pub teams: BTreeSet<String>,
    /// Team → distinct non-empty player names, ascending.
    pub players_by_team: BTreeMap<String, BTreeSet<String>>,
}

impl ShotDataset {
    /// Build the team / player indices from the loaded shots.
    pub fn from_shots(shots: Vec<ShotEvent>) -> Self {
        let mut teams = BTreeSet::new();
        let mut players_by_team: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for shot in &shots {
            if shot.team.is_empty() {
                continue;
            }
            teams.insert(shot.team.clone());
            let players = players_by_team.entry(shot.team.clone()).or_default();
            if !shot.player.is_empty() {
                players.insert(shot.player.clone());
            }
        }

        ShotDataset {
            shots,
            teams,
            players_by_team,
        }
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ShotSummary – totals for the visible shots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShotSummary {
    pub shots: usize,
    pub goals: usize,
    pub total_xg: f64,
}

impl ShotSummary {
    pub fn from_shots<'a, I>(shots: I) -> Self
    where
        I: IntoIterator<Item = &'a ShotEvent>,
    {
        shots.into_iter().fold(ShotSummary::default(), |mut acc, shot| {
            acc.shots += 1;
            acc.goals += usize::from(shot.outcome.is_goal());
            if shot.xg.is_finite() {
                acc.total_xg += shot.xg;
            }
            acc
        })
    }
}
