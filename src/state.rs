use std::path::PathBuf;

use crate::data::filter::{FilterSelection, filtered_indices, player_options, team_options};
use crate::data::loader::load_file;
use crate::data::model::{Selection, ShotDataset, ShotEvent, ShotSummary};
use crate::pitch::{ShotMarker, shot_markers};

// ---------------------------------------------------------------------------
// Actions emitted by the UI
// ---------------------------------------------------------------------------

/// A user interaction. Widgets emit these instead of mutating state directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Load(PathBuf),
    SelectTeam(Selection),
    SelectPlayer(Selection),
}

/// Whether an action changed anything visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    Unchanged,
    Changed,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The dashboard state, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    /// File the current dataset came from.
    pub source: Option<PathBuf>,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<ShotDataset>,

    /// Current dropdown choices.
    pub selection: FilterSelection,

    /// Indices of shots passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Load error shown in place of the dashboard.
    pub status_message: Option<String>,
}

impl AppState {
    /// Apply one action and report what needs redrawing.
    pub fn apply(&mut self, action: Action) -> Redraw {
        match action {
            Action::Load(path) => {
                self.load(path);
                Redraw::Changed
            }
            Action::SelectTeam(team) => {
                if team == self.selection.team {
                    return Redraw::Unchanged;
                }
                self.selection.set_team(team);
                self.refilter();
                Redraw::Changed
            }
            Action::SelectPlayer(player) => {
                if player == self.selection.player {
                    return Redraw::Unchanged;
                }
                self.selection.set_player(player);
                self.refilter();
                Redraw::Changed
            }
        }
    }

    /// Load `path`, replacing the current dataset. On failure the dashboard
    /// is cleared and only the error is kept.
    fn load(&mut self, path: PathBuf) {
        match load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} shots from {} ({} teams)",
                    dataset.len(),
                    path.display(),
                    dataset.teams.len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.dataset = None;
                self.visible_indices.clear();
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
        self.source = Some(path);
    }

    /// Ingest a newly loaded dataset and reset the filters.
    pub fn set_dataset(&mut self, dataset: ShotDataset) {
        self.selection = FilterSelection::default();
        self.visible_indices = (0..dataset.len()).collect();
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.selection);
            log::debug!(
                "Filter team={} player={}: {} of {} shots",
                self.selection.team,
                self.selection.player,
                self.visible_indices.len(),
                ds.len()
            );
        }
    }

    /// Whether a load has been attempted (successfully or not).
    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn team_options(&self) -> Vec<Selection> {
        self.dataset.as_ref().map(team_options).unwrap_or_default()
    }

    pub fn player_options(&self) -> Vec<Selection> {
        self.dataset
            .as_ref()
            .map(|ds| player_options(ds, &self.selection.team))
            .unwrap_or_default()
    }

    pub fn visible_shots(&self) -> Vec<&ShotEvent> {
        match &self.dataset {
            Some(ds) => self.visible_indices.iter().map(|&i| &ds.shots[i]).collect(),
            None => Vec::new(),
        }
    }

    pub fn markers(&self) -> Vec<ShotMarker> {
        shot_markers(self.visible_shots())
    }

    pub fn summary(&self) -> ShotSummary {
        ShotSummary::from_shots(self.visible_shots())
    }
}
