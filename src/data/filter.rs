use super::model::{Selection, ShotDataset, ShotEvent};

// ---------------------------------------------------------------------------
// Filter state: the two cascading dropdowns
// ---------------------------------------------------------------------------

/// Current team / player choice. The player is only meaningful under a
/// concrete team.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub team: Selection,
    pub player: Selection,
}

impl FilterSelection {
    /// Changing the team always resets the player.
    pub fn set_team(&mut self, team: Selection) {
        if self.team != team {
            self.player = Selection::Any;
        }
        self.team = team;
    }

    /// A player can only be picked once a team is; otherwise it stays `Any`.
    pub fn set_player(&mut self, player: Selection) {
        self.player = if self.team.is_any() {
            Selection::Any
        } else {
            player
        };
    }
}

// ---------------------------------------------------------------------------
// Dropdown options
// ---------------------------------------------------------------------------

/// Sentinel first, then every team in ascending order.
pub fn team_options(dataset: &ShotDataset) -> Vec<Selection> {
    std::iter::once(Selection::Any)
        .chain(dataset.teams.iter().cloned().map(Selection::Value))
        .collect()
}

/// Sentinel first, then the players of `team` in ascending order.
/// Without a concrete team the only option is the sentinel.
pub fn player_options(dataset: &ShotDataset, team: &Selection) -> Vec<Selection> {
    let players = team
        .value()
        .and_then(|t| dataset.players_by_team.get(t))
        .into_iter()
        .flatten()
        .cloned()
        .map(Selection::Value);

    std::iter::once(Selection::Any).chain(players).collect()
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of shots that pass both selections, in dataset order.
pub fn filtered_indices(dataset: &ShotDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .shots
        .iter()
        .enumerate()
        .filter(|(_, shot)| {
            selection.team.matches(&shot.team) && selection.player.matches(&shot.player)
        })
        .map(|(i, _)| i)
        .collect()
}

/// Same as [`filtered_indices`] but yields the shots themselves.
pub fn filter_shots<'a>(dataset: &'a ShotDataset, selection: &FilterSelection) -> Vec<&'a ShotEvent> {
    filtered_indices(dataset, selection)
        .into_iter()
        .map(|i| &dataset.shots[i])
        .collect()
}
