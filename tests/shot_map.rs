use std::path::PathBuf;

use shot_map::color::{self, GOAL_FILL};
use shot_map::data::filter::{FilterSelection, filter_shots, player_options, team_options};
use shot_map::data::loader::{load_file, parse_csv};
use shot_map::data::model::{Selection, ShotOutcome};
use shot_map::error::LoadError;
use shot_map::pitch::{Layer, shot_markers};
use shot_map::state::{Action, AppState, Redraw};

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn france() -> FilterSelection {
    let mut sel = FilterSelection::default();
    sel.set_team(Selection::from("France"));
    sel
}

#[test]
fn loads_fixture_keeping_only_shots() {
    let ds = load_file(&fixture("euros_sample.csv")).expect("fixture should load");
    assert_eq!(ds.len(), 7);
    assert_eq!(ds.shots[0].player, "Kylian Mbappé");
    assert_eq!(ds.shots[0].location, [108.3, 36.9]);
    assert_eq!(ds.shots[0].outcome, ShotOutcome::Goal);
    assert_eq!(ds.shots[6].team, "");
}

#[test]
fn dropdowns_follow_fixture() {
    let ds = load_file(&fixture("euros_sample.csv")).unwrap();

    let teams: Vec<String> = team_options(&ds).iter().map(|s| s.to_string()).collect();
    assert_eq!(teams, ["Select", "France", "Spain"]);

    let players: Vec<String> = player_options(&ds, &Selection::from("Spain"))
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(players, ["Select", "Dani Olmo", "Lamine Yamal", "Álvaro Morata"]);
}

#[test]
fn sentinel_keeps_unnamed_team_rows() {
    let ds = load_file(&fixture("euros_sample.csv")).unwrap();
    let all = filter_shots(&ds, &FilterSelection::default());
    assert_eq!(all.len(), ds.len());
}

#[test]
fn malformed_location_fails_the_whole_file() {
    let err = load_file(&fixture("bad_location.csv")).unwrap_err();
    match err.downcast_ref::<LoadError>() {
        Some(LoadError::Location { row, text, .. }) => {
            assert_eq!(*row, 1);
            assert_eq!(text, "108.3; 36.9");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn france_scenario() {
    let csv = "\
type,team,player,location,shot_statsbomb_xg,shot_outcome
Shot,France,Mbappe,\"[108.0, 36.0]\",0.5,Goal
Shot,Spain,Morata,\"[102.0, 44.0]\",0.2,Saved
";
    let ds = parse_csv(csv.as_bytes()).unwrap();

    let everything = shot_markers(filter_shots(&ds, &FilterSelection::default()));
    let filtered = filter_shots(&ds, &france());
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].player, "Mbappe");

    let markers = shot_markers(filtered);
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].area, 500.0);
    assert_eq!(markers[0].fill, color::opaque(GOAL_FILL));
    assert_eq!(markers[0].opacity, 1.0);
    assert_eq!(markers.len() + 1, everything.len());
}

#[test]
fn shot_with_blank_xg_still_renders_its_team() {
    let csv = "\
type,team,player,location,shot_statsbomb_xg,shot_outcome
Shot,France,Mbappe,\"[108.0, 36.0]\",0.5,Goal
Shot,Spain,Morata,\"[102.0, 44.0]\",,Saved
";
    let ds = parse_csv(csv.as_bytes()).expect("blank xG is not a load error");
    assert_eq!(ds.len(), 2);

    let france = filter_shots(&ds, &france());
    assert_eq!(france.len(), 1);
    assert_eq!(france[0].xg, 0.5);

    let markers = shot_markers(filter_shots(&ds, &FilterSelection::default()));
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].radius(), 0.0);
    assert!(markers[1].radius() > 0.0);
}

#[test]
fn dashboard_flow_through_actions() {
    let mut state = AppState::default();
    assert_eq!(
        state.apply(Action::Load(fixture("euros_sample.csv"))),
        Redraw::Changed
    );
    assert!(state.status_message.is_none());
    assert_eq!(state.visible_indices.len(), 7);

    state.apply(Action::SelectTeam(Selection::from("France")));
    state.apply(Action::SelectPlayer(Selection::from("Kylian Mbappé")));
    let summary = state.summary();
    assert_eq!(summary.shots, 2);
    assert_eq!(summary.goals, 1);

    let markers = state.markers();
    assert_eq!(markers.last().map(|m| m.layer), Some(Layer::Goal));

    state.apply(Action::SelectTeam(Selection::Any));
    assert_eq!(state.selection.player, Selection::Any);
    assert_eq!(state.visible_indices.len(), 7);
}

#[test]
fn loading_bad_file_replaces_dashboard_with_error() {
    let mut state = AppState::default();
    state.apply(Action::Load(fixture("euros_sample.csv")));
    state.apply(Action::Load(fixture("bad_location.csv")));
    assert!(state.dataset.is_none());
    let msg = state.status_message.unwrap();
    assert!(msg.contains("malformed location"), "{msg}");
}
