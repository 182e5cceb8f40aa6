use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::{self, GOAL_FILL, MISS_FILL};
use crate::config::{SUBTITLE, TITLE};
use crate::data::model::Selection;
use crate::state::{Action, AppState};

// ---------------------------------------------------------------------------
// Page header
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui) {
    ui.heading(RichText::new(TITLE).size(28.0).strong());
    ui.label(RichText::new(SUBTITLE).size(18.0));
    ui.add_space(8.0);
}

// ---------------------------------------------------------------------------
// Team / player dropdowns
// ---------------------------------------------------------------------------

/// Render the team dropdown and, once a team is chosen, the player dropdown.
pub fn filters(ui: &mut Ui, state: &AppState, actions: &mut Vec<Action>) {
    if state.dataset.is_none() {
        return;
    }

    let teams = state.team_options();
    if let Some(team) = select_box(ui, "team", "Select a team", &state.selection.team, &teams) {
        actions.push(Action::SelectTeam(team));
    }

    if !state.selection.team.is_any() {
        let players = state.player_options();
        if let Some(player) =
            select_box(ui, "player", "Select a player", &state.selection.player, &players)
        {
            actions.push(Action::SelectPlayer(player));
        }
    }
    ui.add_space(4.0);
}

/// Labelled combo box. Returns the clicked option, if any.
fn select_box(
    ui: &mut Ui,
    id: &str,
    label: &str,
    current: &Selection,
    options: &[Selection],
) -> Option<Selection> {
    let mut picked = None;
    ui.label(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.to_string())
        .width(ui.available_width().min(320.0))
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                if ui
                    .selectable_label(option == current, option.to_string())
                    .clicked()
                {
                    picked = Some(option.clone());
                }
            }
        });
    picked
}

// ---------------------------------------------------------------------------
// Summary + legend
// ---------------------------------------------------------------------------

pub fn summary(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        return;
    }
    let summary = state.summary();
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} shots, {} goals, {:.2} xG",
            summary.shots, summary.goals, summary.total_xg
        ));
        ui.separator();
        ui.label(RichText::new("●").color(color::opaque(GOAL_FILL)));
        ui.label("Goal");
        ui.label(RichText::new("●").color(color::opaque(MISS_FILL)).strong());
        ui.label("Other");
        ui.label(RichText::new("(size = xG)").weak());
    });
}

/// Load error in place of the dashboard.
pub fn load_error(ui: &mut Ui, message: &str) {
    ui.add_space(16.0);
    ui.label(RichText::new(message).color(Color32::RED));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState, actions: &mut Vec<Action>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                if let Some(action) = open_file_dialog() {
                    actions.push(action);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} shots loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(path) = &state.source {
            ui.separator();
            ui.label(RichText::new(path.display().to_string()).weak());
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<Action> {
    rfd::FileDialog::new()
        .set_title("Open shot data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
        .map(Action::Load)
}
