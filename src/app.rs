use std::path::PathBuf;

use eframe::egui;

use crate::config::{WINDOW_MIN_SIZE, WINDOW_SIZE};
use crate::gate::AccessGate;
use crate::state::{Action, AppState, Redraw};
use crate::ui::{login, panels, plot};

/// Window options shared by both binaries.
pub fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(WINDOW_MIN_SIZE),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Session context: the optional login gate plus the dashboard state.
pub struct ShotMapApp {
    pub state: AppState,
    pub gate: Option<AccessGate>,
    data_path: PathBuf,
}

impl ShotMapApp {
    pub fn new(data_path: PathBuf) -> Self {
        Self {
            state: AppState::default(),
            gate: None,
            data_path,
        }
    }

    /// Require a successful login before anything is loaded or drawn.
    pub fn with_gate(mut self, gate: AccessGate) -> Self {
        self.gate = Some(gate);
        self
    }

    fn dispatch(&mut self, ctx: &egui::Context, actions: Vec<Action>) {
        for action in actions {
            if self.state.apply(action) == Redraw::Changed {
                ctx.request_repaint();
            }
        }
    }
}

impl eframe::App for ShotMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(gate) = &mut self.gate {
            if !gate.is_authenticated() {
                egui::CentralPanel::default().show(ctx, |ui| {
                    login::login_page(ui, gate);
                });
                return;
            }
        }

        if !self.state.is_loaded() {
            let path = self.data_path.clone();
            self.dispatch(ctx, vec![Action::Load(path)]);
        }

        let mut actions = Vec::new();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &mut actions);
        });

        // ---- Central panel: selectors + pitch ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::header(ui);

            if let Some(msg) = &self.state.status_message {
                panels::load_error(ui, msg);
                return;
            }

            panels::filters(ui, &self.state, &mut actions);
            panels::summary(ui, &self.state);
            plot::shot_map(ui, &self.state);
        });

        self.dispatch(ctx, actions);
    }
}
