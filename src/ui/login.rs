use eframe::egui::{self, Color32, Key, RichText, Ui};

use crate::config::{LOGIN_ERROR, TITLE};
use crate::gate::AccessGate;

/// Login form shown until the gate opens. Nothing else is rendered meanwhile.
pub fn login_page(ui: &mut Ui, gate: &mut AccessGate) {
    gate.open_form();
    let failed = gate.failed();
    let mut submit = false;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.heading(RichText::new(TITLE).size(28.0).strong());
        ui.add_space(16.0);

        let Some(form) = gate.form_mut() else {
            return;
        };

        ui.group(|ui: &mut Ui| {
            ui.set_max_width(320.0);
            egui::Grid::new("credentials")
                .num_columns(2)
                .spacing([8.0, 8.0])
                .show(ui, |ui: &mut Ui| {
                    ui.label("Username");
                    ui.text_edit_singleline(&mut form.username);
                    ui.end_row();

                    ui.label("Password");
                    let password =
                        ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
                    if password.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                        submit = true;
                    }
                    ui.end_row();
                });

            if ui.button("Log in").clicked() {
                submit = true;
            }
        });

        if failed {
            ui.add_space(8.0);
            ui.label(RichText::new(LOGIN_ERROR).color(Color32::RED));
        }
    });

    if submit {
        gate.submit();
        ui.ctx().request_repaint();
    }
}
