use eframe::egui::{Stroke, Ui};
use egui_plot::{Line, MarkerShape, Plot, PlotPoints, Points, Polygon};

use crate::color::{self, LINE, PITCH};
use crate::pitch::{self, Layer};
use crate::state::AppState;

const LINE_WIDTH: f32 = 1.5;
const SPOT_RADIUS: f32 = 2.5;

// ---------------------------------------------------------------------------
// Shot map (central panel)
// ---------------------------------------------------------------------------

/// Draw the half pitch with one marker per visible shot.
///
/// Stacking: surface, non-goal markers, pitch lines, goal markers.
pub fn shot_map(ui: &mut Ui, state: &AppState) {
    let markers = state.markers();
    let [min, max] = pitch::BOUNDS;
    let line_color = color::opaque(LINE);

    Plot::new("shot_map")
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_background(false)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_double_click_reset(false)
        .include_x(min[0])
        .include_x(max[0])
        .include_y(min[1])
        .include_y(max[1])
        .show(ui, |plot_ui| {
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(pitch::surface()))
                    .fill_color(color::opaque(PITCH))
                    .stroke(Stroke::NONE),
            );

            for layer in [Layer::Miss, Layer::Goal] {
                for marker in markers.iter().filter(|m| m.layer == layer) {
                    let radius = marker.radius();
                    if radius <= 0.0 {
                        continue;
                    }
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![marker.position]))
                            .shape(MarkerShape::Circle)
                            .radius(radius)
                            .filled(true)
                            .color(marker.fill),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![marker.position]))
                            .shape(MarkerShape::Circle)
                            .radius(radius)
                            .filled(false)
                            .color(marker.edge),
                    );
                }

                if layer == Layer::Miss {
                    for line in pitch::markings() {
                        plot_ui.line(
                            Line::new(PlotPoints::from(line))
                                .color(line_color)
                                .width(LINE_WIDTH),
                        );
                    }
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![pitch::penalty_spot()]))
                            .shape(MarkerShape::Circle)
                            .radius(SPOT_RADIUS)
                            .filled(true)
                            .color(line_color),
                    );
                }
            }
        });
}
