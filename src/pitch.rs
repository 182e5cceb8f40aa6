//! Vertical half-pitch geometry and the shot → marker mapping.
//!
//! Pitch coordinates follow StatsBomb (x along the 120 yd length, y across the
//! 80 yd width). The plot shows the attacking half standing up: plot x is the
//! pitch y, plot y is the pitch x, so the goal sits at the top.

use std::f64::consts::PI;

use eframe::egui::Color32;

use crate::color::{self, GOAL_FILL, GOAL_OPACITY, LINE, MISS_FILL, MISS_OPACITY};
use crate::config::MARKER_AREA_PER_XG;
use crate::data::model::ShotEvent;

pub const PITCH_LENGTH: f64 = 120.0;
pub const PITCH_WIDTH: f64 = 80.0;
pub const HALFWAY: f64 = PITCH_LENGTH / 2.0;

const CIRCLE_RADIUS: f64 = 10.0;
const PENALTY_BOX_DEPTH: f64 = 18.0;
const PENALTY_BOX_WIDTH: f64 = 44.0;
const SIX_YARD_DEPTH: f64 = 6.0;
const SIX_YARD_WIDTH: f64 = 20.0;
const PENALTY_SPOT: f64 = 12.0;
const GOAL_WIDTH: f64 = 8.0;
const GOAL_DEPTH: f64 = 2.4;
const ARC_SEGMENTS: usize = 48;

/// Plot-space bounds `[min, max]` that frame the half pitch with a margin.
pub const BOUNDS: [[f64; 2]; 2] = [
    [-2.0, HALFWAY - 2.0],
    [PITCH_WIDTH + 2.0, PITCH_LENGTH + GOAL_DEPTH + 2.0],
];

/// Map a StatsBomb `[x, y]` location to plot space.
pub fn to_plot(location: [f64; 2]) -> [f64; 2] {
    let [x, y] = location;
    [y, x]
}

// ---------------------------------------------------------------------------
// Markings
// ---------------------------------------------------------------------------

/// Playing surface of the half, as a closed polygon in plot space.
pub fn surface() -> Vec<[f64; 2]> {
    vec![
        [0.0, HALFWAY],
        [PITCH_WIDTH, HALFWAY],
        [PITCH_WIDTH, PITCH_LENGTH],
        [0.0, PITCH_LENGTH],
    ]
}

/// All line markings of the half as polylines in plot space.
pub fn markings() -> Vec<Vec<[f64; 2]>> {
    let mid = PITCH_WIDTH / 2.0;
    let spot = [mid, PITCH_LENGTH - PENALTY_SPOT];

    // Part of the penalty arc that lies outside the box.
    let box_edge = PITCH_LENGTH - PENALTY_BOX_DEPTH;
    let cut = ((spot[1] - box_edge) / CIRCLE_RADIUS).asin();

    let mut lines = vec![
        // Touchlines, goal line and halfway line.
        vec![
            [0.0, HALFWAY],
            [0.0, PITCH_LENGTH],
            [PITCH_WIDTH, PITCH_LENGTH],
            [PITCH_WIDTH, HALFWAY],
            [0.0, HALFWAY],
        ],
        open_box(PENALTY_BOX_WIDTH, PENALTY_BOX_DEPTH),
        open_box(SIX_YARD_WIDTH, SIX_YARD_DEPTH),
        open_box(GOAL_WIDTH, -GOAL_DEPTH),
        arc([mid, HALFWAY], CIRCLE_RADIUS, 0.0, PI),
        arc(spot, CIRCLE_RADIUS, PI + cut, 2.0 * PI - cut),
    ];
    lines.retain(|l| !l.is_empty());
    lines
}

/// Penalty spot in plot space.
pub fn penalty_spot() -> [f64; 2] {
    [PITCH_WIDTH / 2.0, PITCH_LENGTH - PENALTY_SPOT]
}

/// Three sides of a box centred on the goal line, `depth` into the pitch
/// (negative depth goes behind the line).
fn open_box(width: f64, depth: f64) -> Vec<[f64; 2]> {
    let left = (PITCH_WIDTH - width) / 2.0;
    let right = left + width;
    let inner = PITCH_LENGTH - depth;
    vec![
        [left, PITCH_LENGTH],
        [left, inner],
        [right, inner],
        [right, PITCH_LENGTH],
    ]
}

fn arc(center: [f64; 2], radius: f64, from: f64, to: f64) -> Vec<[f64; 2]> {
    (0..=ARC_SEGMENTS)
        .map(|i| {
            let t = from + (to - from) * i as f64 / ARC_SEGMENTS as f64;
            [center[0] + radius * t.cos(), center[1] + radius * t.sin()]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Shot markers
// ---------------------------------------------------------------------------

/// Stacking layer. Later variants are drawn on top; pitch lines sit between
/// the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Miss,
    Goal,
}

/// Everything needed to draw one shot.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotMarker {
    /// Plot-space centre.
    pub position: [f64; 2],
    /// Marker area in square screen points.
    pub area: f64,
    pub fill: Color32,
    pub edge: Color32,
    pub opacity: f32,
    pub layer: Layer,
}

impl ShotMarker {
    pub fn from_shot(shot: &ShotEvent) -> Self {
        let goal = shot.outcome.is_goal();
        let (fill, opacity, layer) = if goal {
            (GOAL_FILL, GOAL_OPACITY, Layer::Goal)
        } else {
            (MISS_FILL, MISS_OPACITY, Layer::Miss)
        };

        ShotMarker {
            position: to_plot(shot.location),
            area: MARKER_AREA_PER_XG * shot.xg,
            fill: color::with_opacity(fill, opacity),
            edge: color::with_opacity(LINE, opacity),
            opacity,
            layer,
        }
    }

    /// Circle radius in screen points for the marker area.
    pub fn radius(&self) -> f32 {
        let area = if self.area.is_finite() { self.area.max(0.0) } else { 0.0 };
        (area.sqrt() / 2.0) as f32
    }
}

/// One marker per shot, in drawing order: all misses, then all goals, each
/// group keeping the input order.
pub fn shot_markers<'a, I>(shots: I) -> Vec<ShotMarker>
where
    I: IntoIterator<Item = &'a ShotEvent>,
{
    let mut markers: Vec<ShotMarker> = shots.into_iter().map(ShotMarker::from_shot).collect();
    markers.sort_by_key(|m| m.layer);
    markers
}
