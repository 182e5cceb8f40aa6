use eframe::egui::Color32;
use palette::{named, Srgb, WithAlpha};

// ---------------------------------------------------------------------------
// Fixed palette
// ---------------------------------------------------------------------------

/// Fill for shots that were scored (`#008000`).
pub const GOAL_FILL: Srgb<u8> = named::GREEN;
/// Fill for every other outcome.
pub const MISS_FILL: Srgb<u8> = named::WHITE;
/// Marker edges and pitch lines.
pub const LINE: Srgb<u8> = named::BLACK;
/// Pitch background (`#f0f0f0`).
pub const PITCH: Srgb<u8> = Srgb::new(0xf0, 0xf0, 0xf0);

pub const GOAL_OPACITY: f32 = 1.0;
pub const MISS_OPACITY: f32 = 0.5;

// ---------------------------------------------------------------------------
// Conversion: palette colour + opacity → Color32
// ---------------------------------------------------------------------------

/// Convert an sRGB colour and an opacity in `0.0..=1.0` to an egui colour.
pub fn with_opacity(color: Srgb<u8>, opacity: f32) -> Color32 {
    let rgba = color
        .into_format::<f32>()
        .with_alpha(opacity.clamp(0.0, 1.0))
        .into_format::<u8, u8>();
    Color32::from_rgba_unmultiplied(rgba.red, rgba.green, rgba.blue, rgba.alpha)
}

/// Opaque egui colour.
pub fn opaque(color: Srgb<u8>) -> Color32 {
    with_opacity(color, 1.0)
}
