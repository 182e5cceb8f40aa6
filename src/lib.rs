//! Euros 2024 shot map: load shot events, filter by team and player, and
//! plot them on a half pitch.
//!
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   data::loader ──► ShotDataset ──► data::filter ──► pitch (markers) ──► ui
//! ```

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod gate;
pub mod pitch;
pub mod state;
pub mod ui;
