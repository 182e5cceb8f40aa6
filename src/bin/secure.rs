//! Shot map behind a username/password login.

use anyhow::Context;
use shot_map::app::{ShotMapApp, native_options};
use shot_map::config::{DataPaths, WINDOW_TITLE};
use shot_map::gate::{AccessGate, Credentials};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let paths = DataPaths::from_env();
    let credentials = Credentials::load(&paths.secrets).context("loading login secrets")?;
    log::info!(
        "Loaded {} credential(s) from {}",
        credentials.len(),
        paths.secrets.display()
    );

    let app = ShotMapApp::new(paths.shots).with_gate(AccessGate::new(credentials));

    eframe::run_native(
        WINDOW_TITLE,
        native_options(),
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
