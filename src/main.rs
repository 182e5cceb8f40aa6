use shot_map::app::{ShotMapApp, native_options};
use shot_map::config::{DataPaths, WINDOW_TITLE};

fn main() -> eframe::Result {
    env_logger::init();

    let paths = DataPaths::from_env();
    log::info!("Shot data: {}", paths.shots.display());

    eframe::run_native(
        WINDOW_TITLE,
        native_options(),
        Box::new(move |_cc| Ok(Box::new(ShotMapApp::new(paths.shots)))),
    )
}
