use std::env;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

// Files
pub const DEFAULT_DATA_FILE: &str = "euros_2024_shot_map.csv";
pub const DEFAULT_SECRETS_FILE: &str = "secrets.json";
pub const DATA_ENV: &str = "SHOT_MAP_DATA";
pub const SECRETS_ENV: &str = "SHOT_MAP_SECRETS";

// Window
pub const WINDOW_TITLE: &str = "Shot Map";
pub const WINDOW_SIZE: [f32; 2] = [900.0, 1000.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [500.0, 500.0];

// Page text
pub const TITLE: &str = "Euros 2024 Shot Map";
pub const SUBTITLE: &str = "Filter to any team/player to see all their shots taken!";
pub const LOGIN_ERROR: &str = "User not known or password incorrect";

/// Label shown for the "no filter" choice in both dropdowns.
pub const SENTINEL: &str = "Select";

/// Event type a row must carry to be kept.
pub const SHOT_TYPE: &str = "Shot";

/// Marker area per unit of expected goals, in square screen points.
pub const MARKER_AREA_PER_XG: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Runtime paths
// ---------------------------------------------------------------------------

/// Input locations, resolved from env overrides or the defaults above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub shots: PathBuf,
    pub secrets: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            shots: PathBuf::from(DEFAULT_DATA_FILE),
            secrets: PathBuf::from(DEFAULT_SECRETS_FILE),
        }
    }
}

impl DataPaths {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            shots: path_from_env(DATA_ENV).unwrap_or(defaults.shots),
            secrets: path_from_env(SECRETS_ENV).unwrap_or(defaults.secrets),
        }
    }
}

fn path_from_env(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .map(PathBuf::from)
}
