use std::path::PathBuf;

pub mod error;
pub mod prefs;
pub mod record;
pub mod render;
pub mod select;
pub mod widget;

pub use error::DataError;
pub use record::{HeroineRecord, Source};

/// Path of the shared dataset, relative to the workspace root.
pub fn heroines_data_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop();
    path.push("data");
    path.push("unsung_heroines_data.json");
    path
}

/// Path of the persisted preference file used by the CLI.
pub fn preferences_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop();
    path.push("data");
    path.push("preferences.json");
    path
}

/// Load and parse the heroine dataset from `path`.
pub fn load_records(path: &std::path::Path) -> Result<Vec<HeroineRecord>, DataError> {
    let raw = std::fs::read_to_string(path)?;
    let records = serde_json::from_str(&raw)?;
    Ok(records)
}
