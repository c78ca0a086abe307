//! JSON storage under the platform config directory
//!
//! Settings and high scores live in small JSON documents. A missing or
//! corrupt file falls back to defaults with a logged warning; saves that
//! fail are logged and dropped.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Serialize;
use serde::de::DeserializeOwned;

fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "paulrobello", "number-rush")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Load a JSON document from the config directory
pub fn load_json<T: DeserializeOwned>(name: &str) -> Option<T> {
    let path = config_dir()?.join(name);
    let text = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Ignoring corrupt {}: {}", name, err);
            None
        }
    }
}

/// Save a JSON document to the config directory
pub fn save_json<T: Serialize>(name: &str, value: &T) {
    let Some(dir) = config_dir() else {
        log::warn!("No config directory available, {} not saved", name);
        return;
    };
    if let Err(err) = fs::create_dir_all(&dir) {
        log::warn!("Could not create {}: {}", dir.display(), err);
        return;
    }

    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let path = dir.join(name);
            if let Err(err) = fs::write(&path, json) {
                log::warn!("Could not write {}: {}", path.display(), err);
            } else {
                log::info!("Saved {}", name);
            }
        }
        Err(err) => log::warn!("Could not serialize {}: {}", name, err),
    }
}
