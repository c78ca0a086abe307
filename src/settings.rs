//! Game settings and preferences
//!
//! Persisted separately from high scores in the config directory.

use serde::{Deserialize, Serialize};

use crate::persistence;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === HUD ===
    /// Show the countdown readout
    pub show_timer: bool,
    /// Recolor the timer when time runs short
    pub urgent_flash: bool,

    // === Audio (prep for later) ===
    /// Sound effects on
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Accessibility ===
    /// Reduced motion (minimize flashes and pulses)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_timer: true,
            urgent_flash: true,
            sound: true,
            master_volume: 0.8,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Config file name
    const FILE: &'static str = "settings.json";

    /// Effective urgency recoloring (respects reduced_motion)
    pub fn effective_urgent_flash(&self) -> bool {
        self.urgent_flash && !self.reduced_motion
    }

    /// Load settings from the config directory, falling back to defaults
    pub fn load() -> Self {
        match persistence::load_json(Self::FILE) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to the config directory
    pub fn save(&self) {
        persistence::save_json(Self::FILE, self);
    }
}
