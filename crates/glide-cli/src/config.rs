//! CLI configuration from environment.

use std::env;
use std::path::PathBuf;

use glide_core::PlotRules;

#[derive(Debug, Clone)]
pub struct Config {
    pub min_altitude_ft: f64,
    pub max_altitude_ft: f64,
    pub gliders_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = PlotRules::default();
        Self {
            min_altitude_ft: env::var("GLIDE_MIN_ALTITUDE_FT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_altitude_ft),
            max_altitude_ft: env::var("GLIDE_MAX_ALTITUDE_FT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_altitude_ft),
            gliders_path: env::var("GLIDE_GLIDERS_PATH").ok().map(PathBuf::from),
        }
    }

    /// Plot rules with this configuration's band limits.
    pub fn rules(&self) -> PlotRules {
        PlotRules {
            min_altitude_ft: self.min_altitude_ft,
            max_altitude_ft: self.max_altitude_ft,
            ..PlotRules::default()
        }
    }
}
