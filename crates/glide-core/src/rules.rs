//! Plot limits and map conventions.

use serde::{Deserialize, Serialize};

/// Configuration for band generation, eligibility and labelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRules {
    /// Lowest band altitude in feet MSL
    pub min_altitude_ft: f64,
    /// Highest band altitude in feet MSL
    pub max_altitude_ft: f64,
    /// Upper bound on generated bands; wider altitude ranges are rejected
    pub max_band_count: usize,
    /// Bearings (degrees) from a boundary's centroid where altitude labels go
    pub label_bearings_deg: Vec<f64>,
    /// Type code of sites that get a marker but never a ring
    pub turnpoint_code: String,
}

impl Default for PlotRules {
    fn default() -> Self {
        Self {
            min_altitude_ft: 2000.0,
            max_altitude_ft: 8000.0,
            max_band_count: 50,
            label_bearings_deg: vec![10.0, 100.0, 190.0, 280.0],
            turnpoint_code: "T".into(),
        }
    }
}
