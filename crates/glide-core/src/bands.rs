//! Altitude band generation, location expansion and ring eligibility.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GlideError, Result};
use crate::models::{CenterLocation, LandingSite, WindVector};
use crate::rules::PlotRules;

/// Which thousands get a boundary ring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RingSpacing {
    /// Every 1000ft from the minimum
    #[default]
    Thousands,
    /// Every 2000ft from the minimum
    EvenThousands,
    /// Every 2000ft from the minimum plus 1000ft
    OddThousands,
}

impl RingSpacing {
    fn start_offset_ft(self) -> f64 {
        match self {
            RingSpacing::Thousands | RingSpacing::EvenThousands => 0.0,
            RingSpacing::OddThousands => 1000.0,
        }
    }

    fn step_ft(self) -> f64 {
        match self {
            RingSpacing::Thousands => 1000.0,
            RingSpacing::EvenThousands | RingSpacing::OddThousands => 2000.0,
        }
    }
}

impl FromStr for RingSpacing {
    type Err = GlideError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "thousands" => Ok(RingSpacing::Thousands),
            "evenThousands" => Ok(RingSpacing::EvenThousands),
            "oddThousands" => Ok(RingSpacing::OddThousands),
            other => Err(GlideError::UnknownRingSpacing(other.to_string())),
        }
    }
}

/// Band altitudes between `min_ft` and `max_ft` inclusive, strictly increasing.
///
/// At most `max_bands` are produced; a wider range is rejected rather than
/// truncated.
pub fn altitude_bands(
    min_ft: f64,
    max_ft: f64,
    spacing: RingSpacing,
    max_bands: usize,
) -> Result<Vec<f64>> {
    if !min_ft.is_finite() || !max_ft.is_finite() {
        return Err(GlideError::InvalidBands(format!(
            "limits must be finite, got {min_ft}..{max_ft}"
        )));
    }

    let step = spacing.step_ft();
    let start = min_ft + spacing.start_offset_ft();
    if start > max_ft {
        return Err(GlideError::InvalidBands(format!(
            "no {spacing:?} bands between {min_ft}ft and {max_ft}ft"
        )));
    }
    if start + step == start {
        return Err(GlideError::InvalidBands(format!(
            "{step}ft spacing is below float resolution at {start}ft"
        )));
    }

    // Overflowing spans come out infinite and fail the cap.
    let steps = ((max_ft - start) / step).floor();
    if steps >= max_bands as f64 {
        return Err(GlideError::InvalidBands(format!(
            "{min_ft}ft to {max_ft}ft needs more than {max_bands} {spacing:?} bands"
        )));
    }

    let bands: Vec<f64> = (0..=steps as usize)
        .map(|i| start + i as f64 * step)
        .collect();
    if bands.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(GlideError::InvalidBands(format!(
            "{step}ft spacing is below float resolution at {start}ft"
        )));
    }
    Ok(bands)
}

/// Bands for the configured limits.
pub fn bands_for_rules(rules: &PlotRules, spacing: RingSpacing) -> Result<Vec<f64>> {
    altitude_bands(
        rules.min_altitude_ft,
        rules.max_altitude_ft,
        spacing,
        rules.max_band_count,
    )
}

/// One center location per (band, site), band-major.
pub fn expand_locations(
    sites: &[LandingSite],
    bands: &[f64],
    wind: WindVector,
    arrival_altitude_agl_ft: f64,
) -> Vec<CenterLocation> {
    bands
        .iter()
        .flat_map(|&band_altitude_ft| {
            sites.iter().map(move |site| CenterLocation {
                lat: site.lat,
                lon: site.lon,
                band_altitude_ft,
                wind,
                arrival_altitude_msl_ft: site.elevation_ft + arrival_altitude_agl_ft,
                name: site.name.clone(),
                type_code: site.type_code.clone(),
                description: site.description.clone(),
            })
        })
        .collect()
}

/// Whether `location` draws a ring at `band_altitude_ft`.
///
/// Turnpoints never do, and a band below the arrival altitude has nothing to reach.
pub fn is_eligible(location: &CenterLocation, band_altitude_ft: f64, rules: &PlotRules) -> bool {
    band_altitude_ft >= location.arrival_altitude_msl_ft && location.type_code != rules.turnpoint_code
}
