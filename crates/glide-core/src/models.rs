//! Core data models for the glide-range engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GlideError, Result};

const FEET_PER_METER: f64 = 3.28084;

// ========== AIRCRAFT & WIND ==========

/// Aircraft glide performance, shared read-only by every calculator call of one plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlideParameters {
    /// Still-air best glide ratio (L/D)
    pub glide_ratio: f64,
    /// Best-glide airspeed in knots
    pub glide_speed_kt: f64,
    /// Fractional derating of the glide ratio, in [0, 1)
    pub safety_margin: f64,
}

impl GlideParameters {
    pub fn new(glide_ratio: f64, glide_speed_kt: f64, safety_margin: f64) -> Self {
        Self {
            glide_ratio,
            glide_speed_kt,
            safety_margin,
        }
    }

    /// Reject parameters the calculator cannot use.
    pub fn validate(&self) -> Result<()> {
        if !self.glide_ratio.is_finite() || self.glide_ratio <= 0.0 {
            return Err(GlideError::input(
                "glide_ratio",
                format!("must be a positive number, got {}", self.glide_ratio),
            ));
        }
        if !self.glide_speed_kt.is_finite() || self.glide_speed_kt <= 0.0 {
            return Err(GlideError::input(
                "glide_speed_kt",
                format!("must be a positive number, got {}", self.glide_speed_kt),
            ));
        }
        if !self.safety_margin.is_finite() || !(0.0..1.0).contains(&self.safety_margin) {
            return Err(GlideError::input(
                "safety_margin",
                format!("must be a fraction in [0, 1), got {}", self.safety_margin),
            ));
        }
        Ok(())
    }
}

/// Constant wind for the whole plot. Direction is where the wind blows FROM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindVector {
    pub speed_kt: f64,
    pub direction_from_deg: f64,
}

impl WindVector {
    pub fn new(speed_kt: f64, direction_from_deg: f64) -> Self {
        Self {
            speed_kt,
            direction_from_deg,
        }
    }

    pub fn calm() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.speed_kt.is_finite() || self.speed_kt < 0.0 {
            return Err(GlideError::input(
                "wind_speed_kt",
                format!("must be zero or positive, got {}", self.speed_kt),
            ));
        }
        if !self.direction_from_deg.is_finite()
            || !(0.0..=360.0).contains(&self.direction_from_deg)
        {
            return Err(GlideError::input(
                "wind_direction_deg",
                format!("must be within 0-360, got {}", self.direction_from_deg),
            ));
        }
        Ok(())
    }
}

// ========== LOCATIONS ==========

/// A candidate landing site as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingSite {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Ground elevation in feet MSL
    pub elevation_ft: f64,
    /// CUP style code, or one of the marker codes in `PlotRules`
    #[serde(default)]
    pub type_code: String,
    #[serde(default)]
    pub description: String,
}

impl LandingSite {
    /// A site entered by hand rather than picked from a waypoint file.
    pub fn user_defined(name: impl Into<String>, lat: f64, lon: f64, elevation_ft: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
            elevation_ft,
            type_code: USER_DEFINED_CODE.to_string(),
            description: USER_DEFINED_DESCRIPTION.to_string(),
        }
    }
}

pub const USER_DEFINED_CODE: &str = "A";
pub const USER_DEFINED_DESCRIPTION: &str = "User-defined location";

/// One landing site evaluated at one altitude band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterLocation {
    pub lat: f64,
    pub lon: f64,
    /// Altitude of the band being drawn, feet MSL
    pub band_altitude_ft: f64,
    pub wind: WindVector,
    /// Ground elevation plus the arrival height AGL
    pub arrival_altitude_msl_ft: f64,
    pub name: String,
    pub type_code: String,
    pub description: String,
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

// ========== RINGS & BOUNDARIES ==========

/// Glide range along one heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialSample {
    pub heading_deg: f64,
    /// May be zero or negative when the heading is unreachable
    pub range_nm: f64,
}

/// One location's reach boundary at one band, one point per heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub location_name: String,
    pub band_altitude_ft: f64,
    pub samples: Vec<RadialSample>,
    /// Open ring in heading order; the last point connects back to the first
    pub points: Vec<GeoPoint>,
}

/// One simple polygon from the union of a band's rings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedBoundary {
    /// Closed ring (first point repeated at the end)
    pub exterior: Vec<GeoPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<Vec<GeoPoint>>,
}

/// Why a ring was left out of a band's union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum RingDefect {
    #[error("fewer than 3 distinct vertices")]
    TooFewVertices,
    #[error("non-finite coordinate")]
    NonFinite,
    #[error("self-intersecting")]
    SelfIntersecting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRing {
    pub location_name: String,
    pub defect: RingDefect,
}

/// Altitude text placed on a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeLabel {
    pub lat: f64,
    pub lon: f64,
    pub altitude_ft: f64,
}

/// Everything drawn for one altitude band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandBoundary {
    pub altitude_ft: f64,
    /// Rings that went into the union
    pub ring_count: usize,
    pub parts: Vec<MergedBoundary>,
    pub labels: Vec<AltitudeLabel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRing>,
}

impl BandBoundary {
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

// ========== MAP OUTPUT ==========

/// Popup content for a landing site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMarker {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub type_code: String,
    /// Human-readable form of `type_code`
    pub style: String,
    pub description: String,
    pub arrival_altitude_msl_ft: f64,
    pub elevation_ft: f64,
}

impl LocationMarker {
    pub fn popup_text(&self) -> String {
        format!(
            "{}\nType: {}\nArrival Alt: {}ft\nLocation Alt: {}ft\nDescription: {}",
            self.name,
            self.style,
            self.arrival_altitude_msl_ft,
            self.elevation_ft,
            self.description
        )
    }
}

/// Input values echoed onto the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametersLegend {
    pub glider: String,
    pub glide_ratio: f64,
    pub glide_speed_kt: f64,
    pub safety_margin_pct: f64,
    pub wind_speed_kt: f64,
    pub wind_direction_deg: f64,
    pub arrival_altitude_agl_ft: f64,
}

impl ParametersLegend {
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            self.glider.clone(),
            format!("Max L/D: {} at: {} kts", self.glide_ratio, self.glide_speed_kt),
            format!("Safety Margin over best L/D: {}%", self.safety_margin_pct),
            format!(
                "Wind spd: {}kts at: {}degs",
                self.wind_speed_kt, self.wind_direction_deg
            ),
            format!("Arrival alt: {}ft AGL", self.arrival_altitude_agl_ft),
        ]
    }
}

/// Complete result of one plot request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapPlot {
    pub generated_at: DateTime<Utc>,
    pub center: GeoPoint,
    pub legend: ParametersLegend,
    pub markers: Vec<LocationMarker>,
    pub bands: Vec<BandBoundary>,
}

// ========== GLIDER CATALOG ==========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GliderProfile {
    pub make: String,
    pub model: String,
    pub glide_ratio: f64,
    /// Best-glide speed in knots
    pub vg: f64,
}

impl GliderProfile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

/// Look up a glider by its "make model" display name.
pub fn find_glider<'a>(catalog: &'a [GliderProfile], name: &str) -> Result<&'a GliderProfile> {
    catalog
        .iter()
        .find(|glider| glider.display_name() == name)
        .ok_or_else(|| GlideError::UnknownGlider(name.to_string()))
}

/// Sort a catalog alphabetically by display name.
pub fn sort_catalog(catalog: &mut [GliderProfile]) {
    catalog.sort_by_key(|glider| glider.display_name());
}

// ========== WAYPOINT HELPERS ==========

/// Map a SeeYou CUP style code to its name. Unknown codes are returned as-is.
pub fn waypoint_style_name(code: &str) -> &str {
    match code {
        "0" => "Unknown",
        "1" => "Waypoint",
        "2" => "Airfield - grass runway",
        "3" => "Outlanding",
        "4" => "Gliding Airfield",
        "5" => "Airfield - solid surface runway",
        "6" => "Mountain Pass",
        "7" => "Mountain Top",
        "8" => "Transmitter Mast",
        "9" => "VOR",
        "10" => "NDB",
        "11" => "Cooling Tower",
        "12" => "Dam",
        "13" => "Tunnel",
        "14" => "Bridge",
        "15" => "PowerPlant",
        "16" => "Castle",
        "17" => "Intersection",
        other => other,
    }
}

/// Parse a waypoint elevation such as `"1234ft"`, `"120m"` or `"850"` into feet.
pub fn parse_elevation_ft(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let (number, factor) = if let Some(feet) = trimmed.strip_suffix("ft") {
        (feet, 1.0)
    } else if let Some(meters) = trimmed.strip_suffix('m') {
        (meters, FEET_PER_METER)
    } else {
        (trimmed, 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| GlideError::InvalidElevation(text.to_string()))?;
    if !value.is_finite() {
        return Err(GlideError::InvalidElevation(text.to_string()));
    }
    Ok(value * factor)
}
