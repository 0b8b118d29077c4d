//! JSON plot request and its resolution into core input.

use anyhow::{bail, Context, Result};
use glide_core::{
    find_glider, parse_elevation_ft, GlideParameters, GliderProfile, LandingSite, PlotInput,
    RingSpacing, WindVector,
};
use serde::{Deserialize, Serialize};

/// Glider selection value meaning "use the custom figures".
const CUSTOM_GLIDER: &str = "other";

/// Elevation as either a bare number of feet or a waypoint string like `"120m"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Elevation {
    Feet(f64),
    Text(String),
}

impl Elevation {
    pub fn to_feet(&self) -> glide_core::Result<f64> {
        match self {
            Elevation::Feet(ft) => Ok(*ft),
            Elevation::Text(text) => parse_elevation_ft(text),
        }
    }
}

/// A waypoint picked from a waypoint list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteEntry {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub elevation: Elevation,
    #[serde(default)]
    pub type_code: String,
    #[serde(default)]
    pub description: String,
}

/// A hand-entered location. Rows with any field missing are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomLocation {
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub elevation_ft: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotRequest {
    /// Catalog glider as "make model", or "other" / absent for custom figures
    #[serde(default)]
    pub glider: Option<String>,
    #[serde(default)]
    pub glide_ratio: Option<f64>,
    #[serde(default)]
    pub vg: Option<f64>,
    /// Safety margin in percent
    pub safety_margin_pct: f64,
    #[serde(default)]
    pub wind_speed_kt: f64,
    #[serde(default)]
    pub wind_direction_deg: f64,
    pub arrival_altitude_agl_ft: f64,
    #[serde(default)]
    pub ring_spacing: Option<String>,
    #[serde(default)]
    pub sites: Vec<SiteEntry>,
    #[serde(default)]
    pub custom_locations: Vec<CustomLocation>,
}

impl PlotRequest {
    /// Resolve glider, spacing and sites into core input.
    pub fn resolve(
        &self,
        catalog: &[GliderProfile],
        spacing_override: Option<RingSpacing>,
    ) -> Result<PlotInput> {
        let (glider_name, glide_ratio, vg) = match self.glider.as_deref() {
            Some(name) if name != CUSTOM_GLIDER => {
                let glider = find_glider(catalog, name)?;
                (glider.display_name(), glider.glide_ratio, glider.vg)
            }
            _ => {
                let (Some(glide_ratio), Some(vg)) = (self.glide_ratio, self.vg) else {
                    bail!("custom glider needs both glide_ratio and vg");
                };
                ("Custom glider".to_string(), glide_ratio, vg)
            }
        };

        let ring_spacing = match (spacing_override, self.ring_spacing.as_deref()) {
            (Some(spacing), _) => spacing,
            (None, Some(text)) => text.parse()?,
            (None, None) => RingSpacing::default(),
        };

        let mut sites = Vec::with_capacity(self.sites.len() + self.custom_locations.len());
        for entry in &self.sites {
            let elevation_ft = entry
                .elevation
                .to_feet()
                .with_context(|| format!("site '{}'", entry.name))?;
            sites.push(LandingSite {
                name: entry.name.clone(),
                lat: entry.lat,
                lon: entry.lon,
                elevation_ft,
                type_code: entry.type_code.clone(),
                description: entry.description.clone(),
            });
        }
        for custom in &self.custom_locations {
            let (Some(name), Some(lat), Some(lon), Some(elevation_ft)) =
                (&custom.name, custom.lat, custom.lon, custom.elevation_ft)
            else {
                tracing::warn!(?custom, "Ignoring incomplete custom location");
                continue;
            };
            if name.is_empty() {
                tracing::warn!(?custom, "Ignoring unnamed custom location");
                continue;
            }
            sites.push(LandingSite::user_defined(name.clone(), lat, lon, elevation_ft));
        }

        Ok(PlotInput {
            glider_name,
            params: GlideParameters::new(glide_ratio, vg, self.safety_margin_pct / 100.0),
            wind: WindVector::new(self.wind_speed_kt, self.wind_direction_deg),
            arrival_altitude_agl_ft: self.arrival_altitude_agl_ft,
            ring_spacing,
            sites,
        })
    }
}
