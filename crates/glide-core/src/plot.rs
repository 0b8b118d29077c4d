//! End-to-end plot pipeline: bands, rings, union, markers.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::bands::{bands_for_rules, expand_locations, is_eligible, RingSpacing};
use crate::error::{GlideError, Result};
use crate::merge::merge_band;
use crate::models::{
    waypoint_style_name, BandBoundary, CenterLocation, GeoPoint, GlideParameters, LandingSite,
    LocationMarker, MapPlot, ParametersLegend, WindVector,
};
use crate::rules::PlotRules;
use crate::sampler::sample_ring;

/// Well-typed input for one map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotInput {
    /// Display name of the aircraft, for the legend
    pub glider_name: String,
    pub params: GlideParameters,
    pub wind: WindVector,
    pub arrival_altitude_agl_ft: f64,
    #[serde(default)]
    pub ring_spacing: RingSpacing,
    pub sites: Vec<LandingSite>,
}

impl PlotInput {
    /// Fail fast on anything the pipeline cannot compute with.
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        self.wind.validate()?;
        if !self.arrival_altitude_agl_ft.is_finite() {
            return Err(GlideError::input(
                "arrival_altitude_agl_ft",
                format!("must be a number, got {}", self.arrival_altitude_agl_ft),
            ));
        }
        if self.sites.is_empty() {
            return Err(GlideError::NoLocations);
        }
        for site in &self.sites {
            validate_site(site)?;
        }
        Ok(())
    }

    pub fn legend(&self) -> ParametersLegend {
        ParametersLegend {
            glider: self.glider_name.clone(),
            glide_ratio: self.params.glide_ratio,
            glide_speed_kt: self.params.glide_speed_kt,
            safety_margin_pct: self.params.safety_margin * 100.0,
            wind_speed_kt: self.wind.speed_kt,
            wind_direction_deg: self.wind.direction_from_deg,
            arrival_altitude_agl_ft: self.arrival_altitude_agl_ft,
        }
    }
}

fn validate_site(site: &LandingSite) -> Result<()> {
    let problem = if !site.lat.is_finite() || !(-90.0..=90.0).contains(&site.lat) {
        Some(format!("latitude {} out of range", site.lat))
    } else if !site.lon.is_finite() || !(-180.0..=180.0).contains(&site.lon) {
        Some(format!("longitude {} out of range", site.lon))
    } else if !site.elevation_ft.is_finite() {
        Some(format!("elevation {} is not a number", site.elevation_ft))
    } else {
        None
    };

    match problem {
        Some(message) => Err(GlideError::InvalidLocation {
            name: site.name.clone(),
            message,
        }),
        None => Ok(()),
    }
}

/// Mean position of all center locations.
pub fn map_center(locations: &[CenterLocation]) -> Result<GeoPoint> {
    if locations.is_empty() {
        return Err(GlideError::NoLocations);
    }
    let count = locations.len() as f64;
    let (lat_sum, lon_sum) = locations
        .iter()
        .fold((0.0, 0.0), |(lat, lon), loc| (lat + loc.lat, lon + loc.lon));
    Ok(GeoPoint::new(lat_sum / count, lon_sum / count))
}

/// One marker per distinct site, in first-seen order.
pub fn build_markers(
    locations: &[CenterLocation],
    arrival_altitude_agl_ft: f64,
) -> Vec<LocationMarker> {
    let mut markers: Vec<LocationMarker> = Vec::new();
    for loc in locations {
        let seen = markers
            .iter()
            .any(|m| m.name == loc.name && m.lat == loc.lat && m.lon == loc.lon);
        if seen {
            continue;
        }
        markers.push(LocationMarker {
            name: loc.name.clone(),
            lat: loc.lat,
            lon: loc.lon,
            type_code: loc.type_code.clone(),
            style: waypoint_style_name(&loc.type_code).to_string(),
            description: loc.description.clone(),
            arrival_altitude_msl_ft: loc.arrival_altitude_msl_ft,
            elevation_ft: loc.arrival_altitude_msl_ft - arrival_altitude_agl_ft,
        });
    }
    markers
}

/// Rings for every eligible location at one band, then their union.
pub fn plot_band(
    band_altitude_ft: f64,
    locations: &[CenterLocation],
    params: &GlideParameters,
    rules: &PlotRules,
) -> BandBoundary {
    let rings: Vec<_> = locations
        .iter()
        .filter(|loc| loc.band_altitude_ft == band_altitude_ft)
        .filter(|loc| is_eligible(loc, band_altitude_ft, rules))
        .map(|loc| sample_ring(loc, params))
        .collect();

    merge_band(band_altitude_ft, &rings, &rules.label_bearings_deg)
}

/// Compute every band boundary and marker for one map.
pub fn build_plot(input: &PlotInput, rules: &PlotRules) -> Result<MapPlot> {
    input.validate()?;

    let bands = bands_for_rules(rules, input.ring_spacing)?;
    let locations = expand_locations(
        &input.sites,
        &bands,
        input.wind,
        input.arrival_altitude_agl_ft,
    );
    let center = map_center(&locations)?;
    let markers = build_markers(&locations, input.arrival_altitude_agl_ft);

    tracing::info!(
        sites = input.sites.len(),
        bands = bands.len(),
        "Building glide range plot"
    );

    let boundaries = bands
        .iter()
        .map(|&band| plot_band(band, &locations, &input.params, rules))
        .collect();

    Ok(MapPlot {
        generated_at: Utc::now(),
        center,
        legend: input.legend(),
        markers,
        bands: boundaries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> PlotInput {
        PlotInput {
            glider_name: "Schleicher ASK 21".into(),
            params: GlideParameters::new(34.0, 49.0, 0.2),
            wind: WindVector::new(10.0, 270.0),
            arrival_altitude_agl_ft: 1000.0,
            ring_spacing: RingSpacing::EvenThousands,
            sites: vec![
                LandingSite {
                    name: "Sterling".into(),
                    lat: 42.4259,
                    lon: -71.7929,
                    elevation_ft: 459.0,
                    type_code: "4".into(),
                    description: "Home field".into(),
                },
                LandingSite {
                    name: "Wachusett".into(),
                    lat: 42.4887,
                    lon: -71.8868,
                    elevation_ft: 2006.0,
                    type_code: "T".into(),
                    description: "Summit".into(),
                },
            ],
        }
    }

    #[test]
    fn zero_glide_speed_fails_before_any_ring() {
        let mut bad = input();
        bad.params.glide_speed_kt = 0.0;
        let err = build_plot(&bad, &PlotRules::default()).unwrap_err();
        assert!(matches!(
            err,
            GlideError::InvalidInput {
                field: "glide_speed_kt",
                ..
            }
        ));
    }

    #[test]
    fn out_of_range_site_names_the_location() {
        let mut bad = input();
        bad.sites[1].lat = 123.0;
        let err = bad.validate().unwrap_err();
        match err {
            GlideError::InvalidLocation { name, .. } => assert_eq!(name, "Wachusett"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn no_sites_is_an_error() {
        let mut empty = input();
        empty.sites.clear();
        assert_eq!(empty.validate(), Err(GlideError::NoLocations));
    }

    #[test]
    fn turnpoint_gets_marker_but_no_ring() {
        let plot = build_plot(&input(), &PlotRules::default()).unwrap();
        assert_eq!(plot.markers.len(), 2);
        assert_eq!(plot.markers[0].style, "Gliding Airfield");
        assert_eq!(plot.markers[0].elevation_ft, 459.0);
        assert_eq!(plot.markers[1].arrival_altitude_msl_ft, 3006.0);

        assert_eq!(plot.bands.len(), 4);
        for band in &plot.bands {
            assert!(band.ring_count <= 1, "band {}", band.altitude_ft);
        }
    }

    #[test]
    fn band_below_arrival_altitude_draws_nothing() {
        let mut high = input();
        high.sites[0].elevation_ft = 2500.0;
        let plot = build_plot(&high, &PlotRules::default()).unwrap();
        // Arrival is 3500ft MSL, so the 2000ft band is empty.
        assert!(plot.bands[0].is_empty());
        assert_eq!(plot.bands[0].altitude_ft, 2000.0);
        assert!(!plot.bands[1].is_empty());
    }

    #[test]
    fn center_is_mean_of_locations() {
        let plot = build_plot(&input(), &PlotRules::default()).unwrap();
        assert!((plot.center.lat - (42.4259 + 42.4887) / 2.0).abs() < 1e-9);
        assert!((plot.center.lon - (-71.7929 - 71.8868) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn legend_reports_margin_as_percent() {
        let legend = input().legend();
        assert!((legend.safety_margin_pct - 20.0).abs() < 1e-9);
        assert_eq!(legend.summary_lines()[0], "Schleicher ASK 21");
    }
}
