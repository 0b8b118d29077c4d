//! Glide-range geometry engine.
//!
//! Turns landing sites, altitude bands, wind and glider performance into
//! per-band reach boundaries:
//! - `glide`: range along one heading under a constant wind
//! - `sampler`: 36 headings projected into a ring around each site
//! - `merge`: union of the rings of one band into boundary parts
//! - `plot`: the full pipeline plus markers, labels and legend

pub mod bands;
pub mod error;
pub mod glide;
pub mod merge;
pub mod models;
pub mod plot;
pub mod rules;
pub mod sampler;
pub mod spatial;

pub use bands::{altitude_bands, expand_locations, is_eligible, RingSpacing};
pub use error::{GlideError, Result};
pub use glide::{glide_range, margin_factor, winded_glide_ratio};
pub use merge::merge_band;
pub use models::{
    find_glider, parse_elevation_ft, waypoint_style_name, AltitudeLabel, BandBoundary,
    CenterLocation, GeoPoint, GlideParameters, GliderProfile, LandingSite, LocationMarker,
    MapPlot, MergedBoundary, ParametersLegend, RadialSample, Ring, WindVector,
};
pub use plot::{build_plot, PlotInput};
pub use rules::PlotRules;
pub use sampler::sample_ring;
pub use spatial::{destination_point, haversine_distance_nm};
