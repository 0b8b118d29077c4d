//! Radial sampling of glide range around a center location.

use crate::glide::glide_range;
use crate::models::{CenterLocation, GeoPoint, GlideParameters, RadialSample, Ring};
use crate::spatial::destination_point;

/// Spacing between sampled headings in degrees.
pub const HEADING_STEP_DEG: u32 = 10;
/// Number of headings per ring.
pub const SAMPLES_PER_RING: usize = (360 / HEADING_STEP_DEG) as usize;

/// Headings 0, 10, ..., 350 in ascending order.
pub fn sample_headings() -> impl Iterator<Item = f64> {
    (0..360u32).step_by(HEADING_STEP_DEG as usize).map(f64::from)
}

/// Glide range for every sampled heading around `location`.
pub fn radial_samples(location: &CenterLocation, params: &GlideParameters) -> Vec<RadialSample> {
    sample_headings()
        .map(|heading_deg| RadialSample {
            heading_deg,
            range_nm: glide_range(
                location.band_altitude_ft,
                location.arrival_altitude_msl_ft,
                params,
                &location.wind,
                heading_deg,
            ),
        })
        .collect()
}

/// Project a sample from the center. Unreachable headings collapse onto the center.
pub fn project_sample(center: &GeoPoint, sample: &RadialSample) -> GeoPoint {
    let distance_nm = sample.range_nm.max(0.0);
    destination_point(center.lat, center.lon, distance_nm, sample.heading_deg)
}

/// Build the reach ring of one location at its band altitude.
pub fn sample_ring(location: &CenterLocation, params: &GlideParameters) -> Ring {
    let center = GeoPoint::new(location.lat, location.lon);
    let samples = radial_samples(location, params);
    let points = samples
        .iter()
        .map(|sample| project_sample(&center, sample))
        .collect();

    Ring {
        location_name: location.name.clone(),
        band_altitude_ft: location.band_altitude_ft,
        samples,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WindVector;
    use crate::spatial::haversine_distance_nm;

    fn location(band_altitude_ft: f64, wind: WindVector) -> CenterLocation {
        CenterLocation {
            lat: 42.4259,
            lon: -71.7929,
            band_altitude_ft,
            wind,
            arrival_altitude_msl_ft: 0.0,
            name: "Sterling".into(),
            type_code: "4".into(),
            description: String::new(),
        }
    }

    #[test]
    fn ring_has_36_ascending_headings() {
        let ring = sample_ring(
            &location(5000.0, WindVector::new(12.0, 230.0)),
            &GlideParameters::new(40.0, 60.0, 0.2),
        );
        assert_eq!(ring.samples.len(), SAMPLES_PER_RING);
        assert_eq!(ring.points.len(), SAMPLES_PER_RING);
        for (i, sample) in ring.samples.iter().enumerate() {
            assert_eq!(sample.heading_deg, (i * 10) as f64);
        }
    }

    #[test]
    fn calm_ring_is_a_circle() {
        let loc = location(5000.0, WindVector::calm());
        let ring = sample_ring(&loc, &GlideParameters::new(40.0, 60.0, 0.2));
        let expected = 5000.0 * 32.0 / 6076.12;
        for point in &ring.points {
            let d = haversine_distance_nm(loc.lat, loc.lon, point.lat, point.lon);
            assert!((d - expected).abs() < 1e-6, "got {d}");
        }
    }

    #[test]
    fn unreachable_headings_collapse_to_center() {
        let loc = location(5000.0, WindVector::new(90.0, 180.0));
        let ring = sample_ring(&loc, &GlideParameters::new(40.0, 60.0, 0.2));
        // Heading 0 has a 90kt tailwind against a 60kt glide speed.
        assert!(ring.samples[0].range_nm < 0.0);
        assert_eq!(ring.points[0], GeoPoint::new(loc.lat, loc.lon));
        // Heading 180 flies into the wind and still reaches out.
        assert!(ring.samples[18].range_nm > 0.0);
    }
}
