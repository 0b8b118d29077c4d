//! Wind-corrected glide range along a single heading.
//!
//! The wind model is a straight cosine projection of a constant wind onto the
//! heading. The along-heading component is subtracted from the glide speed, so
//! a tailwind shrinks the range toward that point and a headwind grows it.

use crate::models::{GlideParameters, WindVector};

/// Knots to feet per second.
pub const KNOTS_TO_FPS: f64 = 1.68781;
/// Feet in one nautical mile.
pub const FEET_PER_NM: f64 = 6076.12;
/// Floor on `1 - safety_margin` so the derated ratio never reaches zero.
pub const MIN_MARGIN_FACTOR: f64 = 0.01;

/// Multiplier applied to the still-air glide ratio for a given safety margin.
pub fn margin_factor(safety_margin: f64) -> f64 {
    (1.0 - safety_margin).max(MIN_MARGIN_FACTOR)
}

/// Wind component along `heading_deg` in feet per second.
/// Positive is a tailwind, negative a headwind.
pub fn effective_wind_fps(wind: &WindVector, heading_deg: f64) -> f64 {
    let wind_fps = wind.speed_kt * KNOTS_TO_FPS;
    let blowing_toward = (wind.direction_from_deg + 180.0).rem_euclid(360.0);
    let angle_diff = (blowing_toward - heading_deg).to_radians();
    wind_fps * angle_diff.cos()
}

/// Derated glide ratio along `heading_deg`.
///
/// `params.glide_speed_kt` must be non-zero; callers validate it first.
pub fn winded_glide_ratio(params: &GlideParameters, wind: &WindVector, heading_deg: f64) -> f64 {
    let vg_fps = params.glide_speed_kt * KNOTS_TO_FPS;
    let vw_fps = effective_wind_fps(wind, heading_deg);
    ((vg_fps - vw_fps) / vg_fps) * params.glide_ratio * margin_factor(params.safety_margin)
}

/// Horizontal distance in nautical miles reachable along `heading_deg` when
/// descending from `altitude_ft` to `arrival_altitude_ft`.
///
/// No clamping is applied: an altitude below the arrival altitude, or a strong
/// enough tailwind, yields zero or negative range.
pub fn glide_range(
    altitude_ft: f64,
    arrival_altitude_ft: f64,
    params: &GlideParameters,
    wind: &WindVector,
    heading_deg: f64,
) -> f64 {
    let initial_altitude_ft = altitude_ft - arrival_altitude_ft;
    let range_ft = initial_altitude_ft * winded_glide_ratio(params, wind, heading_deg);
    range_ft / FEET_PER_NM
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> GlideParameters {
        GlideParameters::new(40.0, 60.0, 0.2)
    }

    #[test]
    fn calm_air_range_matches_hand_calculation() {
        let calm = WindVector::calm();
        let expected = 5000.0 * 32.0 / FEET_PER_NM;
        for heading in (0..360).step_by(10) {
            let range = glide_range(5000.0, 0.0, &params(), &calm, heading as f64);
            assert!((range - expected).abs() < 1e-9, "heading {heading}: {range}");
        }
        assert!((expected - 26.33).abs() < 0.01);
    }

    #[test]
    fn headwind_from_north_extends_northbound_ratio() {
        let wind = WindVector::new(20.0, 0.0);
        let ratio = winded_glide_ratio(&params(), &wind, 0.0);
        assert!((ratio - 80.0 / 60.0 * 32.0).abs() < 1e-9);
        assert!(ratio > 40.0 * margin_factor(0.2));

        let calm_range = glide_range(5000.0, 0.0, &params(), &WindVector::calm(), 0.0);
        let range = glide_range(5000.0, 0.0, &params(), &wind, 0.0);
        assert!(range > calm_range);
    }

    #[test]
    fn tailwind_shrinks_ratio() {
        let wind = WindVector::new(20.0, 0.0);
        let ratio = winded_glide_ratio(&params(), &wind, 180.0);
        assert!(ratio < 40.0 * margin_factor(0.2));
        assert!((ratio - 40.0 / 60.0 * 32.0).abs() < 1e-9);
    }

    #[test]
    fn crosswind_has_no_effect() {
        let wind = WindVector::new(25.0, 90.0);
        let ratio = winded_glide_ratio(&params(), &wind, 0.0);
        assert!((ratio - 32.0).abs() < 1e-9);
    }

    #[test]
    fn range_is_linear_in_altitude() {
        let wind = WindVector::new(15.0, 250.0);
        for heading in [0.0, 45.0, 170.0, 300.0] {
            let single = glide_range(3000.0, 0.0, &params(), &wind, heading);
            let double = glide_range(6000.0, 0.0, &params(), &wind, heading);
            assert!((double - 2.0 * single).abs() < 1e-9);
        }
    }

    #[test]
    fn margin_factor_is_floored() {
        assert!((margin_factor(0.2) - 0.8).abs() < 1e-12);
        assert_eq!(margin_factor(0.995), MIN_MARGIN_FACTOR);
        assert_eq!(margin_factor(1.5), MIN_MARGIN_FACTOR);
    }

    #[test]
    fn below_arrival_altitude_gives_negative_range() {
        let range = glide_range(1000.0, 1500.0, &params(), &WindVector::calm(), 0.0);
        assert!(range < 0.0);
    }

    #[test]
    fn strong_tailwind_can_drive_range_negative() {
        let wind = WindVector::new(90.0, 180.0);
        let range = glide_range(5000.0, 0.0, &params(), &wind, 0.0);
        assert!(range < 0.0);
    }
}
