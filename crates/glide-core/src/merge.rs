//! Union of per-location reach rings into one boundary set per altitude band.
//!
//! Rings are screened before the union: a ring that collapses, carries a
//! non-finite coordinate or crosses itself is skipped and reported rather than
//! handed to the boolean operation. Geometry runs in planar lon/lat space.

use geo::{Area, BooleanOps, Centroid, Coord, LineString, MultiPolygon, Polygon};

use crate::models::{
    AltitudeLabel, BandBoundary, GeoPoint, MergedBoundary, Ring, RingDefect, SkippedRing,
};
use crate::spatial::{bearing_deg, ring_self_intersects};

/// Vertex spacing below which two ring points are treated as one (degrees).
const DUPLICATE_EPS_DEG: f64 = 1e-12;

/// Clean up a ring and check it can form a simple polygon.
///
/// Consecutive duplicates (including last-to-first) are dropped, which removes
/// the repeated center points of a run of unreachable headings.
pub fn prepare_ring(points: &[GeoPoint]) -> Result<Vec<GeoPoint>, RingDefect> {
    if points.iter().any(|p| !p.is_finite()) {
        return Err(RingDefect::NonFinite);
    }

    let mut cleaned: Vec<GeoPoint> = Vec::with_capacity(points.len());
    for point in points {
        if cleaned.last().is_some_and(|last| same_point(last, point)) {
            continue;
        }
        cleaned.push(*point);
    }
    while cleaned.len() > 1 && same_point(&cleaned[0], &cleaned[cleaned.len() - 1]) {
        cleaned.pop();
    }

    if cleaned.len() < 3 {
        return Err(RingDefect::TooFewVertices);
    }
    if ring_self_intersects(&cleaned) {
        return Err(RingDefect::SelfIntersecting);
    }
    Ok(cleaned)
}

fn same_point(a: &GeoPoint, b: &GeoPoint) -> bool {
    (a.lat - b.lat).abs() <= DUPLICATE_EPS_DEG && (a.lon - b.lon).abs() <= DUPLICATE_EPS_DEG
}

fn to_polygon(points: &[GeoPoint]) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = points
        .iter()
        .map(|p| Coord { x: p.lon, y: p.lat })
        .collect();
    Polygon::new(LineString::new(coords), Vec::new())
}

fn to_points(line: &LineString<f64>) -> Vec<GeoPoint> {
    line.coords().map(|c| GeoPoint::new(c.y, c.x)).collect()
}

/// Union all polygons. A single polygon is returned as built.
pub fn union_polygons(polygons: Vec<Polygon<f64>>) -> MultiPolygon<f64> {
    let mut iter = polygons.into_iter();
    let Some(first) = iter.next() else {
        return MultiPolygon::new(Vec::new());
    };
    iter.fold(MultiPolygon::new(vec![first]), |acc, polygon| {
        acc.union(&MultiPolygon::new(vec![polygon]))
    })
}

/// Merge the rings of one band and place its altitude labels.
pub fn merge_band(altitude_ft: f64, rings: &[Ring], label_bearings_deg: &[f64]) -> BandBoundary {
    let mut skipped = Vec::new();
    let mut polygons = Vec::with_capacity(rings.len());

    for ring in rings {
        match prepare_ring(&ring.points) {
            Ok(points) => polygons.push(to_polygon(&points)),
            Err(defect) => {
                tracing::warn!(
                    altitude_ft,
                    location = %ring.location_name,
                    %defect,
                    "Skipping glide ring"
                );
                skipped.push(SkippedRing {
                    location_name: ring.location_name.clone(),
                    defect,
                });
            }
        }
    }

    let ring_count = polygons.len();
    let merged = union_polygons(polygons);

    let mut parts = Vec::with_capacity(merged.0.len());
    let mut labels = Vec::new();
    for polygon in &merged.0 {
        if polygon.exterior().0.len() < 4 || polygon.unsigned_area() <= 0.0 {
            tracing::warn!(altitude_ft, "Discarding degenerate boundary part");
            continue;
        }
        labels.extend(place_labels(polygon, altitude_ft, label_bearings_deg));
        parts.push(MergedBoundary {
            exterior: to_points(polygon.exterior()),
            holes: polygon.interiors().iter().map(to_points).collect(),
        });
    }

    tracing::debug!(
        altitude_ft,
        rings = ring_count,
        parts = parts.len(),
        skipped = skipped.len(),
        "Merged band"
    );

    BandBoundary {
        altitude_ft,
        ring_count,
        parts,
        labels,
        skipped,
    }
}

fn angular_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// One label per bearing, on the exterior vertex that best matches it as seen
/// from the polygon centroid.
fn place_labels(
    polygon: &Polygon<f64>,
    altitude_ft: f64,
    bearings_deg: &[f64],
) -> Vec<AltitudeLabel> {
    let Some(centroid) = polygon.centroid() else {
        return Vec::new();
    };
    let exterior = &polygon.exterior().0;
    // Skip the closing coordinate.
    let vertices = &exterior[..exterior.len().saturating_sub(1)];

    let mut labels: Vec<AltitudeLabel> = Vec::with_capacity(bearings_deg.len());
    for &target in bearings_deg {
        let best = vertices.iter().min_by(|a, b| {
            let da = angular_difference(bearing_deg(centroid.y(), centroid.x(), a.y, a.x), target);
            let db = angular_difference(bearing_deg(centroid.y(), centroid.x(), b.y, b.x), target);
            da.total_cmp(&db)
        });
        let Some(vertex) = best else {
            continue;
        };
        let label = AltitudeLabel {
            lat: vertex.y,
            lon: vertex.x,
            altitude_ft,
        };
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CenterLocation, GlideParameters, WindVector};
    use crate::sampler::sample_ring;

    const LABELS: [f64; 4] = [10.0, 100.0, 190.0, 280.0];

    fn calm_ring(name: &str, lat: f64, lon: f64) -> Ring {
        let location = CenterLocation {
            lat,
            lon,
            band_altitude_ft: 5000.0,
            wind: WindVector::calm(),
            arrival_altitude_msl_ft: 0.0,
            name: name.into(),
            type_code: "4".into(),
            description: String::new(),
        };
        sample_ring(&location, &GlideParameters::new(40.0, 60.0, 0.2))
    }

    fn area(part: &MergedBoundary) -> f64 {
        to_polygon(&part.exterior).unsigned_area()
    }

    #[test]
    fn empty_band_has_no_parts() {
        let band = merge_band(3000.0, &[], &LABELS);
        assert!(band.is_empty());
        assert_eq!(band.ring_count, 0);
        assert!(band.labels.is_empty());
    }

    #[test]
    fn single_ring_is_unchanged() {
        let ring = calm_ring("Solo", 42.0, -71.0);
        let band = merge_band(5000.0, std::slice::from_ref(&ring), &LABELS);
        assert_eq!(band.parts.len(), 1);

        let exterior = &band.parts[0].exterior;
        assert_eq!(exterior.len(), ring.points.len() + 1);
        assert_eq!(exterior.first(), exterior.last());
        for point in &ring.points {
            assert!(exterior.contains(point));
        }
    }

    #[test]
    fn disjoint_rings_stay_separate() {
        let rings = vec![calm_ring("West", 42.0, -73.0), calm_ring("East", 42.0, -71.0)];
        let band = merge_band(5000.0, &rings, &LABELS);
        assert_eq!(band.ring_count, 2);
        assert_eq!(band.parts.len(), 2);
    }

    #[test]
    fn overlapping_rings_merge_into_one_smaller_part() {
        let a = calm_ring("A", 42.0, -71.0);
        let b = calm_ring("B", 42.0, -70.7);
        let sum = to_polygon(&a.points).unsigned_area() + to_polygon(&b.points).unsigned_area();

        let band = merge_band(5000.0, &[a, b], &LABELS);
        assert_eq!(band.parts.len(), 1);
        assert!(area(&band.parts[0]) < sum);
        assert!(band.parts[0].holes.is_empty());
    }

    #[test]
    fn self_intersecting_ring_is_skipped() {
        let mut twisted = calm_ring("Twisted", 42.0, -71.0);
        twisted.points.swap(3, 20);
        let good = calm_ring("Good", 42.0, -73.0);

        let band = merge_band(5000.0, &[twisted, good], &LABELS);
        assert_eq!(band.parts.len(), 1);
        assert_eq!(band.skipped.len(), 1);
        assert_eq!(band.skipped[0].location_name, "Twisted");
        assert_eq!(band.skipped[0].defect, RingDefect::SelfIntersecting);
    }

    #[test]
    fn collapsed_and_non_finite_rings_are_rejected() {
        let center = GeoPoint::new(42.0, -71.0);
        assert_eq!(prepare_ring(&[center; 36]), Err(RingDefect::TooFewVertices));

        let mut ring = calm_ring("Broken", 42.0, -71.0);
        ring.points[5].lat = f64::NAN;
        assert_eq!(prepare_ring(&ring.points), Err(RingDefect::NonFinite));
    }

    #[test]
    fn consecutive_center_points_are_collapsed() {
        let mut ring = calm_ring("Partial", 42.0, -71.0);
        let center = GeoPoint::new(42.0, -71.0);
        for point in &mut ring.points[0..4] {
            *point = center;
        }
        let cleaned = prepare_ring(&ring.points).unwrap();
        assert_eq!(cleaned.len(), 33);
    }

    #[test]
    fn circle_gets_one_label_per_bearing() {
        let ring = calm_ring("Solo", 42.0, -71.0);
        let band = merge_band(5000.0, &[ring], &LABELS);
        assert_eq!(band.labels.len(), 4);
        assert!(band.labels.iter().all(|label| label.altitude_ft == 5000.0));

        let centroid = to_polygon(&band.parts[0].exterior).centroid().unwrap();
        let first = band.labels[0];
        let north_east = bearing_deg(centroid.y(), centroid.x(), first.lat, first.lon);
        assert!(angular_difference(north_east, 10.0) <= 6.0, "got {north_east}");
    }
}
