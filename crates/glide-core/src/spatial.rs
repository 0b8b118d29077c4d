//! Great-circle projection and local planar helpers.

use crate::models::GeoPoint;

/// Mean Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.069;

/// Great-circle distance between two points in nautical miles (Haversine formula).
pub fn haversine_distance_nm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_NM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Initial bearing from point 1 to point 2 in degrees, normalised to [0, 360).
pub fn bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    x.atan2(y).to_degrees().rem_euclid(360.0)
}

/// Project a point `distance_nm` along `bearing_deg` on a spherical Earth.
///
/// # Arguments
/// * `lat`, `lon` - Starting position in degrees
/// * `distance_nm` - Distance in nautical miles
/// * `bearing_deg` - True bearing in degrees (0 = north, 90 = east)
///
/// Longitude is not wrapped, so rings near the antimeridian stay contiguous.
pub fn destination_point(lat: f64, lon: f64, distance_nm: f64, bearing_deg: f64) -> GeoPoint {
    if distance_nm.abs() <= f64::EPSILON {
        return GeoPoint::new(lat, lon);
    }

    let lat1 = lat.to_radians();
    let lon1 = lon.to_radians();
    let bearing_rad = bearing_deg.to_radians();
    let angular_distance = distance_nm / EARTH_RADIUS_NM;

    let sin_lat1 = lat1.sin();
    let cos_lat1 = lat1.cos();
    let sin_ad = angular_distance.sin();
    let cos_ad = angular_distance.cos();

    let sin_lat2 = sin_lat1 * cos_ad + cos_lat1 * sin_ad * bearing_rad.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();

    let y = bearing_rad.sin() * sin_ad * cos_lat1;
    let x = cos_ad - sin_lat1 * lat2.sin();
    let lon2 = lon1 + y.atan2(x);

    GeoPoint::new(lat2.to_degrees(), lon2.to_degrees())
}

// ==== Local planar approximation ====
// Used to test ring shape in metres rather than degrees.

/// Meters per degree of latitude at a given latitude (WGS84 approximation).
pub fn meters_per_deg_lat(lat_deg: f64) -> f64 {
    let lat_rad = lat_deg.to_radians();
    111_132.954 - 559.822 * (2.0 * lat_rad).cos() + 1.175 * (4.0 * lat_rad).cos()
        - 0.0023 * (6.0 * lat_rad).cos()
}

/// Meters per degree of longitude at a given latitude (WGS84 approximation).
pub fn meters_per_deg_lon(lat_deg: f64) -> f64 {
    let lat_rad = lat_deg.to_radians();
    111_412.84 * lat_rad.cos() - 93.5 * (3.0 * lat_rad).cos() + 0.118 * (5.0 * lat_rad).cos()
}

/// Convert `point` to east/north metres relative to `origin`.
pub fn to_local_xy(point: &GeoPoint, origin: &GeoPoint) -> (f64, f64) {
    (
        (point.lon - origin.lon) * meters_per_deg_lon(origin.lat),
        (point.lat - origin.lat) * meters_per_deg_lat(origin.lat),
    )
}

pub(crate) fn segments_intersect_2d(
    a1: (f64, f64),
    a2: (f64, f64),
    b1: (f64, f64),
    b2: (f64, f64),
) -> bool {
    // Epsilon in meters, absorbs projection and arithmetic error.
    const EPS_M: f64 = 1e-6;

    fn orient(p: (f64, f64), q: (f64, f64), r: (f64, f64)) -> f64 {
        (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0)
    }

    fn within(a: f64, b: f64, value: f64) -> bool {
        let min = a.min(b) - EPS_M;
        let max = a.max(b) + EPS_M;
        value >= min && value <= max
    }

    fn on_segment(p: (f64, f64), q: (f64, f64), r: (f64, f64)) -> bool {
        within(p.0, q.0, r.0) && within(p.1, q.1, r.1)
    }

    let o1 = orient(a1, a2, b1);
    let o2 = orient(a1, a2, b2);
    let o3 = orient(b1, b2, a1);
    let o4 = orient(b1, b2, a2);

    if o1.abs() <= EPS_M && on_segment(a1, a2, b1) {
        return true;
    }
    if o2.abs() <= EPS_M && on_segment(a1, a2, b2) {
        return true;
    }
    if o3.abs() <= EPS_M && on_segment(b1, b2, a1) {
        return true;
    }
    if o4.abs() <= EPS_M && on_segment(b1, b2, a2) {
        return true;
    }

    let a_crosses = (o1 > EPS_M && o2 < -EPS_M) || (o1 < -EPS_M && o2 > EPS_M);
    let b_crosses = (o3 > EPS_M && o4 < -EPS_M) || (o3 < -EPS_M && o4 > EPS_M);
    a_crosses && b_crosses
}

/// True when any two non-adjacent edges of the closed ring touch or cross.
///
/// `points` is an open ring; the closing edge from last to first is implied.
pub fn ring_self_intersects(points: &[GeoPoint]) -> bool {
    let n = points.len();
    if n < 4 {
        return false;
    }
    let origin = points[0];
    let xy: Vec<(f64, f64)> = points.iter().map(|p| to_local_xy(p, &origin)).collect();

    for i in 0..n {
        let (a1, a2) = (xy[i], xy[(i + 1) % n]);
        for j in (i + 2)..n {
            // Edge n-1 shares a vertex with edge 0.
            if i == 0 && j == n - 1 {
                continue;
            }
            let (b1, b2) = (xy[j], xy[(j + 1) % n]);
            if segments_intersect_2d(a1, a2, b1, b2) {
                return true;
            }
        }
    }
    false
}
