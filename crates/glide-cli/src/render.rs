//! GeoJSON rendering of a computed plot.

use glide_core::{GeoPoint, MapPlot};
use serde_json::{json, Value};

fn position(point: &GeoPoint) -> Value {
    json!([point.lon, point.lat])
}

fn ring(points: &[GeoPoint]) -> Value {
    Value::Array(points.iter().map(position).collect())
}

/// Build a FeatureCollection: site markers, one polygon per boundary part, and altitude labels.
pub fn to_geojson(plot: &MapPlot) -> Value {
    let mut features = Vec::new();

    for marker in &plot.markers {
        features.push(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [marker.lon, marker.lat] },
            "properties": {
                "kind": "marker",
                "name": marker.name,
                "type_code": marker.type_code,
                "style": marker.style,
                "description": marker.description,
                "arrival_altitude_msl_ft": marker.arrival_altitude_msl_ft,
                "elevation_ft": marker.elevation_ft,
                "popup": marker.popup_text(),
            }
        }));
    }

    for band in &plot.bands {
        for part in &band.parts {
            let mut rings = vec![ring(&part.exterior)];
            rings.extend(part.holes.iter().map(|hole| ring(hole)));
            features.push(json!({
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": rings },
                "properties": {
                    "kind": "boundary",
                    "altitude_ft": band.altitude_ft,
                }
            }));
        }
        for label in &band.labels {
            features.push(json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [label.lon, label.lat] },
                "properties": {
                    "kind": "label",
                    "altitude_ft": label.altitude_ft,
                    "text": format!("{} ft", label.altitude_ft),
                }
            }));
        }
    }

    json!({
        "type": "FeatureCollection",
        "features": features,
        "properties": {
            "generated_at": plot.generated_at.to_rfc3339(),
            "center": [plot.center.lon, plot.center.lat],
            "legend": plot.legend.summary_lines(),
        }
    })
}
