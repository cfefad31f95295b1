use geojson::{Feature, GeoJson, Geometry};
use serde_json::Value;

use crate::{polyline, LonLat, RouteError};

/// Turns whatever the user pasted into an ordered list of points. Structured input can be a
/// Feature, FeatureCollection, LineString, MultiLineString, or a bare list of positions. Anything
/// that isn't JSON is treated as a polyline6 string.
pub fn extract_points(input: &str) -> Result<Vec<LonLat>, RouteError> {
    match serde_json::from_str::<Value>(input) {
        // Some polylines happen to be valid JSON literals, like "true"
        Ok(value @ (Value::Object(_) | Value::Array(_))) => extract_json(value),
        _ => polyline::decode(input.trim()),
    }
}

pub fn extract_json(value: Value) -> Result<Vec<LonLat>, RouteError> {
    if let Value::Array(_) = value {
        let raw: Vec<Vec<f64>> = serde_json::from_value(value).map_err(|err| {
            RouteError::InvalidRouteFormat(format!("bare list of positions: {err}"))
        })?;
        return positions(&raw);
    }

    let kind = match value.get("type").and_then(Value::as_str) {
        Some(kind) => kind.to_string(),
        None => {
            return Err(RouteError::UnsupportedGeometry(
                "no \"type\" field".to_string(),
            ))
        }
    };
    match kind.as_str() {
        "Feature" | "FeatureCollection" | "LineString" | "MultiLineString" => {
            let gj = GeoJson::from_json_value(value)
                .map_err(|err| RouteError::InvalidRouteFormat(format!("{kind}: {err}")))?;
            extract_geojson(&gj)
        }
        _ => Err(RouteError::UnsupportedGeometry(kind)),
    }
}

pub fn extract_geojson(gj: &GeoJson) -> Result<Vec<LonLat>, RouteError> {
    match gj {
        GeoJson::Geometry(geometry) => extract_geometry(geometry),
        GeoJson::Feature(feature) => extract_feature(feature),
        GeoJson::FeatureCollection(collection) => {
            let mut pts = Vec::new();
            let mut lines = 0;
            for (idx, feature) in collection.features.iter().enumerate() {
                match extract_feature(feature) {
                    Ok(more) => {
                        pts.extend(more);
                        lines += 1;
                    }
                    // Routes are often exported alongside stops or other markers
                    Err(RouteError::UnsupportedGeometry(kind)) => {
                        warn!("Skipping feature {idx} of the collection: {kind}");
                    }
                    Err(err) => return Err(err),
                }
            }
            if lines == 0 {
                return Err(RouteError::UnsupportedGeometry(
                    "FeatureCollection without any LineString or MultiLineString".to_string(),
                ));
            }
            Ok(pts)
        }
    }
}

fn extract_feature(feature: &Feature) -> Result<Vec<LonLat>, RouteError> {
    match feature.geometry {
        Some(ref geometry) => extract_geometry(geometry),
        None => Err(RouteError::UnsupportedGeometry(
            "Feature without geometry".to_string(),
        )),
    }
}

fn extract_geometry(geometry: &Geometry) -> Result<Vec<LonLat>, RouteError> {
    match geometry.value {
        geojson::Value::LineString(ref line) => positions(line),
        geojson::Value::MultiLineString(ref lines) => {
            let mut pts = Vec::new();
            for line in lines {
                pts.extend(positions(line)?);
            }
            Ok(pts)
        }
        ref other => Err(RouteError::UnsupportedGeometry(
            type_name(other).to_string(),
        )),
    }
}

fn positions(raw: &[Vec<f64>]) -> Result<Vec<LonLat>, RouteError> {
    let mut pts = Vec::with_capacity(raw.len());
    for (idx, position) in raw.iter().enumerate() {
        // Anything past longitude and latitude is elevation, which we ignore
        if position.len() < 2 {
            return Err(RouteError::InvalidRouteFormat(format!(
                "position {idx} has {} values",
                position.len()
            )));
        }
        pts.push(LonLat::checked(position[0], position[1])?);
    }
    Ok(pts)
}

#[allow(unreachable_patterns)]
fn type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
        _ => "unknown geometry",
    }
}
