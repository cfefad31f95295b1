#[macro_use]
extern crate log;

mod bounds;
mod distances;
mod error;
mod extract;
mod interpolate;
mod lonlat;
pub mod polyline;
mod sample;

use anyhow::Result;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry};

pub use bounds::Bounds;
pub use distances::DistanceTable;
pub use error::RouteError;
pub use extract::{extract_geojson, extract_json, extract_points};
pub use interpolate::position_along;
pub use lonlat::{LonLat, EARTH_RADIUS_METERS};
pub use sample::SAMPLE_ROUTE;

/// A path that a marker can travel along. There are always at least 2 points, though they might
/// all be equal.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pts: Vec<LonLat>,
    // Always the same length as pts
    distances: DistanceTable,
}

impl Route {
    pub fn new(pts: Vec<LonLat>) -> Result<Self, RouteError> {
        if pts.len() < 2 {
            return Err(RouteError::RouteTooShort(pts.len()));
        }
        let distances = DistanceTable::new(&pts);
        Ok(Self { pts, distances })
    }

    /// Accepts GeoJSON (Feature, FeatureCollection, LineString, MultiLineString, or a bare list
    /// of positions) or a polyline6 string.
    pub fn parse(input: &str) -> Result<Self, RouteError> {
        let pts = extract_points(input)?;
        debug!("Extracted {} points from the input", pts.len());
        Self::new(pts)
    }

    pub fn points(&self) -> &[LonLat] {
        &self.pts
    }

    pub fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    /// In meters
    pub fn length(&self) -> f64 {
        self.distances.total()
    }

    pub fn first_pt(&self) -> LonLat {
        self.pts[0]
    }

    pub fn last_pt(&self) -> LonLat {
        self.pts[self.pts.len() - 1]
    }

    /// The position `dist` meters from the start, clamped to the ends.
    pub fn interpolate(&self, dist: f64) -> LonLat {
        position_along(&self.pts, &self.distances, dist).unwrap_or_else(|| self.first_pt())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_pts(&self.pts)
    }

    pub fn to_polyline6(&self) -> String {
        polyline::encode(&self.pts)
    }

    /// The route as a LineString, plus the start and end as points.
    pub fn to_geojson(&self) -> GeoJson {
        let bounds = self.bounds();

        let mut features = Vec::new();
        let mut feature = Feature {
            bbox: Some(bounds.to_bbox()),
            geometry: Some(Geometry::new(geojson::Value::LineString(
                self.pts.iter().map(|pt| vec![pt.x(), pt.y()]).collect(),
            ))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        feature.set_property("type", "route");
        feature.set_property("length_meters", self.length());
        features.push(feature);

        for (kind, pt) in [("start", self.first_pt()), ("end", self.last_pt())] {
            let mut feature = Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::Point(vec![pt.x(), pt.y()]))),
                id: None,
                properties: None,
                foreign_members: None,
            };
            feature.set_property("type", kind);
            features.push(feature);
        }

        GeoJson::FeatureCollection(FeatureCollection {
            bbox: Some(bounds.to_bbox()),
            features,
            foreign_members: None,
        })
    }

    pub fn export_to_geojson(&self, path: &str) -> Result<()> {
        fs_err::write(path, serde_json::to_string_pretty(&self.to_geojson())?)?;
        info!("Wrote {path}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_short() {
        assert_eq!(
            Route::parse(r#"{"type": "LineString", "coordinates": [[1, 1]]}"#),
            Err(RouteError::RouteTooShort(1))
        );
        assert_eq!(Route::new(Vec::new()), Err(RouteError::RouteTooShort(0)));
    }

    #[test]
    fn sample_route() {
        let route = Route::parse(SAMPLE_ROUTE).unwrap();
        assert_eq!(route.points().len(), 9);
        assert_eq!(route.first_pt(), LonLat::new(-74.0059, 40.7128));
        assert_eq!(route.last_pt(), LonLat::new(-118.2437, 34.0522));
        // The detour through the south and Salt Lake City is much longer than the direct 3,936km
        assert!(route.length() > 5_000_000.0 && route.length() < 7_000_000.0);
        assert_eq!(route.interpolate(route.length() + 1.0), route.last_pt());
    }

    #[test]
    fn exported_geojson_loads_again() {
        let route = Route::parse(SAMPLE_ROUTE).unwrap();
        let exported = serde_json::to_string(&route.to_geojson()).unwrap();
        // The start and end points are skipped
        let again = Route::parse(&exported).unwrap();
        assert_eq!(again.points(), route.points());
    }

    #[test]
    fn export_errors_name_the_path() {
        let route = Route::parse(SAMPLE_ROUTE).unwrap();
        let dir = std::env::temp_dir().join(format!("no_such_dir_{}", std::process::id()));
        let path = dir.join("route.geojson");
        let path = path.to_str().unwrap();
        let err = route.export_to_geojson(path).unwrap_err();
        assert!(format!("{err:#}").contains(path));
    }

    #[test]
    fn polyline_round_trip() {
        let route = Route::parse(SAMPLE_ROUTE).unwrap();
        let again = Route::parse(&route.to_polyline6()).unwrap();
        for (a, b) in again.points().iter().zip(route.points()) {
            assert!((a.x() - b.x()).abs() <= 1e-6 && (a.y() - b.y()).abs() <= 1e-6);
        }
    }
}
