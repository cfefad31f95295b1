use serde::{Deserialize, Serialize};

use crate::LonLat;

/// An axis-aligned box in longitude/latitude, used by hosts to fit the map view around a route.
/// Routes crossing the antimeridian get a box spanning the whole world; good enough for now.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// An empty box that any point will expand
    pub fn new() -> Self {
        Self {
            min_lon: f64::MAX,
            min_lat: f64::MAX,
            max_lon: f64::MIN,
            max_lat: f64::MIN,
        }
    }

    pub fn from_pts(pts: &[LonLat]) -> Self {
        let mut b = Self::new();
        for pt in pts {
            b.update(*pt);
        }
        b
    }

    pub fn update(&mut self, pt: LonLat) {
        self.min_lon = self.min_lon.min(pt.x());
        self.min_lat = self.min_lat.min(pt.y());
        self.max_lon = self.max_lon.max(pt.x());
        self.max_lat = self.max_lat.max(pt.y());
    }

    pub fn is_empty(&self) -> bool {
        self.min_lon > self.max_lon || self.min_lat > self.max_lat
    }

    pub fn center(&self) -> LonLat {
        LonLat::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// In the order GeoJSON wants for a `bbox` member
    pub fn to_bbox(&self) -> Vec<f64> {
        vec![self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}
