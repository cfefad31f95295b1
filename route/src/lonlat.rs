use serde::{Deserialize, Serialize};

use crate::RouteError;

/// Radius of the Earth used for every distance calculation, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A WGS84 position. Always stored as (longitude, latitude), the GeoJSON order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    #[serde(rename = "longitude")]
    lon: f64,
    #[serde(rename = "latitude")]
    lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Rejects non-finite or out-of-range positions.
    pub fn checked(lon: f64, lat: f64) -> Result<Self, RouteError> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(RouteError::InvalidRouteFormat(format!(
                "non-finite coordinate ({lon}, {lat})"
            )));
        }
        if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
            return Err(RouteError::InvalidRouteFormat(format!(
                "coordinate ({lon}, {lat}) is outside longitude [-180, 180] / latitude [-90, 90]"
            )));
        }
        Ok(Self { lon, lat })
    }

    /// Longitude
    pub fn x(self) -> f64 {
        self.lon
    }

    /// Latitude
    pub fn y(self) -> f64 {
        self.lat
    }

    /// Great-circle distance in meters, using the Haversine formula.
    pub fn gps_dist(self, other: LonLat) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// Linear interpolation in degrees, not along the great circle. Routes are drawn as straight
    /// lines between vertices, so the marker should stay on them.
    pub fn lerp(self, other: LonLat, pct: f64) -> LonLat {
        LonLat::new(
            self.lon + (other.lon - self.lon) * pct,
            self.lat + (other.lat - self.lat) * pct,
        )
    }
}

impl std::fmt::Display for LonLat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.6}, {:.6}]", self.lon, self.lat)
    }
}
