use thiserror::Error;

/// Everything that can go wrong turning some input into a route. None of these are fatal; the
/// caller just doesn't get a route.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RouteError {
    /// Valid GeoJSON, but not something we can follow, like a Point or Polygon
    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(String),
    /// Neither structured geometry nor a polyline
    #[error("input is not a GeoJSON LineString, MultiLineString, or polyline6 string: {0}")]
    InvalidRouteFormat(String),
    #[error("encoded polyline is truncated at byte {offset}")]
    MalformedPolyline { offset: usize },
    #[error("a route needs at least 2 points, but only {0} were found")]
    RouteTooShort(usize),
}
