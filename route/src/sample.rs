/// New York to Los Angeles through a handful of cities. Handy for trying things out without
/// preparing any input.
pub const SAMPLE_ROUTE: &str = r#"{
  "type": "Feature",
  "properties": {
    "name": "Sample Route"
  },
  "geometry": {
    "type": "LineString",
    "coordinates": [
      [-74.0059, 40.7128],
      [-75.1652, 39.9526],
      [-77.0369, 38.9072],
      [-84.3880, 33.7490],
      [-90.0715, 29.9511],
      [-97.7431, 32.7767],
      [-106.4424, 31.7619],
      [-111.8910, 40.7608],
      [-118.2437, 34.0522]
    ]
  }
}"#;
