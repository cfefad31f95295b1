//! The "polyline6" encoding: Google's encoded polyline format, but with 6 decimal places of
//! precision instead of 5. Every value is the delta from the previous point, zigzag-encoded, and
//! split into 5-bit chunks (least significant first). Each chunk is offset by 63 to land in
//! printable ASCII, and 0x20 marks that more chunks follow. Pairs are stored latitude first.

use crate::{LonLat, RouteError};

/// Values are stored as integer multiples of 1e-6 degrees
pub const PRECISION: f64 = 1_000_000.0;

const OFFSET: u8 = 63;
const CONTINUATION: i64 = 0x20;
const PAYLOAD: i64 = 0x1f;
// 12 chunks is 60 bits, plenty for any delta between valid coordinates
const MAX_CHUNKS: usize = 12;

pub fn decode(encoded: &str) -> Result<Vec<LonLat>, RouteError> {
    if encoded.is_empty() {
        return Err(RouteError::InvalidRouteFormat("empty input".to_string()));
    }

    let bytes = encoded.as_bytes();
    let mut idx = 0;
    let mut lat = 0;
    let mut lon = 0;
    let mut pts = Vec::new();
    while idx < bytes.len() {
        lat += next_value(bytes, &mut idx)?;
        // Running out here means we got half of a pair
        lon += next_value(bytes, &mut idx)?;
        pts.push(LonLat::checked(
            lon as f64 / PRECISION,
            lat as f64 / PRECISION,
        )?);
    }
    Ok(pts)
}

fn next_value(bytes: &[u8], idx: &mut usize) -> Result<i64, RouteError> {
    let mut result = 0;
    for chunk_idx in 0..MAX_CHUNKS {
        let byte = match bytes.get(*idx) {
            Some(byte) => *byte,
            None => return Err(RouteError::MalformedPolyline { offset: *idx }),
        };
        if !(OFFSET..=OFFSET + 63).contains(&byte) {
            return Err(RouteError::InvalidRouteFormat(format!(
                "byte {byte:#04x} at offset {} isn't part of the polyline alphabet",
                *idx
            )));
        }
        *idx += 1;

        let chunk = (byte - OFFSET) as i64;
        result |= (chunk & PAYLOAD) << (5 * chunk_idx);
        if chunk & CONTINUATION == 0 {
            return Ok(if result & 1 != 0 {
                !(result >> 1)
            } else {
                result >> 1
            });
        }
    }
    Err(RouteError::MalformedPolyline { offset: *idx })
}

pub fn encode(pts: &[LonLat]) -> String {
    let mut out = String::new();
    let mut prev_lat = 0;
    let mut prev_lon = 0;
    for pt in pts {
        let lat = (pt.y() * PRECISION).round() as i64;
        let lon = (pt.x() * PRECISION).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lon - prev_lon, &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }
    out
}

fn encode_value(delta: i64, out: &mut String) {
    let mut value = if delta < 0 {
        !(delta << 1)
    } else {
        delta << 1
    };
    while value >= CONTINUATION {
        out.push(((CONTINUATION | (value & PAYLOAD)) as u8 + OFFSET) as char);
        value >>= 5;
    }
    out.push((value as u8 + OFFSET) as char);
}
