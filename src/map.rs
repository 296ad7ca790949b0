use geo_types::{Coord, LineString};
use serde::Serialize;

use crate::entities::{Coordinates, RouteResult};
use crate::error::{upstream_error, Error};

pub const DEFAULT_CENTER: Coordinates = Coordinates {
    latitude: 20.5937,
    longitude: 78.9629,
};
pub const DEFAULT_ZOOM: u8 = 5;

/// What a map widget needs to draw the current route.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub path: LineString<f64>,
    pub total_distance_meters: u64,
    pub total_duration_seconds: u64,
}

impl MapView {
    pub fn from_route(route: &RouteResult) -> Result<Self, Error> {
        Ok(Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            path: decode_polyline(&route.overview_polyline)?,
            total_distance_meters: route.total_distance_meters(),
            total_duration_seconds: route.total_duration_seconds(),
        })
    }
}

/// Decodes a Google encoded polyline (precision 5) into `x = lng, y = lat`.
pub fn decode_polyline(encoded: &str) -> Result<LineString<f64>, Error> {
    let mut bytes = encoded.bytes();
    let mut coords = Vec::new();
    let (mut lat, mut lng) = (0i64, 0i64);

    loop {
        let Some(dlat) = next_value(&mut bytes)? else {
            break;
        };
        let dlng = next_value(&mut bytes)?.ok_or_else(upstream_error)?;

        lat = lat.checked_add(dlat).ok_or_else(upstream_error)?;
        lng = lng.checked_add(dlng).ok_or_else(upstream_error)?;
        coords.push(Coord {
            x: lng as f64 / 1e5,
            y: lat as f64 / 1e5,
        });
    }

    Ok(LineString::new(coords))
}

/// `Ok(None)` only at a clean end of input.
fn next_value(bytes: &mut impl Iterator<Item = u8>) -> Result<Option<i64>, Error> {
    let mut result: i64 = 0;
    let mut shift = 0;

    for byte in bytes {
        if !(63..=126).contains(&byte) || shift > 60 {
            return Err(upstream_error());
        }

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            let value = if result & 1 == 1 {
                !(result >> 1)
            } else {
                result >> 1
            };
            return Ok(Some(value));
        }
    }

    if shift == 0 {
        Ok(None)
    } else {
        Err(upstream_error())
    }
}
