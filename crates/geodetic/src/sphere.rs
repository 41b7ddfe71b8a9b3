//! Spherical primitives: haversine distance, initial bearing, cross-track distance.
//!
//! All angles are radians; distances are kilometers on a sphere of radius
//! [`EARTH_RADIUS`]. Azimuths are measured clockwise from north in `[0, 2π)`.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::cfg::EARTH_RADIUS;

/// Haversine term `sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)`, clamped to `[0, 1]`.
///
/// `cos_lat1`/`cos_lat2` are taken precomputed so mesh scans can cache them.
#[inline]
pub(crate) fn haversine_term(
    lon1: f64,
    lat1: f64,
    cos_lat1: f64,
    lon2: f64,
    lat2: f64,
    cos_lat2: f64,
) -> f64 {
    let s_lat = ((lat1 - lat2) / 2.0).sin();
    let s_lon = ((lon1 - lon2) / 2.0).sin();
    let h = s_lat * s_lat + cos_lat1 * cos_lat2 * s_lon * s_lon;
    // Round-off can push h a hair above 1 for antipodes.
    h.clamp(0.0, 1.0)
}

/// Central angle (radians) between two points.
#[inline]
pub fn central_angle(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    2.0 * haversine_term(lon1, lat1, lat1.cos(), lon2, lat2, lat2.cos())
        .sqrt()
        .asin()
}

/// Great-circle distance in km between `(lon1, lat1)` and `(lon2, lat2)`.
#[inline]
pub fn geodetic_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    EARTH_RADIUS * central_angle(lon1, lat1, lon2, lat2)
}

/// Initial bearing from point 1 toward point 2, in `[0, 2π)`.
#[inline]
pub fn azimuth(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (cos_lat1, cos_lat2) = (lat1.cos(), lat2.cos());
    let d_lon = lon1 - lon2;
    let theta = (d_lon.sin() * cos_lat2)
        .atan2(cos_lat1 * lat2.sin() - lat1.sin() * cos_lat2 * d_lon.cos());
    (TAU - theta) % TAU
}

/// Signed shortest distance (km) from `(lon, lat)` to the great circle through
/// `(arc_lon, arc_lat)` heading `arc_azimuth`.
///
/// Positive on the right-hand side of the direction of travel, negative on the left.
pub fn distance_to_arc(arc_lon: f64, arc_lat: f64, arc_azimuth: f64, lon: f64, lat: f64) -> f64 {
    let to_target = azimuth(arc_lon, arc_lat, lon, lat);
    let dist = geodetic_distance(arc_lon, arc_lat, lon, lat);
    let t = (to_target - arc_azimuth + TAU) % TAU;
    let cos_angle = (t.sin() * (dist / EARTH_RADIUS).sin()).clamp(-1.0, 1.0);
    (FRAC_PI_2 - cos_angle.acos()) * EARTH_RADIUS
}

/// A location on (or below) the sphere. Depth is km, positive downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
    pub depth: f64,
}

impl Point {
    /// Surface point (zero depth).
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            depth: 0.0,
        }
    }

    #[inline]
    pub fn with_depth(lon: f64, lat: f64, depth: f64) -> Self {
        Self { lon, lat, depth }
    }

    /// Surface great-circle distance, ignoring depth.
    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        geodetic_distance(self.lon, self.lat, other.lon, other.lat)
    }

    #[inline]
    pub fn azimuth_to(&self, other: &Point) -> f64 {
        azimuth(self.lon, self.lat, other.lon, other.lat)
    }

    /// Surface distance combined with the depth difference as a right triangle.
    #[inline]
    pub fn distance_with_depth(&self, other: &Point) -> f64 {
        combine_vertical(self.distance_to(other), self.depth - other.depth)
    }
}

/// `sqrt(surface² + vertical²)`, skipping the square root when there is no vertical offset.
#[inline]
pub(crate) fn combine_vertical(surface: f64, vertical: f64) -> f64 {
    if vertical == 0.0 {
        surface
    } else {
        (surface * surface + vertical * vertical).sqrt()
    }
}

/// A directed great circle: an origin plus a heading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    pub origin: Point,
    pub azimuth: f64,
}

impl Arc {
    #[inline]
    pub fn new(origin: Point, azimuth: f64) -> Self {
        Self { origin, azimuth }
    }

    /// Signed cross-track distance from `point` to this arc's great circle.
    #[inline]
    pub fn distance_to(&self, point: &Point) -> f64 {
        distance_to_arc(
            self.origin.lon,
            self.origin.lat,
            self.azimuth,
            point.lon,
            point.lat,
        )
    }
}
