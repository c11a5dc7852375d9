//! Geographic coordinate and street-segment types.
//!
//! `GeoCoord` keeps the latitude/longitude exactly as they appeared in the
//! source text alongside the parsed `f64` values.  Identity (`Eq`, `Hash`,
//! `Ord`) is defined on the text only, so two coordinates read from the same
//! tokens always land on the same map key regardless of float formatting.
//! The floats are used for distance and angle math and nothing else.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{CoreError, CoreResult};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Kilometres per statute mile.
const KM_PER_MILE: f64 = 1.609_344;

// ── GeoCoord ──────────────────────────────────────────────────────────────────

/// A latitude/longitude pair that remembers its source text.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GeoCoordText", into = "GeoCoordText")
)]
pub struct GeoCoord {
    lat_text: String,
    lon_text: String,
    lat: f64,
    lon: f64,
}

impl GeoCoord {
    /// Parse a coordinate from its latitude and longitude tokens.
    ///
    /// Surrounding whitespace is trimmed before the text is stored.  Fails
    /// with [`CoreError::Parse`] if either token is not a finite number.
    pub fn parse(lat: &str, lon: &str) -> CoreResult<Self> {
        let lat_text = lat.trim();
        let lon_text = lon.trim();
        Ok(Self {
            lat: parse_degrees(lat_text)?,
            lon: parse_degrees(lon_text)?,
            lat_text: lat_text.to_owned(),
            lon_text: lon_text.to_owned(),
        })
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.lat
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.lon
    }

    pub fn latitude_text(&self) -> &str {
        &self.lat_text
    }

    pub fn longitude_text(&self) -> &str {
        &self.lon_text
    }

    /// Haversine great-circle distance in kilometres.
    pub fn distance_km(&self, other: &GeoCoord) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Haversine great-circle distance in statute miles.  This is the unit
    /// used for route totals and proceed instructions.
    #[inline]
    pub fn distance_miles(&self, other: &GeoCoord) -> f64 {
        self.distance_km(other) / KM_PER_MILE
    }
}

fn parse_degrees(token: &str) -> CoreResult<f64> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CoreError::Parse(format!(
            "invalid coordinate component {token:?}: expected a decimal number of degrees"
        ))),
    }
}

impl PartialEq for GeoCoord {
    fn eq(&self, other: &Self) -> bool {
        self.lat_text == other.lat_text && self.lon_text == other.lon_text
    }
}

impl Eq for GeoCoord {}

impl Hash for GeoCoord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat_text.hash(state);
        self.lon_text.hash(state);
    }
}

impl PartialOrd for GeoCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GeoCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lat_text
            .cmp(&other.lat_text)
            .then_with(|| self.lon_text.cmp(&other.lon_text))
    }
}

impl fmt::Display for GeoCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat_text, self.lon_text)
    }
}

/// Serialized form of a [`GeoCoord`]: the two source tokens.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GeoCoordText {
    latitude:  String,
    longitude: String,
}

#[cfg(feature = "serde")]
impl TryFrom<GeoCoordText> for GeoCoord {
    type Error = CoreError;

    fn try_from(t: GeoCoordText) -> Result<Self, Self::Error> {
        GeoCoord::parse(&t.latitude, &t.longitude)
    }
}

#[cfg(feature = "serde")]
impl From<GeoCoord> for GeoCoordText {
    fn from(c: GeoCoord) -> Self {
        GeoCoordText { latitude: c.lat_text, longitude: c.lon_text }
    }
}

// ── StreetSegment ─────────────────────────────────────────────────────────────

/// A directed, named street edge.
///
/// The two traversal directions of one physical street are two distinct
/// segments with swapped endpoints and the same name (see [`reversed`]).
///
/// [`reversed`]: StreetSegment::reversed
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreetSegment {
    pub start: GeoCoord,
    pub end:   GeoCoord,
    pub name:  String,
}

impl StreetSegment {
    pub fn new(start: GeoCoord, end: GeoCoord, name: impl Into<String>) -> Self {
        Self { start, end, name: name.into() }
    }

    /// The same street traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end.clone(),
            end:   self.start.clone(),
            name:  self.name.clone(),
        }
    }

    /// Planar direction of travel in degrees, `[0, 360)`.
    ///
    /// 0° points east and angles grow counter-clockwise (90° is north), taken
    /// from `atan2(Δlat, Δlon)`.  No map projection is applied.
    pub fn bearing(&self) -> f64 {
        let d_lat = self.end.lat - self.start.lat;
        let d_lon = self.end.lon - self.start.lon;
        normalize_degrees(d_lat.atan2(d_lon).to_degrees())
    }

    /// Great-circle length of the segment in miles.
    #[inline]
    pub fn length_miles(&self) -> f64 {
        self.start.distance_miles(&self.end)
    }
}

impl fmt::Display for StreetSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.name, self.start, self.end)
    }
}

/// Angle turned when leaving `first` onto `second`, in degrees `[0, 360)`.
///
/// Small values are gentle left turns, values just under 360 are gentle
/// right turns, and 180 is a U-turn.
pub fn turn_angle(first: &StreetSegment, second: &StreetSegment) -> f64 {
    normalize_degrees(second.bearing() - first.bearing())
}

/// Wrap any angle into `[0, 360)`.
fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
