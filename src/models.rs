//! Core data models used throughout the locator.
//!
//! These types describe the decoded metadata handed to the extractor, the
//! intermediate angle representation, and the resolution result that is
//! serialized back to callers.

use serde::Serialize;
use std::collections::BTreeMap;

/// Tag-number → value mapping produced by a [`MetadataDecoder`](crate::decode::MetadataDecoder).
pub type RawMetadata = BTreeMap<u16, MetadataValue>;

/// A single loosely-typed metadata value.
///
/// Embedded image metadata mixes scalars, rationals, lists, nested
/// directories, and ASCII strings under the same tag space. Everything the
/// extractor inspects goes through this type.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Number(f64),
    /// A fraction stored as two integers. The denominator may be zero in
    /// malformed input.
    Ratio(i64, i64),
    Sequence(Vec<MetadataValue>),
    Mapping(BTreeMap<u16, MetadataValue>),
    Text(String),
    Unknown,
}

impl MetadataValue {
    /// Normalizes a rational-or-scalar value to `f64`.
    ///
    /// Returns `None` for non-numeric shapes, zero denominators, and
    /// non-finite results.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            MetadataValue::Number(n) => *n,
            MetadataValue::Ratio(_, 0) => return None,
            MetadataValue::Ratio(num, den) => *num as f64 / *den as f64,
            _ => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// Hemisphere reference attached to a DMS angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub fn is_latitude(self) -> bool {
        matches!(self, Hemisphere::North | Hemisphere::South)
    }

    /// `S` and `W` flip the sign of the decimal value.
    pub fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

/// An unsigned degrees/minutes/seconds angle plus its hemisphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmsAngle {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub hemisphere: Hemisphere,
}

impl DmsAngle {
    /// Converts to signed decimal degrees.
    pub fn to_decimal(&self) -> f64 {
        let value = self.degrees + self.minutes / 60.0 + self.seconds / 3600.0;
        if self.hemisphere.is_negative() {
            -value
        } else {
            value
        }
    }
}

/// Signed decimal-degree coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Outcome of looking for GPS data in decoded metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtractionResult {
    Found(Coordinate),
    NotFound,
}

/// Which mechanism supplied the coordinates in a [`ResolutionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    ImageExif,
    DeviceCurrent,
    None,
}

/// Response body for a resolved upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionResult {
    #[serde(rename = "found_gps")]
    pub found_in_metadata: bool,
    pub source: Source,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
