//! GPS coordinate extraction from decoded image metadata.
//!
//! Takes the tag dictionary produced by a decoder, finds the GPS block,
//! and turns its degree/minute/second fields into a signed decimal
//! [`Coordinate`]. Any missing or malformed piece yields
//! [`ExtractionResult::NotFound`]; nothing here returns an error.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

use crate::decode::MetadataDecoder;
use crate::models::{
    Coordinate, DmsAngle, ExtractionResult, Hemisphere, MetadataValue, RawMetadata,
};
use crate::tags::{
    gps_tag_name, GPS_INFO, GPS_LATITUDE, GPS_LATITUDE_REF, GPS_LONGITUDE, GPS_LONGITUDE_REF,
};

/// Key of a [`GpsFieldSet`] entry: the canonical tag name when the GPS tag
/// table knows it, otherwise the raw tag number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpsKey {
    Named(&'static str),
    Raw(u16),
}

/// GPS block fields keyed by tag name. Borrowed from the metadata for the
/// duration of one extraction.
pub type GpsFieldSet<'a> = HashMap<GpsKey, &'a MetadataValue>;

/// Extracts a signed latitude/longitude from decoded metadata.
pub fn extract_gps(metadata: &RawMetadata) -> ExtractionResult {
    let block = match metadata.get(&GPS_INFO) {
        Some(MetadataValue::Mapping(block)) => block,
        Some(other) => {
            debug!(value = ?other, "GPSInfo tag does not hold a directory");
            return ExtractionResult::NotFound;
        }
        None => {
            debug!("no GPS metadata present");
            return ExtractionResult::NotFound;
        }
    };

    let fields = name_fields(block);

    let (Some(lat), Some(lat_ref), Some(lon), Some(lon_ref)) = (
        fields.get(&GpsKey::Named(GPS_LATITUDE)),
        fields.get(&GpsKey::Named(GPS_LATITUDE_REF)),
        fields.get(&GpsKey::Named(GPS_LONGITUDE)),
        fields.get(&GpsKey::Named(GPS_LONGITUDE_REF)),
    ) else {
        debug!(
            present = fields.len(),
            "GPS block is missing latitude or longitude fields"
        );
        return ExtractionResult::NotFound;
    };

    let Some(latitude) = dms_angle(lat, lat_ref, true) else {
        debug!(value = ?lat, reference = ?lat_ref, "malformed GPS latitude");
        return ExtractionResult::NotFound;
    };
    let Some(longitude) = dms_angle(lon, lon_ref, false) else {
        debug!(value = ?lon, reference = ?lon_ref, "malformed GPS longitude");
        return ExtractionResult::NotFound;
    };

    let coordinate = Coordinate {
        latitude: latitude.to_decimal(),
        longitude: longitude.to_decimal(),
    };
    debug!(
        latitude = coordinate.latitude,
        longitude = coordinate.longitude,
        "converted GPS coordinates"
    );
    ExtractionResult::Found(coordinate)
}

/// Decodes the image at `path` and extracts its coordinates.
///
/// A decode failure only means there is no usable metadata, so it is
/// logged and reported as [`ExtractionResult::NotFound`].
pub fn extract_gps_from_file(decoder: &dyn MetadataDecoder, path: &Path) -> ExtractionResult {
    match decoder.decode_file(path) {
        Ok(metadata) => extract_gps(&metadata),
        Err(e) => {
            debug!(error = %e, path = %path.display(), "could not decode image metadata");
            ExtractionResult::NotFound
        }
    }
}

/// Resolves the numeric keys of a GPS block to their canonical names.
pub fn name_fields(block: &BTreeMap<u16, MetadataValue>) -> GpsFieldSet<'_> {
    block
        .iter()
        .map(|(tag, value)| {
            let key = gps_tag_name(*tag)
                .map(GpsKey::Named)
                .unwrap_or(GpsKey::Raw(*tag));
            (key, value)
        })
        .collect()
}

/// Builds a validated DMS angle from a 3-element value and its reference.
fn dms_angle(value: &MetadataValue, reference: &MetadataValue, latitude: bool) -> Option<DmsAngle> {
    let MetadataValue::Sequence(parts) = value else {
        return None;
    };
    let [degrees, minutes, seconds] = parts.as_slice() else {
        return None;
    };

    let hemisphere = hemisphere(reference)?;
    if hemisphere.is_latitude() != latitude {
        return None;
    }

    let magnitude = |v: &MetadataValue| v.as_f64().filter(|n| *n >= 0.0);

    Some(DmsAngle {
        degrees: magnitude(degrees)?,
        minutes: magnitude(minutes)?,
        seconds: magnitude(seconds)?,
        hemisphere,
    })
}

fn hemisphere(reference: &MetadataValue) -> Option<Hemisphere> {
    match reference {
        MetadataValue::Text(text) => {
            let mut chars = text.trim().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Hemisphere::from_char(c),
                _ => None,
            }
        }
        _ => None,
    }
}
