//! Image metadata decoding.
//!
//! The extractor only understands [`RawMetadata`]. This module turns image
//! bytes into that dictionary. [`ExifDecoder`] is backed by `kamadak-exif`
//! and reads the JPEG, TIFF, HEIF, PNG and WebP containers it supports.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

use exif::{Context, Field, In, Reader, Value};
use thiserror::Error;

use crate::models::{MetadataValue, RawMetadata};
use crate::tags::GPS_INFO;

/// Why metadata could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse image metadata: {0}")]
    Exif(#[from] exif::Error),
}

/// Turns image bytes into a tag dictionary.
pub trait MetadataDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<RawMetadata, DecodeError>;

    /// Reads `path` fully and decodes it.
    fn decode_file(&self, path: &Path) -> Result<RawMetadata, DecodeError> {
        let bytes = std::fs::read(path)?;
        self.decode(&bytes)
    }
}

/// Decoder for EXIF metadata embedded in common image containers.
///
/// Fields of the primary image are keyed by tag number. Fields from the GPS
/// directory are gathered into a [`MetadataValue::Mapping`] stored under
/// [`GPS_INFO`], replacing the raw directory pointer.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifDecoder;

impl MetadataDecoder for ExifDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<RawMetadata, DecodeError> {
        let exif = Reader::new().read_from_container(&mut Cursor::new(bytes))?;

        let mut metadata = RawMetadata::new();
        let mut gps = BTreeMap::new();

        for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
            match field.tag.context() {
                Context::Gps => {
                    gps.insert(field.tag.number(), convert_field(field));
                }
                Context::Tiff | Context::Exif => {
                    metadata.insert(field.tag.number(), convert_field(field));
                }
                _ => {}
            }
        }

        if !gps.is_empty() {
            metadata.insert(GPS_INFO, MetadataValue::Mapping(gps));
        }
        Ok(metadata)
    }
}

fn convert_field(field: &Field) -> MetadataValue {
    match &field.value {
        Value::Byte(v) => collapse(v.iter().map(|n| MetadataValue::Number(f64::from(*n)))),
        Value::SByte(v) => collapse(v.iter().map(|n| MetadataValue::Number(f64::from(*n)))),
        Value::Short(v) => collapse(v.iter().map(|n| MetadataValue::Number(f64::from(*n)))),
        Value::SShort(v) => collapse(v.iter().map(|n| MetadataValue::Number(f64::from(*n)))),
        Value::Long(v) => collapse(v.iter().map(|n| MetadataValue::Number(f64::from(*n)))),
        Value::SLong(v) => collapse(v.iter().map(|n| MetadataValue::Number(f64::from(*n)))),
        Value::Float(v) => collapse(v.iter().map(|n| MetadataValue::Number(f64::from(*n)))),
        Value::Double(v) => collapse(v.iter().map(|n| MetadataValue::Number(*n))),
        Value::Rational(v) => collapse(
            v.iter()
                .map(|r| MetadataValue::Ratio(i64::from(r.num), i64::from(r.denom))),
        ),
        Value::SRational(v) => collapse(
            v.iter()
                .map(|r| MetadataValue::Ratio(i64::from(r.num), i64::from(r.denom))),
        ),
        Value::Ascii(v) => collapse(v.iter().map(|s| {
            let text = String::from_utf8_lossy(s);
            let text = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
            MetadataValue::Text(text.to_string())
        })),
        _ => MetadataValue::Unknown,
    }
}

/// One-element values become scalars; everything else a sequence.
fn collapse(values: impl Iterator<Item = MetadataValue>) -> MetadataValue {
    let mut values: Vec<MetadataValue> = values.collect();
    if values.len() == 1 {
        values.remove(0)
    } else {
        MetadataValue::Sequence(values)
    }
}
