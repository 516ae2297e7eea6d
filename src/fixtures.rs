//! Test images with known GPS tags.

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use std::io::Cursor;

fn dms(values: [(u32, u32); 3]) -> Value {
    Value::Rational(
        values
            .iter()
            .map(|&(num, denom)| Rational { num, denom })
            .collect(),
    )
}

fn ascii(s: &str) -> Value {
    Value::Ascii(vec![s.as_bytes().to_vec()])
}

/// TIFF image tagged 33°51'35.64" S, 151°12'40.56" E (≈ -33.8599, 151.2113).
pub fn tiff_with_gps() -> Vec<u8> {
    write_tiff(&[
        description(),
        Field {
            tag: Tag::GPSLatitudeRef,
            ifd_num: In::PRIMARY,
            value: ascii("S"),
        },
        Field {
            tag: Tag::GPSLatitude,
            ifd_num: In::PRIMARY,
            value: dms([(33, 1), (51, 1), (3564, 100)]),
        },
        Field {
            tag: Tag::GPSLongitudeRef,
            ifd_num: In::PRIMARY,
            value: ascii("E"),
        },
        Field {
            tag: Tag::GPSLongitude,
            ifd_num: In::PRIMARY,
            value: dms([(151, 1), (12, 1), (4056, 100)]),
        },
    ])
}

/// TIFF image with a latitude but no longitude.
pub fn tiff_with_partial_gps() -> Vec<u8> {
    write_tiff(&[
        description(),
        Field {
            tag: Tag::GPSLatitudeRef,
            ifd_num: In::PRIMARY,
            value: ascii("N"),
        },
        Field {
            tag: Tag::GPSLatitude,
            ifd_num: In::PRIMARY,
            value: dms([(48, 1), (51, 1), (296, 10)]),
        },
    ])
}

fn description() -> Field {
    Field {
        tag: Tag::ImageDescription,
        ifd_num: In::PRIMARY,
        value: ascii("fixture"),
    }
}

fn write_tiff(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).unwrap();
    buf.into_inner()
}
