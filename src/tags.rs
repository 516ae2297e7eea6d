//! Well-known metadata tag identifiers.
//!
//! The GPS block lives under a single reserved tag in the primary image
//! directory. Its own keys come from the fixed GPS tag table below.

/// Tag number of the `GPSInfo` directory pointer (0x8825).
pub const GPS_INFO: u16 = 34853;

pub const GPS_LATITUDE_REF: &str = "GPSLatitudeRef";
pub const GPS_LATITUDE: &str = "GPSLatitude";
pub const GPS_LONGITUDE_REF: &str = "GPSLongitudeRef";
pub const GPS_LONGITUDE: &str = "GPSLongitude";

const GPS_TAGS: [(u16, &str); 32] = [
    (0x00, "GPSVersionID"),
    (0x01, GPS_LATITUDE_REF),
    (0x02, GPS_LATITUDE),
    (0x03, GPS_LONGITUDE_REF),
    (0x04, GPS_LONGITUDE),
    (0x05, "GPSAltitudeRef"),
    (0x06, "GPSAltitude"),
    (0x07, "GPSTimeStamp"),
    (0x08, "GPSSatellites"),
    (0x09, "GPSStatus"),
    (0x0A, "GPSMeasureMode"),
    (0x0B, "GPSDOP"),
    (0x0C, "GPSSpeedRef"),
    (0x0D, "GPSSpeed"),
    (0x0E, "GPSTrackRef"),
    (0x0F, "GPSTrack"),
    (0x10, "GPSImgDirectionRef"),
    (0x11, "GPSImgDirection"),
    (0x12, "GPSMapDatum"),
    (0x13, "GPSDestLatitudeRef"),
    (0x14, "GPSDestLatitude"),
    (0x15, "GPSDestLongitudeRef"),
    (0x16, "GPSDestLongitude"),
    (0x17, "GPSDestBearingRef"),
    (0x18, "GPSDestBearing"),
    (0x19, "GPSDestDistanceRef"),
    (0x1A, "GPSDestDistance"),
    (0x1B, "GPSProcessingMethod"),
    (0x1C, "GPSAreaInformation"),
    (0x1D, "GPSDateStamp"),
    (0x1E, "GPSDifferential"),
    (0x1F, "GPSHPositioningError"),
];

/// Looks up the canonical name of a GPS-directory tag.
pub fn gps_tag_name(tag: u16) -> Option<&'static str> {
    GPS_TAGS
        .iter()
        .find(|(number, _)| *number == tag)
        .map(|(_, name)| *name)
}
