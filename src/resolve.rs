//! Fallback chain from embedded metadata to caller-supplied coordinates.

use tracing::{debug, info};

use crate::models::{ExtractionResult, ResolutionResult, Source};

/// Picks the coordinates to report for an upload.
///
/// Embedded metadata always wins. Otherwise both caller values must be
/// present and non-empty; if either fails to parse (a blank string
/// included) the result still reports
/// [`Source::DeviceCurrent`], with null coordinates.
pub fn resolve(
    extraction: ExtractionResult,
    caller_lat: Option<&str>,
    caller_lon: Option<&str>,
) -> ResolutionResult {
    if let ExtractionResult::Found(c) = extraction {
        info!("using embedded GPS metadata");
        return ResolutionResult {
            found_in_metadata: true,
            source: Source::ImageExif,
            latitude: Some(c.latitude),
            longitude: Some(c.longitude),
        };
    }

    let (Some(lat), Some(lon)) = (non_empty(caller_lat), non_empty(caller_lon)) else {
        info!("no location available from image or device");
        return ResolutionResult {
            found_in_metadata: false,
            source: Source::None,
            latitude: None,
            longitude: None,
        };
    };

    match (parse_degrees(lat), parse_degrees(lon)) {
        (Some(latitude), Some(longitude)) => {
            info!("using device location");
            ResolutionResult {
                found_in_metadata: false,
                source: Source::DeviceCurrent,
                latitude: Some(latitude),
                longitude: Some(longitude),
            }
        }
        _ => {
            debug!(user_lat = lat, user_lon = lon, "device location did not parse");
            ResolutionResult {
                found_in_metadata: false,
                source: Source::DeviceCurrent,
                latitude: None,
                longitude: None,
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_degrees(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
