//! Subtitle timestamp formatting shared by the SRT and VTT encoders.

/// Format seconds as `HH:MM:SS<sep>mmm`.
///
/// SRT separates milliseconds with a comma, WebVTT with a period; everything
/// else about the two formats' timestamps is identical, so they share this
/// helper.
///
/// Rounding policy:
/// - We round to the nearest millisecond to reduce drift when converting from `f32`.
pub(crate) fn format_timestamp(seconds: f32, millis_sep: char) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;

    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;

    let s = total_s % 60;
    let total_m = total_s / 60;

    let m = total_m % 60;
    let h = total_m / 60;

    format!("{h:02}:{m:02}:{s:02}{millis_sep}{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_timestamp(0.0, '.'), "00:00:00.000");
        assert_eq!(format_timestamp(61.2, '.'), "00:01:01.200");
        assert_eq!(format_timestamp(3723.456, ','), "01:02:03,456");
    }

    #[test]
    fn rounds_to_nearest_millisecond() {
        assert_eq!(format_timestamp(0.0004, '.'), "00:00:00.000");
        assert_eq!(format_timestamp(0.0005, '.'), "00:00:00.001");
        assert_eq!(format_timestamp(1.9995, ','), "00:00:02,000");
    }
}
