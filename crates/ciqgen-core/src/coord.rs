//! Geographic coordinate conversion and fixed-point formatting
//!
//! Planning spreadsheets carry corner coordinates either as
//! degree-minute-second strings (`45°29'53.0"N`) or as plain decimals.
//! Network element commands want a signed integer scaled by 1e7 and capped
//! at 8 decimal digits.

use regex::Regex;
use std::sync::LazyLock;

/// DMS pattern: `<deg>°<min>'<sec>["]<hemisphere>`, hemisphere optional.
/// Anchored at the start so trailing junk after a valid prefix is tolerated,
/// matching how exports sometimes append annotations.
static DMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(-?\d+)°(\d+)'([\d.]+)"?([NSEW])?"#).unwrap());

/// Convert a coordinate string to signed decimal degrees.
///
/// Accepts DMS notation with an optional hemisphere letter, or an already
/// decimal string. A negative degree field or an `S`/`W` hemisphere yields a
/// negative result; the hemisphere letter wins even when the degree field
/// carries its own sign. Returns `None` for blank or unparseable input,
/// never an error.
pub fn convert_degree_to_decimal(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = DMS_RE.captures(trimmed) {
        let degrees: i32 = caps[1].parse().ok()?;
        let minutes: u32 = caps[2].parse().ok()?;
        let seconds: f64 = caps[3].parse().ok()?;
        let hemisphere = caps.get(4).map(|m| m.as_str());

        let mut decimal = f64::from(degrees.abs()) + f64::from(minutes) / 60.0 + seconds / 3600.0;
        if degrees < 0 || matches!(hemisphere, Some("S") | Some("W")) {
            decimal = -decimal;
        }
        return Some(decimal);
    }

    trimmed.parse::<f64>().ok()
}

/// Rescale a decimal coordinate into the 8-digit fixed-point form used by
/// `eutranCellPolygon` corner parameters.
///
/// The value is scaled by 1e7 and rounded, then the magnitude's decimal
/// digit string is truncated to its first 8 characters. Truncation operates
/// on the digit string, not the number: a 9-digit magnitude loses its last
/// digit rather than being clamped to 99999999. The downstream command
/// parser expects exactly this behavior, so it is preserved as is. The sign
/// is restored from the original decimal value.
pub fn format_coordinate_for_polygon(coord: Option<f64>) -> Option<i64> {
    let coord = coord?;

    let scaled = (coord * 1e7).round();
    // abs() before rendering: the sign comes back from `coord` at the end.
    let digits = format!("{}", (scaled.abs()) as i64);
    let capped = if digits.len() > 8 { &digits[..8] } else { &digits };

    let mut result: i64 = capped.parse().ok()?;
    if coord < 0.0 {
        result = -result;
    }
    Some(result)
}
