//! Corner column-pair detection for polygon sheets
//!
//! The `eUtranCellPolygon` sheet stores each corner as two columns: a named
//! `Corner N` column holding the latitude and the immediately following
//! unnamed column holding the longitude. Readers label unnamed columns
//! `Unnamed: <idx>`, and the index shifts between exports, so the pairing is
//! detected per file instead of hardcoded.

/// Marker prefix given to unnamed columns by the spreadsheet reader.
pub const UNNAMED_PREFIX: &str = "Unnamed:";

/// Highest corner index a polygon sheet can carry.
pub const MAX_CORNERS: usize = 15;

/// Pair each `Corner N` header with its adjacent unnamed longitude header.
///
/// Returns the pairs in corner order. Indices with no `Corner N` header, or
/// whose following header is a named column, are skipped silently.
pub fn detect_corner_columns(headers: &[String]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for i in 1..=MAX_CORNERS {
        let corner = format!("Corner {}", i);
        let Some(pos) = headers.iter().position(|h| h == &corner) else {
            continue;
        };
        if let Some(next) = headers.get(pos + 1) {
            if next.starts_with(UNNAMED_PREFIX) {
                pairs.push((corner, next.clone()));
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detects_adjacent_unnamed_pair() {
        let h = headers(&["EutranCellFDDId", "Corner 3", "Unnamed: 8", "Corner 4", "Unnamed: 10"]);
        assert_eq!(
            detect_corner_columns(&h),
            vec![
                ("Corner 3".to_string(), "Unnamed: 8".to_string()),
                ("Corner 4".to_string(), "Unnamed: 10".to_string()),
            ]
        );
    }

    #[test]
    fn test_named_follower_excludes_pairing() {
        let h = headers(&["Corner 5", "Azimuth", "Corner 6", "Unnamed: 13"]);
        assert_eq!(
            detect_corner_columns(&h),
            vec![("Corner 6".to_string(), "Unnamed: 13".to_string())]
        );
    }

    #[test]
    fn test_trailing_corner_without_follower() {
        let h = headers(&["Corner 1", "Unnamed: 3", "Corner 2"]);
        assert_eq!(
            detect_corner_columns(&h),
            vec![("Corner 1".to_string(), "Unnamed: 3".to_string())]
        );
    }

    #[test]
    fn test_no_corners() {
        assert!(detect_corner_columns(&headers(&["A", "B"])).is_empty());
    }
}
