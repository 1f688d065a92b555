//! Cell parsing helpers for census CSV rows.

/// Parses a numeric cell. Returns `None` if the cell is missing, blank,
/// unparseable or not finite.
#[must_use]
pub fn parse_f64(value: Option<&str>) -> Option<f64> {
    let parsed = value?.trim().parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// Parses lat/lng from optional string cells. Returns `None` if either
/// coordinate is missing or unusable. Zero coordinates are accepted.
#[must_use]
pub fn parse_lat_lng(lat: Option<&str>, lng: Option<&str>) -> Option<(f64, f64)> {
    let latitude = parse_f64(lat)?;
    let longitude = parse_f64(lng)?;
    Some((latitude, longitude))
}

/// Trims a text cell, mapping blank cells to `None`.
#[must_use]
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lat_lng_strings() {
        let (la, lo) = parse_lat_lng(Some("40.7128"), Some("-74.0060")).unwrap();
        assert!((la - 40.7128).abs() < f64::EPSILON);
        assert!((lo - -74.0060).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_missing_lat_lng() {
        assert!(parse_lat_lng(None, Some("-74.0")).is_none());
        assert!(parse_lat_lng(Some("40.7"), None).is_none());
    }

    #[test]
    fn rejects_unparseable_lat_lng() {
        assert!(parse_lat_lng(Some("n/a"), Some("-74.0")).is_none());
        assert!(parse_lat_lng(Some(""), Some("-74.0")).is_none());
    }

    #[test]
    fn accepts_zero_coordinates() {
        let (la, lo) = parse_lat_lng(Some("0"), Some("0.0")).unwrap();
        assert!(la.abs() < f64::EPSILON);
        assert!(lo.abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(parse_f64(Some("NaN")).is_none());
        assert!(parse_f64(Some("inf")).is_none());
    }

    #[test]
    fn blank_text_is_none() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" Good ".to_string())), Some("Good".to_string()));
        assert_eq!(non_blank(None), None);
    }
}
