/// Fold a display name into the form used for case-insensitive comparisons.
pub(crate) fn fold<S: AsRef<str>>(s: S) -> String {
    s.as_ref().to_lowercase()
}

/// Case-insensitive equality of two display names.
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a == b || fold(a) == fold(b)
}

/// Case-insensitive substring test. `needle` must already be folded.
/// An empty needle is contained in everything.
pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || fold(haystack).contains(needle)
}

/// Convert a benchmark cell like "13,096.5" to 13096.5
///
/// ## Example
/// ```txt
/// "13,096"  -> Some(13096.0)
/// " 312.5 " -> Some(312.5)
/// "n/a"     -> None
/// "-4"      -> None
/// "NaN"     -> None
/// ```
pub(crate) fn parse_benchmark<T: AsRef<str>>(s: T) -> Option<f64> {
    s.as_ref()
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|score| score.is_finite() && *score >= 0.0)
}

#[cfg(test)]
pub(crate) fn roughly_equal(a: f64, b: f64) -> bool {
    if a == b {
        true
    } else if ((a > 0.0) && (b < 0.0)) || ((a < 0.0) && (b > 0.0)) {
        false
    } else if ((a == 0.0) && (b != 0.0)) || ((a != 0.0) && (b == 0.0)) {
        false
    } else {
        fn dif(x: f64, y: f64) -> f64 {
            (x.abs().ln() - y.abs().ln()).abs()
        }

        dif(a, b) <= dif(1.0, 1.00001)
    }
}
