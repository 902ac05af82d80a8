// ============================================================================
// Exponent Suffixes
// `e`/`E` and `×10` power-of-ten markers
// ============================================================================

/// Strip a leading exponent marker, returning the exponent text after it.
///
/// Recognises `e`, `E`, and `×10` with optional whitespace around the `×`.
pub(crate) fn strip_marker(s: &str) -> Option<&str> {
    if let Some(rest) = s.strip_prefix(|c: char| c == 'e' || c == 'E') {
        return Some(rest);
    }
    s.trim_start()
        .strip_prefix('×')?
        .trim_start()
        .strip_prefix("10")
}

/// Parse exponent text into an integer power.
///
/// Accepts an optional `^` and superscript digits, so `3`, `-12`, `^3`
/// and `⁻¹²` are all valid.
pub(crate) fn parse_power(text: &str) -> Option<i32> {
    let text = text.trim();
    let text = text.strip_prefix('^').unwrap_or(text).trim_start();

    let ascii: String = text.chars().map(superscript_to_ascii).collect();
    ascii.parse().ok()
}

/// `10^power` with the same rounding as a libm `pow` call.
#[inline]
pub(crate) fn power_of_ten(power: i32) -> f64 {
    10f64.powf(f64::from(power))
}

fn superscript_to_ascii(c: char) -> char {
    match c {
        '⁰' => '0',
        '¹' => '1',
        '²' => '2',
        '³' => '3',
        '⁴' => '4',
        '⁵' => '5',
        '⁶' => '6',
        '⁷' => '7',
        '⁸' => '8',
        '⁹' => '9',
        '⁻' => '-',
        '⁺' => '+',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_marker() {
        assert_eq!(strip_marker("e3"), Some("3"));
        assert_eq!(strip_marker("E-2"), Some("-2"));
        assert_eq!(strip_marker("×10^3"), Some("^3"));
        assert_eq!(strip_marker(" × 10⁻¹²"), Some("⁻¹²"));
        assert_eq!(strip_marker("x10"), None);
        assert_eq!(strip_marker(""), None);
    }

    #[test]
    fn test_parse_power() {
        assert_eq!(parse_power("3"), Some(3));
        assert_eq!(parse_power(" -12 "), Some(-12));
        assert_eq!(parse_power("+4"), Some(4));
        assert_eq!(parse_power("^3"), Some(3));
        assert_eq!(parse_power("⁻¹²"), Some(-12));
        assert_eq!(parse_power(""), None);
        assert_eq!(parse_power("3.5"), None);
        assert_eq!(parse_power("x"), None);
    }

    #[test]
    fn test_power_of_ten() {
        assert_eq!(power_of_ten(0), 1.0);
        assert_eq!(power_of_ten(3), 1000.0);
        assert!((power_of_ten(-3) - 0.001).abs() < 1e-18);
    }
}
