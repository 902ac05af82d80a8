// ============================================================================
// Literal Parser
// Uncertainty notation -> (nominal, deviation)
// ============================================================================

use super::exponent::{parse_power, power_of_ten, strip_marker};
use crate::numeric::{NumericResult, ParseError, ParseErrorKind};

/// Parse uncertainty notation into `(nominal, deviation)`.
///
/// Forms are tried in order:
/// 1. `(INNER)e3` / `(INNER)×10³`: global exponent applied to `INNER`
/// 2. `1.20+/-0.03` / `1.20±0.03`: explicit separator
/// 3. `12.34(5)e3`: uncertainty on the trailing digits, or none at all
///
/// # Examples
/// ```
/// use tainty::parse::floats_from_str;
///
/// assert_eq!(floats_from_str("12.34(5)").unwrap(), (12.34, 0.05));
/// assert_eq!(floats_from_str("12.34(142)").unwrap(), (12.34, 1.42));
/// assert_eq!(floats_from_str("1.20±0.03").unwrap(), (1.20, 0.03));
/// assert_eq!(floats_from_str("1.5(2)e3").unwrap(), (1500.0, 200.0));
/// assert_eq!(floats_from_str("12.3").unwrap(), (12.3, 0.1));
/// assert!(floats_from_str("not a number").is_err());
/// ```
pub fn floats_from_str(representation: &str) -> NumericResult<(f64, f64)> {
    parse_literal(representation.trim()).map_err(|err| {
        tracing::debug!("rejected literal {:?}: {}", representation, err);
        err.into()
    })
}

fn parse_literal(representation: &str) -> Result<(f64, f64), ParseError> {
    let (body, factor) = match split_global_exponent(representation) {
        Some((inner, power_text)) => {
            let power = parse_power(power_text).ok_or_else(|| {
                ParseError::new(ParseErrorKind::InvalidExponent, representation)
            })?;
            (inner, power_of_ten(power))
        },
        None => (representation, 1.0),
    };

    let (nominal, deviation) = match split_separator(body) {
        // Simple form 1234.45+/-1.2, 1234.45±1.2 or 1.23e-10+/-1e-23
        Some((nominal, uncert)) => (
            parse_real(nominal, representation)?,
            parse_real(uncert, representation)?.abs(),
        ),
        None => parse_parenthesized(body, representation)?,
    };

    Ok((nominal * factor, deviation * factor))
}

/// Return `(value, error)` from a number with uncertainty on its trailing
/// digits, such as `12.34(5)`, `12.34(142)`, `12.5(3.4)`, `12.3(4.2)e3` or
/// `13.4(nan)e10`.
///
/// The digits between parentheses line up with the last digits of the
/// nominal value, so `12.34(142)` is `12.34±1.42`. A decimal point inside the
/// parentheses makes the uncertainty absolute. Without parentheses an
/// uncertainty of one on the last digit is assumed.
///
/// ```
/// use tainty::parse::parse_error_in_parentheses;
///
/// assert_eq!(parse_error_in_parentheses("12.5(3.4)").unwrap(), (12.5, 3.4));
/// assert_eq!(parse_error_in_parentheses("1234").unwrap(), (1234.0, 1.0));
/// ```
pub fn parse_error_in_parentheses(representation: &str) -> NumericResult<(f64, f64)> {
    parse_parenthesized(representation, representation).map_err(Into::into)
}

// ============================================================================
// Rule 1: global exponent
// ============================================================================

/// Split `(INNER)EXP` into `INNER` and the exponent text.
///
/// The closing parenthesis is the rightmost one followed by a marker, so
/// `(1.5(2))e3` yields `1.5(2)`.
fn split_global_exponent(s: &str) -> Option<(&str, &str)> {
    let body = s.strip_prefix('(')?;
    body.rmatch_indices(')').find_map(|(pos, _)| {
        let power = strip_marker(&body[pos + 1..])?;
        Some((&body[..pos], power))
    })
}

// ============================================================================
// Rule 2: explicit separator
// ============================================================================

/// Split at the last `+/-` or `±`.
fn split_separator(s: &str) -> Option<(&str, &str)> {
    let ascii = s.rfind("+/-").map(|pos| (pos, "+/-".len()));
    let unicode = s.rfind('±').map(|pos| (pos, '±'.len_utf8()));

    let (pos, len) = match (ascii, unicode) {
        (Some(a), Some(u)) => {
            if a.0 > u.0 {
                a
            } else {
                u
            }
        },
        (Some(a), None) => a,
        (None, Some(u)) => u,
        (None, None) => return None,
    };

    Some((&s[..pos], &s[pos + len..]))
}

/// Parse an ordinary signed real, also accepting a `×10` exponent.
fn parse_real(text: &str, representation: &str) -> Result<f64, ParseError> {
    let text = text.trim();
    if let Ok(value) = text.parse::<f64>() {
        return Ok(value);
    }

    text.find('×')
        .and_then(|pos| {
            let mantissa: f64 = text[..pos].trim().parse().ok()?;
            let power = parse_power(strip_marker(&text[pos..])?)?;
            Some(mantissa * power_of_ten(power))
        })
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidNumber, representation))
}

// ============================================================================
// Rule 3: uncertainty on the trailing digits
// ============================================================================

/// Unsigned number token: `digits[.digits]`, `nan` or `inf`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Number<'a> {
    text: &'a str,
    /// Digits after the decimal point, when a point is present
    fraction: Option<&'a str>,
    non_finite: bool,
}

impl<'a> Number<'a> {
    /// Scan a number token off the front of `s`.
    fn scan(s: &'a str) -> Option<(Self, &'a str)> {
        for word in ["nan", "inf"] {
            if s.len() >= word.len()
                && s.is_char_boundary(word.len())
                && s[..word.len()].eq_ignore_ascii_case(word)
            {
                let number = Number {
                    text: &s[..word.len()],
                    fraction: None,
                    non_finite: true,
                };
                return Some((number, &s[word.len()..]));
            }
        }

        let int_len = digit_run(s);
        let (fraction, end) = match s[int_len..].strip_prefix('.') {
            Some(after) => {
                let frac_len = digit_run(after);
                (Some(&after[..frac_len]), int_len + 1 + frac_len)
            },
            None => (None, int_len),
        };

        let has_digits = int_len > 0 || fraction.is_some_and(|f| !f.is_empty());
        if !has_digits {
            return None;
        }

        let number = Number {
            text: &s[..end],
            fraction,
            non_finite: false,
        };
        Some((number, &s[end..]))
    }

    fn value(&self) -> f64 {
        // Token shape is validated by `scan`; f64 parsing accepts all of them
        self.text.parse().unwrap_or(f64::NAN)
    }

    fn fraction_digits(&self) -> i32 {
        self.fraction.map_or(0, |f| f.len() as i32)
    }
}

fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn parse_parenthesized(body: &str, representation: &str) -> Result<(f64, f64), ParseError> {
    let unparsable = || ParseError::new(ParseErrorKind::NotParenUncert, representation);

    let (negative, rest) = match body.as_bytes().first() {
        Some(b'-') => (true, &body[1..]),
        Some(b'+') => (false, &body[1..]),
        _ => (false, body),
    };

    let (main, rest) = Number::scan(rest).ok_or_else(unparsable)?;

    let (uncert, rest) = match rest.strip_prefix('(') {
        Some(inner) => {
            let close = inner.find(')').ok_or_else(unparsable)?;
            let (uncert, leftover) = Number::scan(&inner[..close]).ok_or_else(unparsable)?;
            if !leftover.is_empty() {
                return Err(unparsable());
            }
            (Some(uncert), &inner[close + 1..])
        },
        None => (None, rest),
    };

    let factor = if rest.is_empty() {
        1.0
    } else {
        let power_text = strip_marker(rest).ok_or_else(unparsable)?;
        let power = parse_power(power_text)
            .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidExponent, representation))?;
        power_of_ten(power)
    };

    let magnitude = main.value();
    let nominal = if negative { -magnitude } else { magnitude };

    let deviation = match uncert {
        // Fully explicit uncertainty
        Some(u) if u.non_finite || u.fraction.is_some() => u.value(),
        // Uncertainty on the last digits of the nominal value
        Some(u) => u.value() / 10f64.powi(main.fraction_digits()),
        // One unit on the last digit
        None => 1.0 / 10f64.powi(main.fraction_digits()),
    };

    Ok((nominal * factor, deviation * factor))
}

// ============================================================================
// Tests
// ============================================================================
