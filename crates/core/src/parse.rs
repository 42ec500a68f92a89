//! Text parsing and formatting utilities shared by value conversion and
//! statement resolution.
//!
//! Every parser here is fallible and returns `Option`; callers decide what a
//! failed parse means (value conversion folds it to zero).
//!
//! # Numbers
//!
//! Numeric parsing is prefix based: leading ASCII whitespace and an optional
//! sign are skipped, the longest numeric prefix is consumed and anything after
//! it is ignored. `"42abc"` parses as `42`, `"abc"` does not parse at all.
//!
//! # Dates
//!
//! Dates are written `YYYY-M-D` with a four digit year and one or two digit
//! month and day, and are encoded as the integer `YYYYMMDD`.
//!
//! # Formatting
//!
//! [`format_float_general`] renders floats in C's `%g` style with six
//! significant digits.

use alloc::format;
use alloc::string::String;

// =========================================================================
// Numbers
// =========================================================================

#[inline]
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn skip_space(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| is_c_space(**b)).count()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parses the integer prefix of `text`.
///
/// Returns `None` when no digits follow the optional sign, or when the prefix
/// does not fit in an `i64`.
///
/// ```
/// use cinder_core::parse::parse_int_prefix;
/// assert_eq!(parse_int_prefix("  -17"), Some(-17));
/// assert_eq!(parse_int_prefix("42abc"), Some(42));
/// assert_eq!(parse_int_prefix("abc"), None);
/// ```
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    let mut pos = skip_space(bytes);
    let mut negative = false;
    if let Some(&sign) = bytes.get(pos) {
        if sign == b'-' || sign == b'+' {
            negative = sign == b'-';
            pos += 1;
        }
    }

    let digits = count_digits(&bytes[pos..]);
    if digits == 0 {
        return None;
    }

    let mut acc: i64 = 0;
    for &b in &bytes[pos..pos + digits] {
        let d = i64::from(b - b'0');
        acc = acc.checked_mul(10)?;
        acc = if negative {
            acc.checked_sub(d)?
        } else {
            acc.checked_add(d)?
        };
    }
    Some(acc)
}

/// Parses the floating point prefix of `text`.
///
/// Accepts `[sign] digits [. digits] [e [sign] digits]` with at least one
/// mantissa digit, plus the `inf`, `infinity` and `nan` spellings. A finite
/// prefix that overflows `f32` does not parse.
///
/// ```
/// use cinder_core::parse::parse_float_prefix;
/// assert_eq!(parse_float_prefix("3.5kg"), Some(3.5));
/// assert_eq!(parse_float_prefix(".25"), Some(0.25));
/// assert_eq!(parse_float_prefix("e5"), None);
/// ```
pub fn parse_float_prefix(text: &str) -> Option<f32> {
    let bytes = text.as_bytes();
    let start = skip_space(bytes);
    let mut pos = start;
    if matches!(bytes.get(pos), Some(b'-') | Some(b'+')) {
        pos += 1;
    }

    if let Some(len) = special_float_len(&bytes[pos..]) {
        return text[start..pos + len].parse::<f32>().ok();
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;
    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(&bytes[pos + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'-') | Some(b'+')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }

    let value = text[start..pos].parse::<f32>().ok()?;
    if value.is_infinite() {
        return None;
    }
    Some(value)
}

fn special_float_len(bytes: &[u8]) -> Option<usize> {
    const SPELLINGS: [&[u8]; 3] = [b"infinity", b"inf", b"nan"];
    SPELLINGS
        .iter()
        .find(|s| bytes.len() >= s.len() && bytes[..s.len()].eq_ignore_ascii_case(s))
        .map(|s| s.len())
}

// =========================================================================
// Dates
// =========================================================================

const DAYS_IN_MONTH: [u32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Returns true if `year` is a Gregorian leap year.
#[inline]
pub fn is_leap_year(year: u32) -> bool {
    (year % 400 == 0) || (year % 100 != 0 && year % 4 == 0)
}

/// Returns true if the year/month/day triple names a real calendar day.
pub fn is_valid_date(year: u32, month: u32, day: u32) -> bool {
    if year == 0 || month == 0 || month > 12 || day == 0 {
        return false;
    }
    let last = if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[month as usize]
    };
    day <= last
}

fn digit_run(bytes: &[u8], min: usize, max: usize) -> Option<(u32, usize)> {
    let len = count_digits(bytes);
    if len < min || len > max {
        return None;
    }
    let value = bytes[..len]
        .iter()
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
    Some((value, len))
}

/// Parses a `YYYY-M-D` date and returns its `YYYYMMDD` encoding.
///
/// The whole input must match; a calendar-invalid day (such as `2023-02-29`)
/// does not parse.
///
/// ```
/// use cinder_core::parse::parse_date;
/// assert_eq!(parse_date("2024-02-29"), Some(20240229));
/// assert_eq!(parse_date("2023-02-29"), None);
/// assert_eq!(parse_date("2024-2-9"), Some(20240209));
/// ```
pub fn parse_date(text: &str) -> Option<i32> {
    let bytes = text.as_bytes();
    let (year, y_len) = digit_run(bytes, 4, 4)?;
    let mut pos = y_len;
    if bytes.get(pos) != Some(&b'-') {
        return None;
    }
    pos += 1;
    let (month, m_len) = digit_run(&bytes[pos..], 1, 2)?;
    pos += m_len;
    if bytes.get(pos) != Some(&b'-') {
        return None;
    }
    pos += 1;
    let (day, d_len) = digit_run(&bytes[pos..], 1, 2)?;
    pos += d_len;
    if pos != bytes.len() || !is_valid_date(year, month, day) {
        return None;
    }
    Some(encode_date(year, month, day))
}

/// Encodes a date as the integer `YYYYMMDD`.
#[inline]
pub fn encode_date(year: u32, month: u32, day: u32) -> i32 {
    (year * 10000 + month * 100 + day) as i32
}

/// Splits a `YYYYMMDD` encoding back into `(year, month, day)`.
#[inline]
pub fn decode_date(encoded: i32) -> (i32, i32, i32) {
    (encoded / 10000, (encoded / 100) % 100, encoded % 100)
}

// =========================================================================
// Formatting
// =========================================================================

/// Significant digits kept by [`format_float_general`].
const GENERAL_PRECISION: i32 = 6;

/// Formats a float like C's `%g`: six significant digits, fixed notation
/// when the decimal exponent is in `-4..6` and scientific otherwise, with
/// trailing zeros dropped either way.
///
/// ```
/// use cinder_core::parse::format_float_general;
/// assert_eq!(format_float_general(0.001), "0.001");
/// assert_eq!(format_float_general(3.14159), "3.14159");
/// assert_eq!(format_float_general(1e-5), "1e-05");
/// assert_eq!(format_float_general(1234567.0), "1.23457e+06");
/// ```
pub fn format_float_general(v: f32) -> String {
    if v.is_nan() {
        return String::from("nan");
    }
    if v.is_infinite() {
        return String::from(if v < 0.0 { "-inf" } else { "inf" });
    }
    if v == 0.0 {
        return String::from(if v.is_sign_negative() { "-0" } else { "0" });
    }
    // The exponent has to be taken after rounding to six digits.
    let scientific = format!("{:.5e}", v);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };
    if (-4..GENERAL_PRECISION).contains(&exponent) {
        let decimals = (GENERAL_PRECISION - 1 - exponent) as usize;
        let fixed = format!("{:.*}", decimals, v);
        String::from(trim_fraction(&fixed))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
