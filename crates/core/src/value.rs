//! Value type definitions for Cinder.
//!
//! This module defines the `Value` enum, the typed scalar that flows through
//! every tuple cell, accumulator slot and statement literal.
//!
//! Conversions between tags are best effort: text that does not parse as a
//! number converts to zero instead of failing. Comparisons are strict: a pair of
//! tags without a defined ordering is reported as an error.

use crate::error::{Error, Result};
use crate::parse::{decode_date, parse_date, parse_float_prefix, parse_int_prefix};
use crate::types::DataType;
use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use log::{trace, warn};

/// Tolerance used when comparing or testing floats for zero.
pub const EPSILON: f32 = 1e-6;

/// Byte size of every fixed-size representation.
const FIXED_LEN: usize = 4;

/// A value that can be stored in a tuple cell.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
    /// Boolean value
    Boolean(bool),
    /// Date encoded as `YYYYMMDD`
    Date(i32),
    /// Text, kept as the raw bytes it was built from
    Chars(Vec<u8>),
}

impl Value {
    /// Builds a value from a text buffer, promoting well-formed dates.
    ///
    /// `len` limits how many bytes are considered (0 means the whole buffer);
    /// the text ends at the first NUL byte either way. If the resulting text is
    /// a calendar-valid `YYYY-M-D` date the value is a `Date`, otherwise it is
    /// `Chars`.
    pub fn from_text(s: &[u8], len: usize) -> Self {
        let text = text_from_bytes(s, len);
        match core::str::from_utf8(&text).ok().and_then(parse_date) {
            Some(date) => Value::Date(date),
            None => Value::Chars(text),
        }
    }

    /// Builds a text value without date promotion.
    pub fn chars(s: impl Into<Vec<u8>>) -> Self {
        Value::Chars(s.into())
    }

    /// Returns the attribute type tag of this value.
    pub fn attr_type(&self) -> DataType {
        match self {
            Value::Null => DataType::Null,
            Value::Int(_) => DataType::Ints,
            Value::Float(_) => DataType::Floats,
            Value::Boolean(_) => DataType::Booleans,
            Value::Date(_) => DataType::Dates,
            Value::Chars(_) => DataType::Chars,
        }
    }

    /// Returns true if this value is Null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Byte size of the active representation.
    pub fn length(&self) -> usize {
        match self {
            Value::Chars(s) => s.len(),
            _ => FIXED_LEN,
        }
    }

    pub fn set_int(&mut self, val: i32) {
        *self = Value::Int(val);
    }

    pub fn set_float(&mut self, val: f32) {
        *self = Value::Float(val);
    }

    pub fn set_boolean(&mut self, val: bool) {
        *self = Value::Boolean(val);
    }

    /// Stores text. See [`Value::from_text`] for how `len` bounds the input;
    /// no date promotion happens here.
    pub fn set_string(&mut self, s: &[u8], len: usize) {
        *self = Value::Chars(text_from_bytes(s, len));
    }

    pub fn set_date(&mut self, val: i32) {
        *self = Value::Date(val);
    }

    pub fn set_null(&mut self) {
        *self = Value::Null;
    }

    /// Copies another value into this one, whatever its tag.
    pub fn set_value(&mut self, other: &Value) {
        self.clone_from(other);
    }

    /// Reinterprets `data` according to the current tag.
    ///
    /// Fixed-size tags read the first four bytes (little endian); text copies
    /// up to the first NUL. A null value stays null.
    pub fn set_data(&mut self, data: &[u8]) -> Result<()> {
        match self {
            Value::Chars(s) => *s = text_from_bytes(data, data.len()),
            Value::Int(v) => *v = read_i32(data)?,
            Value::Float(v) => *v = f32::from_bits(read_i32(data)? as u32),
            Value::Boolean(v) => *v = read_i32(data)? != 0,
            Value::Date(v) => *v = read_i32(data)?,
            Value::Null => {}
        }
        Ok(())
    }

    /// Returns a read-only byte view of the active representation.
    pub fn data(&self) -> Cow<'_, [u8]> {
        match self {
            Value::Chars(s) => Cow::Borrowed(s),
            Value::Int(v) | Value::Date(v) => Cow::Owned(v.to_le_bytes().to_vec()),
            Value::Float(v) => Cow::Owned(v.to_le_bytes().to_vec()),
            Value::Boolean(v) => Cow::Owned(i32::from(*v).to_le_bytes().to_vec()),
            Value::Null => Cow::Owned(Vec::from([0u8; FIXED_LEN])),
        }
    }

    /// Converts to an integer. Unparsable text, dates and null give 0.
    pub fn get_int(&self) -> i32 {
        match self {
            Value::Chars(s) => match parse_int_prefix(text_prefix(s)) {
                Some(v) => v as i32,
                None => {
                    trace!(
                        "failed to convert string to number. s={}",
                        String::from_utf8_lossy(s)
                    );
                    0
                }
            },
            Value::Int(v) => *v,
            Value::Float(v) => *v as i32,
            Value::Boolean(v) => i32::from(*v),
            Value::Date(_) | Value::Null => {
                warn!("cannot convert {} to int", self.attr_type());
                0
            }
        }
    }

    /// Converts to a float. Unparsable text, dates and null give 0.0.
    pub fn get_float(&self) -> f32 {
        match self {
            Value::Chars(s) => text_to_float(s),
            Value::Int(v) => *v as f32,
            Value::Float(v) => *v,
            Value::Boolean(v) => {
                if *v {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Date(_) | Value::Null => {
                warn!("cannot convert {} to float", self.attr_type());
                0.0
            }
        }
    }

    /// Converts to a boolean.
    ///
    /// Text is truthy when it parses to a non-zero float or a non-zero
    /// integer, and otherwise whenever it is non-empty (so `"0"` is true).
    pub fn get_boolean(&self) -> bool {
        match self {
            Value::Chars(s) => {
                let text = text_prefix(s);
                let Some(val) = parse_float_prefix(text) else {
                    trace!(
                        "failed to convert string to float. s={}",
                        String::from_utf8_lossy(s)
                    );
                    return !s.is_empty();
                };
                if !is_float_zero(val) {
                    return true;
                }
                match parse_int_prefix(text) {
                    Some(v) if v as i32 != 0 => true,
                    _ => !s.is_empty(),
                }
            }
            Value::Int(v) => *v != 0,
            Value::Float(v) => !is_float_zero(*v),
            Value::Boolean(v) => *v,
            Value::Date(_) | Value::Null => {
                warn!("cannot convert {} to boolean", self.attr_type());
                false
            }
        }
    }

    /// Returns the text rendering of this value.
    pub fn get_string(&self) -> String {
        self.to_string()
    }

    /// Compares two values.
    ///
    /// Same-tag pairs compare directly; int/float pairs compare as floats and
    /// text against a number is parsed as a float first (unparsable text counts
    /// as 0.0). Null on either side and every other tag pair cannot be ordered.
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        match (self, other) {
            (Value::Null, _) | (_, Value::Null) => {
                Err(Error::not_comparable(self.attr_type(), other.attr_type()))
            }
            (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => Ok(compare_float(*a, *b)),
            (Value::Chars(a), Value::Chars(b)) => Ok(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Ok(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
            (Value::Int(a), Value::Float(b)) => Ok(compare_float(*a as f32, *b)),
            (Value::Float(a), Value::Int(b)) => Ok(compare_float(*a, *b as f32)),
            (Value::Chars(a), Value::Int(b)) => Ok(compare_float(text_to_float(a), *b as f32)),
            (Value::Chars(a), Value::Float(b)) => Ok(compare_float(text_to_float(a), *b)),
            (Value::Int(a), Value::Chars(b)) => Ok(compare_float(*a as f32, text_to_float(b))),
            (Value::Float(a), Value::Chars(b)) => Ok(compare_float(*a, text_to_float(b))),
            _ => {
                warn!(
                    "comparison not supported: {} vs {}",
                    self.attr_type(),
                    other.attr_type()
                );
                Err(Error::not_comparable(self.attr_type(), other.attr_type()))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => f.write_str(&float_to_string(*v)),
            Value::Boolean(v) => write!(f, "{}", i32::from(*v)),
            Value::Date(v) => {
                let (year, month, day) = decode_date(*v);
                write!(f, "{:04}-{:02}-{:02}", year, month, day)
            }
            Value::Chars(s) => f.write_str(&String::from_utf8_lossy(s)),
        }
    }
}

/// Renders a float with at most two decimals, dropping trailing zeros and a
/// dangling decimal point.
fn float_to_string(v: f32) -> String {
    let mut s = alloc::format!("{:.2}", v);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    s
}

fn text_from_bytes(s: &[u8], len: usize) -> Vec<u8> {
    let bounded = if len > 0 { &s[..len.min(s.len())] } else { s };
    let end = bounded.iter().position(|b| *b == 0).unwrap_or(bounded.len());
    bounded[..end].to_vec()
}

/// Longest valid UTF-8 prefix of a text buffer. Numbers are ASCII, so
/// parsing this prefix sees the same digits as the raw bytes.
fn text_prefix(s: &[u8]) -> &str {
    match core::str::from_utf8(s) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&s[..e.valid_up_to()]).unwrap_or_default(),
    }
}

fn text_to_float(s: &[u8]) -> f32 {
    parse_float_prefix(text_prefix(s)).unwrap_or_else(|| {
        trace!(
            "failed to convert string to float. s={}",
            String::from_utf8_lossy(s)
        );
        0.0
    })
}

fn read_i32(data: &[u8]) -> Result<i32> {
    let bytes: [u8; FIXED_LEN] = data
        .get(..FIXED_LEN)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| Error::invalid_argument("fixed-size value needs 4 bytes"))?;
    Ok(i32::from_le_bytes(bytes))
}

#[inline]
fn is_float_zero(v: f32) -> bool {
    v < EPSILON && v > -EPSILON
}

fn compare_float(a: f32, b: f32) -> Ordering {
    let diff = a - b;
    if diff > EPSILON {
        Ordering::Greater
    } else if diff < -EPSILON {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::from_text(v.as_bytes(), 0)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}
