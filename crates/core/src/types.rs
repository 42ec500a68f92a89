//! Data type definitions for Cinder.
//!
//! This module defines the attribute type tag carried by every value and column.

use core::fmt;

/// Display names of every attribute type, indexed by tag ordinal.
pub const ATTR_TYPE_NAMES: [&str; 7] = [
    "undefined",
    "chars",
    "ints",
    "dates",
    "floats",
    "null",
    "booleans",
];

/// Attribute type tag.
///
/// The declaration order matches `ATTR_TYPE_NAMES`, which is also the spelling
/// used by catalog type declarations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    /// Unknown or unparsable type
    #[default]
    Undefined,
    /// Text
    Chars,
    /// 32-bit signed integer
    Ints,
    /// Calendar date encoded as `YYYYMMDD`
    Dates,
    /// 32-bit floating point number
    Floats,
    /// The SQL NULL tag
    Null,
    /// Boolean
    Booleans,
}

impl DataType {
    const ALL: [DataType; 7] = [
        DataType::Undefined,
        DataType::Chars,
        DataType::Ints,
        DataType::Dates,
        DataType::Floats,
        DataType::Null,
        DataType::Booleans,
    ];

    /// Returns the catalog name of this type.
    pub fn name(&self) -> &'static str {
        ATTR_TYPE_NAMES[*self as usize]
    }

    /// Parses a catalog type name. Unknown names map to `Undefined`.
    pub fn from_name(name: &str) -> DataType {
        ATTR_TYPE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| Self::ALL[i])
            .unwrap_or(DataType::Undefined)
    }

    /// Returns whether values of this type have a fixed 4-byte representation.
    pub fn is_fixed_size(&self) -> bool {
        !matches!(self, DataType::Chars | DataType::Undefined)
    }

    /// Returns whether this type is numeric (ints or floats).
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Ints | DataType::Floats)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
