use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Element data types that can be laid out in linear memory
///
/// Only the two types the scaling routine touches are modelled: the `f32`
/// lanes of an interleaved buffer and the complex pair they form.
#[derive(
    Default, Display, EnumString, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Single-precision floating point (f32)
    Float32,
    /// Single-precision complex number, two interleaved f32 values
    #[default]
    Complex64,
}

impl DataType {
    /// Returns the size of one element in bytes
    #[must_use]
    pub const fn bytes_per_element(&self) -> usize {
        match self {
            Self::Float32 => 4,
            Self::Complex64 => 8,
        }
    }

    /// Byte offset of element `index` in a densely packed array of this type
    #[must_use]
    pub const fn byte_offset(&self, index: usize) -> usize {
        index * self.bytes_per_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_bytes_per_element() {
        assert_eq!(DataType::Float32.bytes_per_element(), 4);
        assert_eq!(DataType::Complex64.bytes_per_element(), 8);
        assert_eq!(DataType::Complex64.byte_offset(5), 40);
    }

    #[test]
    fn test_names_round_trip_through_strings() {
        assert_eq!(DataType::Complex64.to_string(), "complex64");
        assert_eq!(DataType::from_str("float32").unwrap(), DataType::Float32);
        assert!(DataType::from_str("float64").is_err());
    }
}
