// Fixed-width values travel through JSON as lowercase hex of their binary encoding.
// Decoding always goes back through `from_bytes`, so range and curve checks apply.
use crate::{Challenge, Error, GroupElement, Scalar};
use std::borrow::Cow;

pub use hex_buffer_serde::Hex;

// a single-purpose type for use in `#[serde(with)]`
pub enum ScalarHex {}

impl Hex<Scalar> for ScalarHex {
    type Error = Error;

    fn create_bytes(scalar: &Scalar) -> Cow<'_, [u8]> {
        Cow::from(scalar.to_bytes().to_vec())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Scalar, Error> {
        Scalar::from_bytes(bytes)
    }
}

// a single-purpose type for use in `#[serde(with)]`
pub enum GroupElementHex {}

impl Hex<GroupElement> for GroupElementHex {
    type Error = Error;

    fn create_bytes(point: &GroupElement) -> Cow<'_, [u8]> {
        Cow::from(point.to_bytes().to_vec())
    }

    fn from_bytes(bytes: &[u8]) -> Result<GroupElement, Error> {
        GroupElement::from_bytes(bytes)
    }
}

// a single-purpose type for use in `#[serde(with)]`
pub enum ChallengeHex {}

impl Hex<Challenge> for ChallengeHex {
    type Error = Error;

    fn create_bytes(challenge: &Challenge) -> Cow<'_, [u8]> {
        Cow::from(challenge.to_bytes().to_vec())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Challenge, Error> {
        Challenge::from_bytes(bytes)
    }
}

/// Implements `to_hex`, `FromHex`, `Serialize` and `Deserialize` for `$type`
/// by way of its `Hex` helper `$hex`.
macro_rules! impl_serde_hex {
    ($type:ty, $hex:ty) => {
        impl $type {
            /// Lowercase hex of the binary encoding
            pub fn to_hex(&self) -> String {
                hex::encode(self.to_bytes())
            }
        }

        impl hex::FromHex for $type {
            type Error = crate::Error;

            fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, Self::Error> {
                let bytes = hex::decode(hex)?;
                <$hex as crate::serde_hex::Hex<$type>>::from_bytes(&bytes)
            }
        }

        impl serde::Serialize for $type {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                <$hex as crate::serde_hex::Hex<$type>>::serialize(self, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $type {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                <$hex as crate::serde_hex::Hex<$type>>::deserialize(deserializer)
            }
        }
    };
}
