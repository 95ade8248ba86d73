use crate::error::check_len;
use crate::*;
use ark_bn254::Fr;
use ark_ff::{BigInt, BigInteger, Field, PrimeField, Zero};
use rand_core::{CryptoRng, RngCore};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// An element of Z_q, q being the order of the BN254 G1 group.
///
/// The inner field element is always canonical, so every `Scalar` in
/// existence is already range-checked.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Scalar(pub(crate) Fr);

impl Scalar {
    /// Size of the big-endian binary encoding
    pub const NUM_BYTES: usize = 32;

    pub fn zero() -> Self {
        Scalar(Fr::zero())
    }

    pub fn one() -> Self {
        Scalar(Fr::ONE)
    }

    /// Reduce a signed integer into Z_q. Negative values map to `q - |v|`.
    pub fn from_i64(v: i64) -> Self {
        let abs = Scalar(Fr::from(v.unsigned_abs()));
        if v < 0 {
            -abs
        } else {
            abs
        }
    }

    /// Draw a uniformly random non-zero scalar.
    ///
    /// 64 bytes are reduced modulo q so the bias is negligible.
    pub fn random<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Self, Error> {
        let mut wide = [0u8; 64];
        loop {
            rng.try_fill_bytes(&mut wide)?;
            let candidate = Fr::from_be_bytes_mod_order(&wide);
            if !candidate.is_zero() {
                return Ok(Scalar(candidate));
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// 32-byte big-endian encoding
    pub fn to_bytes(&self) -> [u8; Scalar::NUM_BYTES] {
        let mut buf = [0u8; Scalar::NUM_BYTES];
        buf.copy_from_slice(&self.0.into_bigint().to_bytes_be());
        buf
    }

    /// Decode a 32-byte big-endian integer, rejecting values `>= q`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        check_len(bytes, Scalar::NUM_BYTES)?;
        let inner = Fr::from_bigint(bigint_from_be(bytes)).ok_or(Error::FieldRangeError)?;
        Ok(Scalar(inner))
    }
}

/// Read 32 big-endian bytes into arkworks' little-endian limbs, without reduction
pub(crate) fn bigint_from_be(bytes: &[u8]) -> BigInt<4> {
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let end = bytes.len() - 8 * i;
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[end - 8..end]);
        *limb = u64::from_be_bytes(word);
    }
    BigInt::new(limbs)
}

impl From<u64> for Scalar {
    fn from(v: u64) -> Self {
        Scalar(Fr::from(v))
    }
}

impl From<u128> for Scalar {
    fn from(v: u128) -> Self {
        Scalar(Fr::from(v))
    }
}

impl Add for Scalar {
    type Output = Scalar;

    fn add(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 + rhs.0)
    }
}

impl Sub for Scalar {
    type Output = Scalar;

    fn sub(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 - rhs.0)
    }
}

impl Mul for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 * rhs.0)
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        Scalar(-self.0)
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Scalar({})", self.to_hex())
    }
}

impl_serde_hex!(Scalar, ScalarHex);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    fn modulus_bytes() -> Vec<u8> {
        <Fr as PrimeField>::MODULUS.to_bytes_be()
    }

    #[test]
    fn test_round_trip() {
        let scalar = Scalar::random(&mut OsRng).unwrap();
        let bytes = scalar.to_bytes();
        assert_eq!(Scalar::from_bytes(&bytes).unwrap(), scalar);

        let json = serde_json::to_string(&scalar).unwrap();
        let decoded: Scalar = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, scalar);
    }

    #[test]
    fn test_big_endian() {
        let bytes = Scalar::from(0x0102u64).to_bytes();
        assert_eq!(bytes[30], 0x01);
        assert_eq!(bytes[31], 0x02);
        assert!(bytes[..30].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_reject_modulus() {
        let modulus = modulus_bytes();
        assert!(matches!(
            Scalar::from_bytes(&modulus),
            Err(Error::FieldRangeError)
        ));

        // q - 1 is the largest accepted value
        let max = (-Scalar::one()).to_bytes();
        let mut below = modulus.clone();
        below[31] -= 1;
        assert_eq!(&max[..], &below[..]);
        assert!(Scalar::from_bytes(&below).is_ok());

        assert!(matches!(
            Scalar::from_bytes(&[0xff; 32]),
            Err(Error::FieldRangeError)
        ));
    }

    #[test]
    fn test_reject_wrong_length() {
        let bytes = Scalar::one().to_bytes();
        assert!(matches!(
            Scalar::from_bytes(&bytes[..31]),
            Err(Error::MalformedEncoding {
                expected: 32,
                found: 31
            })
        ));

        let mut long = bytes.to_vec();
        long.push(0);
        assert!(matches!(
            Scalar::from_bytes(&long),
            Err(Error::MalformedEncoding { .. })
        ));
    }

    #[test]
    fn test_arithmetic() {
        let a = Scalar::from(7u64);
        let b = Scalar::from(5u64);
        assert_eq!(a + b, Scalar::from(12u64));
        assert_eq!(a - b, Scalar::from(2u64));
        assert_eq!(a * b, Scalar::from(35u64));
        assert_eq!(b - a, Scalar::from_i64(-2));
        assert_eq!(a + (-a), Scalar::zero());
        assert_eq!(Scalar::from_i64(-1), -Scalar::one());
        assert_eq!(Scalar::from_i64(9), Scalar::from(9u64));
    }

    #[test]
    fn test_random_is_nonzero() {
        for _ in 0..32 {
            assert!(!Scalar::random(&mut OsRng).unwrap().is_zero());
        }
    }
}
