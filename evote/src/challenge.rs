use crate::error::check_len;
use crate::*;
use digest::Digest;
use rand_core::{CryptoRng, RngCore};
use sha3::Keccak256;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A 128-bit verifier challenge. All arithmetic is modulo 2^128.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Challenge(u128);

impl Challenge {
    pub const NUM_BYTES: usize = 16;

    pub fn zero() -> Self {
        Challenge(0)
    }

    /// Non-interactive challenge for a transcript of group elements.
    ///
    /// Keccak-256 over the concatenated 64-byte encodings; the low 16 bytes
    /// of the digest are the challenge. Order of `transcript` is part of the proof.
    pub fn fiat_shamir(transcript: &[&GroupElement]) -> Self {
        let mut hasher = Keccak256::new();
        for element in transcript {
            hasher.update(element.to_bytes());
        }
        let digest = hasher.finalize();

        let mut low = [0u8; Challenge::NUM_BYTES];
        low.copy_from_slice(&digest[Challenge::NUM_BYTES..]);
        Challenge(u128::from_be_bytes(low))
    }

    /// Uniform challenge in `[0, 2^128)`, used to simulate a proof branch
    pub fn random<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Self, Error> {
        let mut buf = [0u8; Challenge::NUM_BYTES];
        rng.try_fill_bytes(&mut buf)?;
        Ok(Challenge(u128::from_be_bytes(buf)))
    }

    /// The same integer as an exponent. 2^128 < q, so this never wraps.
    pub fn to_scalar(&self) -> Scalar {
        Scalar::from(self.0)
    }

    pub fn to_bytes(&self) -> [u8; Challenge::NUM_BYTES] {
        self.0.to_be_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        check_len(bytes, Challenge::NUM_BYTES)?;
        let mut buf = [0u8; Challenge::NUM_BYTES];
        buf.copy_from_slice(bytes);
        Ok(Challenge(u128::from_be_bytes(buf)))
    }
}

impl From<u128> for Challenge {
    fn from(v: u128) -> Self {
        Challenge(v)
    }
}

impl Add for Challenge {
    type Output = Challenge;

    fn add(self, rhs: Challenge) -> Challenge {
        Challenge(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Challenge {
    type Output = Challenge;

    fn sub(self, rhs: Challenge) -> Challenge {
        Challenge(self.0.wrapping_sub(rhs.0))
    }
}

impl Mul for Challenge {
    type Output = Challenge;

    fn mul(self, rhs: Challenge) -> Challenge {
        Challenge(self.0.wrapping_mul(rhs.0))
    }
}

impl Neg for Challenge {
    type Output = Challenge;

    fn neg(self) -> Challenge {
        Challenge(self.0.wrapping_neg())
    }
}

impl fmt::Debug for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Challenge({})", self.0)
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl_serde_hex!(Challenge, ChallengeHex);
