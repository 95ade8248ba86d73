use crate::error::check_len;
use crate::*;
use num_enum::TryFromPrimitive;
use rand_core::{CryptoRng, RngCore};
use std::convert::TryFrom;
use std::ops::Add;

/// A yes/no vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum Vote {
    No = 0,
    Yes = 1,
}

impl Vote {
    /// Interpret an integer plaintext as a vote, rejecting anything outside {0, 1}
    pub fn from_plaintext(plaintext: i64) -> Result<Self, Error> {
        u8::try_from(plaintext)
            .ok()
            .and_then(|v| Vote::try_from(v).ok())
            .ok_or(Error::UnsupportedPlaintext(plaintext))
    }

    /// Position of this vote's branch in a well-formedness proof
    pub fn index(self) -> usize {
        self as usize
    }

    /// The alternative the voter did not choose
    pub fn other(self) -> Vote {
        match self {
            Vote::No => Vote::Yes,
            Vote::Yes => Vote::No,
        }
    }

    /// `g^vote`
    pub fn encode(self) -> GroupElement {
        encode(self as i64)
    }

    /// Encrypt this vote. See [`EncryptedVote::encrypt`].
    pub fn encrypt<R: RngCore + CryptoRng + ?Sized>(
        self,
        rng: &mut R,
        pk: &GroupElement,
    ) -> Result<(EncryptedVote, Scalar), Error> {
        EncryptedVote::encrypt(rng, self as i64, pk)
    }
}

/// Map an integer plaintext to `g^plaintext`.
///
/// Any integer is accepted here; only 0 and 1 can later be proven well-formed.
pub fn encode(plaintext: i64) -> GroupElement {
    GroupElement::base_mul(&Scalar::from_i64(plaintext))
}

/// An EC-ElGamal ciphertext `(A, B) = (g^r, pk^r · g^m)`.
///
/// Because the scheme is additively homomorphic this represents a single vote
/// as well as the sum of any number of votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedVote {
    pub a: GroupElement,
    pub b: GroupElement,
}

impl EncryptedVote {
    pub const NUM_BYTES: usize = 2 * GroupElement::NUM_BYTES;

    /// Encryption of zero with zero randomness: the neutral element for `+`
    pub fn identity() -> Self {
        EncryptedVote {
            a: GroupElement::identity(),
            b: GroupElement::identity(),
        }
    }

    /// Encrypt `plaintext` under `pk`.
    ///
    /// Also returns the encryption randomness `r`, which is only needed to
    /// build the well-formedness proof and should be dropped right after.
    pub fn encrypt<R: RngCore + CryptoRng + ?Sized>(
        rng: &mut R,
        plaintext: i64,
        pk: &GroupElement,
    ) -> Result<(Self, Scalar), Error> {
        let (r, a) = GroupElement::random(rng)?;
        let b = *pk * r + encode(plaintext);
        Ok((EncryptedVote { a, b }, r))
    }

    /// Decrypt a ciphertext whose plaintext is known to lie in `[0, bound]`.
    ///
    /// If the ciphertext is the sum of `m` yes/no votes, `m` is a valid bound.
    pub fn decrypt(&self, sk: &Scalar, bound: u64) -> Result<u64, Error> {
        let target = self.b - self.a * *sk;
        solve_discrete_log(&target, bound)
    }

    pub fn to_bytes(&self) -> [u8; EncryptedVote::NUM_BYTES] {
        let mut buf = [0u8; EncryptedVote::NUM_BYTES];
        buf[..GroupElement::NUM_BYTES].copy_from_slice(&self.a.to_bytes());
        buf[GroupElement::NUM_BYTES..].copy_from_slice(&self.b.to_bytes());
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        check_len(bytes, EncryptedVote::NUM_BYTES)?;
        Ok(EncryptedVote {
            a: GroupElement::from_bytes(&bytes[..GroupElement::NUM_BYTES])?,
            b: GroupElement::from_bytes(&bytes[GroupElement::NUM_BYTES..])?,
        })
    }
}

/// Homomorphic sum: decrypts to the sum of both plaintexts
impl Add for EncryptedVote {
    type Output = EncryptedVote;

    fn add(self, rhs: EncryptedVote) -> EncryptedVote {
        EncryptedVote {
            a: self.a + rhs.a,
            b: self.b + rhs.b,
        }
    }
}
