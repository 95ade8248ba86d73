use crate::error::check_len;
use crate::*;
use rand_core::{CryptoRng, RngCore};
use std::convert::TryFrom;
use std::fmt;

/// The election authority's ElGamal key pair, with `pk = g^sk`.
///
/// The secret key never appears in `Debug` output. Serialized forms do carry
/// it and must only be written to trusted storage.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KeyPairFields")]
pub struct KeyPair {
    pk: GroupElement,
    sk: Scalar,
}

#[derive(Deserialize)]
struct KeyPairFields {
    pk: GroupElement,
    sk: Scalar,
}

impl TryFrom<KeyPairFields> for KeyPair {
    type Error = Error;

    fn try_from(fields: KeyPairFields) -> Result<Self, Error> {
        KeyPair::from_parts(fields.pk, fields.sk)
    }
}

impl KeyPair {
    /// Size of the `pk ‖ sk` encoding
    pub const NUM_BYTES: usize = GroupElement::NUM_BYTES + Scalar::NUM_BYTES;

    /// Generate a fresh key pair
    pub fn new<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Self, Error> {
        let (sk, pk) = GroupElement::random(rng)?;
        Ok(KeyPair { pk, sk })
    }

    /// Derive the public key from an existing secret key
    pub fn from_secret(sk: Scalar) -> Self {
        KeyPair {
            pk: GroupElement::base_mul(&sk),
            sk,
        }
    }

    /// Assemble a key pair, checking that `pk = g^sk`
    pub fn from_parts(pk: GroupElement, sk: Scalar) -> Result<Self, Error> {
        if GroupElement::base_mul(&sk) != pk {
            return Err(Error::MismatchedKeyPair);
        }
        Ok(KeyPair { pk, sk })
    }

    pub fn pk(&self) -> &GroupElement {
        &self.pk
    }

    pub fn sk(&self) -> &Scalar {
        &self.sk
    }

    pub fn to_bytes(&self) -> [u8; KeyPair::NUM_BYTES] {
        let mut buf = [0u8; KeyPair::NUM_BYTES];
        buf[..GroupElement::NUM_BYTES].copy_from_slice(&self.pk.to_bytes());
        buf[GroupElement::NUM_BYTES..].copy_from_slice(&self.sk.to_bytes());
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        check_len(bytes, KeyPair::NUM_BYTES)?;
        let pk = GroupElement::from_bytes(&bytes[..GroupElement::NUM_BYTES])?;
        let sk = Scalar::from_bytes(&bytes[GroupElement::NUM_BYTES..])?;
        KeyPair::from_parts(pk, sk)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("pk", &self.pk)
            .field("sk", &"<redacted>")
            .finish()
    }
}

/// Schnorr proof, made non-interactive with Fiat-Shamir, that the holder of
/// `pk` knows `sk` with `pk = g^sk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOfKeyKnowledge {
    s: Scalar,
    c: Challenge,
}

impl ProofOfKeyKnowledge {
    /// Size of the `s ‖ c` encoding
    pub const NUM_BYTES: usize = Scalar::NUM_BYTES + Challenge::NUM_BYTES;

    /// Prove knowledge of the secret key of `key_pair`
    pub fn prove<R: RngCore + CryptoRng + ?Sized>(
        rng: &mut R,
        key_pair: &KeyPair,
    ) -> Result<Self, Error> {
        let (r, v) = GroupElement::random(rng)?;
        let c = Challenge::fiat_shamir(&[key_pair.pk(), &v]);
        let s = r + c.to_scalar() * *key_pair.sk();
        Ok(ProofOfKeyKnowledge { s, c })
    }

    /// Verify the proof against `pk`
    pub fn verify(&self, pk: &GroupElement) -> Result<(), Error> {
        // V = g^s · pk^-c
        let v = GroupElement::base_mul(&self.s) - *pk * self.c.to_scalar();
        if Challenge::fiat_shamir(&[pk, &v]) != self.c {
            debug!("key knowledge proof rejected for pk {}", pk.to_hex());
            return Err(Error::ProofInvalid("secret key knowledge"));
        }
        Ok(())
    }

    pub fn s(&self) -> &Scalar {
        &self.s
    }

    pub fn c(&self) -> &Challenge {
        &self.c
    }

    pub fn to_bytes(&self) -> [u8; ProofOfKeyKnowledge::NUM_BYTES] {
        let mut buf = [0u8; ProofOfKeyKnowledge::NUM_BYTES];
        buf[..Scalar::NUM_BYTES].copy_from_slice(&self.s.to_bytes());
        buf[Scalar::NUM_BYTES..].copy_from_slice(&self.c.to_bytes());
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        check_len(bytes, ProofOfKeyKnowledge::NUM_BYTES)?;
        Ok(ProofOfKeyKnowledge {
            s: Scalar::from_bytes(&bytes[..Scalar::NUM_BYTES])?,
            c: Challenge::from_bytes(&bytes[Scalar::NUM_BYTES..])?,
        })
    }
}

/// Generate a key pair together with its proof of secret key knowledge
pub fn new_key_pair_with_proof<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
) -> Result<(KeyPair, ProofOfKeyKnowledge), Error> {
    let key_pair = KeyPair::new(rng)?;
    let proof = ProofOfKeyKnowledge::prove(rng, &key_pair)?;
    Ok((key_pair, proof))
}
