use crate::error::check_len;
use crate::scalar::bigint_from_be;
use crate::*;
use ark_bn254::{Fq, G1Affine, G1Projective};
use ark_ec::{CurveGroup, Group};
use ark_ff::{BigInteger, PrimeField, Zero};
use rand_core::{CryptoRng, RngCore};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

const NUM_BYTES_COORDINATE: usize = 32;

/// An element of the BN254 G1 group, written additively.
///
/// `GroupElement::generator() * k` is what the protocol literature writes `g^k`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct GroupElement(G1Projective);

impl GroupElement {
    /// Size of the `x ‖ y` encoding
    pub const NUM_BYTES: usize = 2 * NUM_BYTES_COORDINATE;

    pub fn generator() -> Self {
        GroupElement(G1Projective::generator())
    }

    pub fn identity() -> Self {
        GroupElement(G1Projective::zero())
    }

    pub fn is_identity(&self) -> bool {
        self.0.is_zero()
    }

    /// `g^k` for the fixed generator
    pub fn base_mul(k: &Scalar) -> Self {
        GroupElement::generator() * *k
    }

    /// Draw a random non-zero exponent together with its generator multiple.
    ///
    /// This is the ephemeral commitment source for every proof in the crate.
    pub fn random<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<(Scalar, Self), Error> {
        let k = Scalar::random(rng)?;
        Ok((k, GroupElement::base_mul(&k)))
    }

    /// Affine `x ‖ y`, each coordinate 32 bytes big-endian. The identity is all zeros.
    pub fn to_bytes(&self) -> [u8; GroupElement::NUM_BYTES] {
        let mut buf = [0u8; GroupElement::NUM_BYTES];
        let affine = self.0.into_affine();
        if affine.infinity {
            return buf;
        }
        buf[..NUM_BYTES_COORDINATE].copy_from_slice(&affine.x.into_bigint().to_bytes_be());
        buf[NUM_BYTES_COORDINATE..].copy_from_slice(&affine.y.into_bigint().to_bytes_be());
        buf
    }

    /// Decode `x ‖ y`, rejecting wrong lengths, out-of-range coordinates and
    /// points off the curve. G1 has cofactor 1, so on-curve points are in the group.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        check_len(bytes, GroupElement::NUM_BYTES)?;
        if bytes.iter().all(|b| *b == 0) {
            return Ok(GroupElement::identity());
        }

        let x = coordinate(&bytes[..NUM_BYTES_COORDINATE])?;
        let y = coordinate(&bytes[NUM_BYTES_COORDINATE..])?;
        let point = G1Affine::new_unchecked(x, y);
        if !point.is_on_curve() || !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(Error::InvalidGroupElement);
        }
        Ok(GroupElement(point.into()))
    }
}

fn coordinate(bytes: &[u8]) -> Result<Fq, Error> {
    Fq::from_bigint(bigint_from_be(bytes)).ok_or(Error::InvalidGroupElement)
}

impl Add for GroupElement {
    type Output = GroupElement;

    fn add(self, rhs: GroupElement) -> GroupElement {
        GroupElement(self.0 + rhs.0)
    }
}

impl Sub for GroupElement {
    type Output = GroupElement;

    fn sub(self, rhs: GroupElement) -> GroupElement {
        GroupElement(self.0 - rhs.0)
    }
}

impl Neg for GroupElement {
    type Output = GroupElement;

    fn neg(self) -> GroupElement {
        GroupElement(-self.0)
    }
}

impl Mul<Scalar> for GroupElement {
    type Output = GroupElement;

    fn mul(self, k: Scalar) -> GroupElement {
        GroupElement(self.0 * k.0)
    }
}

impl fmt::Debug for GroupElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GroupElement({})", self.to_hex())
    }
}

impl_serde_hex!(GroupElement, GroupElementHex);
