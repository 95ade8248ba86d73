use crate::error::check_len;
use crate::*;
use rand_core::{CryptoRng, RngCore};

/// Chaum-Pedersen proof that a ciphertext `(A, B)` decrypts to a claimed
/// count `n` under the secret key behind `pk`.
///
/// Shows `log_g(pk) = log_A(B - n·g)` without revealing the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOfCorrectDecryption {
    s: Scalar,
    c: Challenge,
}

impl ProofOfCorrectDecryption {
    pub const NUM_BYTES: usize = Scalar::NUM_BYTES + Challenge::NUM_BYTES;

    pub fn prove<R: RngCore + CryptoRng + ?Sized>(
        rng: &mut R,
        ciphertext: &EncryptedVote,
        key_pair: &KeyPair,
    ) -> Result<Self, Error> {
        let (r, v) = GroupElement::random(rng)?;
        let u = ciphertext.a * r;
        let c = Challenge::fiat_shamir(&[key_pair.pk(), &ciphertext.a, &ciphertext.b, &u, &v]);
        let s = r + c.to_scalar() * *key_pair.sk();
        Ok(ProofOfCorrectDecryption { s, c })
    }

    /// Verify that `ciphertext` decrypts to `claimed` under `pk`
    pub fn verify(
        &self,
        ciphertext: &EncryptedVote,
        claimed: u64,
        pk: &GroupElement,
    ) -> Result<(), Error> {
        let c = self.c.to_scalar();
        let d = ciphertext.b - GroupElement::base_mul(&Scalar::from(claimed));
        let u = ciphertext.a * self.s - d * c;
        let v = GroupElement::base_mul(&self.s) - *pk * c;

        if Challenge::fiat_shamir(&[pk, &ciphertext.a, &ciphertext.b, &u, &v]) != self.c {
            debug!("decryption proof rejected for claimed count {}", claimed);
            return Err(Error::ProofInvalid("correct decryption"));
        }
        Ok(())
    }

    pub fn s(&self) -> &Scalar {
        &self.s
    }

    pub fn c(&self) -> &Challenge {
        &self.c
    }

    pub fn to_bytes(&self) -> [u8; ProofOfCorrectDecryption::NUM_BYTES] {
        let mut buf = [0u8; ProofOfCorrectDecryption::NUM_BYTES];
        buf[..Scalar::NUM_BYTES].copy_from_slice(&self.s.to_bytes());
        buf[Scalar::NUM_BYTES..].copy_from_slice(&self.c.to_bytes());
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        check_len(bytes, ProofOfCorrectDecryption::NUM_BYTES)?;
        Ok(ProofOfCorrectDecryption {
            s: Scalar::from_bytes(&bytes[..Scalar::NUM_BYTES])?,
            c: Challenge::from_bytes(&bytes[Scalar::NUM_BYTES..])?,
        })
    }
}

/// Decrypt a summed ciphertext whose plaintext is at most `bound`, and prove
/// the result correct
pub fn decrypt_tally_with_proof<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
    tally: &EncryptedVote,
    bound: u64,
    key_pair: &KeyPair,
) -> Result<(u64, ProofOfCorrectDecryption), Error> {
    let count = tally.decrypt(key_pair.sk(), bound)?;
    let proof = ProofOfCorrectDecryption::prove(rng, tally, key_pair)?;
    Ok((count, proof))
}
