use crate::error::check_len;
use crate::*;
use rand_core::{CryptoRng, RngCore};

/// Disjunctive Chaum-Pedersen proof that an `EncryptedVote` encrypts 0 or 1,
/// without revealing which.
///
/// `(r0, c0)` answers branch 0 ("the vote is No") and `(r1, c1)` answers
/// branch 1 ("the vote is Yes"). One branch is simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOfWellFormedness {
    r0: Scalar,
    r1: Scalar,
    c0: Challenge,
    c1: Challenge,
}

impl ProofOfWellFormedness {
    pub const NUM_BYTES: usize = 2 * Scalar::NUM_BYTES + 2 * Challenge::NUM_BYTES;

    /// Prove that `ciphertext` encrypts `vote`, where `r` is the randomness
    /// that `EncryptedVote::encrypt` returned for it.
    pub fn prove<R: RngCore + CryptoRng + ?Sized>(
        rng: &mut R,
        ciphertext: &EncryptedVote,
        vote: Vote,
        r: &Scalar,
        pk: &GroupElement,
    ) -> Result<Self, Error> {
        let honest = vote.index();
        let cheat = vote.other();

        let mut commitments_a = [GroupElement::identity(); 2];
        let mut commitments_b = [GroupElement::identity(); 2];
        let mut responses = [Scalar::zero(); 2];
        let mut challenges = [Challenge::zero(); 2];

        // Simulated branch
        let c_cheat = Challenge::random(rng)?;
        let (r_cheat, v_cheat) = GroupElement::random(rng)?;
        let c_cheat_scalar = c_cheat.to_scalar();
        commitments_a[cheat.index()] = v_cheat - ciphertext.a * c_cheat_scalar;
        commitments_b[cheat.index()] =
            *pk * r_cheat - (ciphertext.b - cheat.encode()) * c_cheat_scalar;
        responses[cheat.index()] = r_cheat;
        challenges[cheat.index()] = c_cheat;

        // Real branch
        let (r_prime, a_honest) = GroupElement::random(rng)?;
        commitments_a[honest] = a_honest;
        commitments_b[honest] = *pk * r_prime;

        let c = Challenge::fiat_shamir(&[
            pk,
            &ciphertext.a,
            &ciphertext.b,
            &commitments_a[0],
            &commitments_b[0],
            &commitments_a[1],
            &commitments_b[1],
        ]);
        let c_honest = c - c_cheat;
        responses[honest] = r_prime + c_honest.to_scalar() * *r;
        challenges[honest] = c_honest;

        Ok(ProofOfWellFormedness {
            r0: responses[0],
            r1: responses[1],
            c0: challenges[0],
            c1: challenges[1],
        })
    }

    /// Verify that `ciphertext` encrypts 0 or 1 under `pk`
    pub fn verify(&self, ciphertext: &EncryptedVote, pk: &GroupElement) -> Result<(), Error> {
        let (c0, c1) = (self.c0.to_scalar(), self.c1.to_scalar());

        let a0 = GroupElement::base_mul(&self.r0) - ciphertext.a * c0;
        let a1 = GroupElement::base_mul(&self.r1) - ciphertext.a * c1;
        let b0 = *pk * self.r0 - ciphertext.b * c0;
        let b1 = *pk * self.r1 - (ciphertext.b - GroupElement::generator()) * c1;

        let c = Challenge::fiat_shamir(&[pk, &ciphertext.a, &ciphertext.b, &a0, &b0, &a1, &b1]);
        if self.c0 + self.c1 != c {
            debug!("well-formedness proof rejected for ciphertext {:?}", ciphertext);
            return Err(Error::ProofInvalid("vote well-formedness"));
        }
        Ok(())
    }

    pub fn r0(&self) -> &Scalar {
        &self.r0
    }

    pub fn r1(&self) -> &Scalar {
        &self.r1
    }

    pub fn c0(&self) -> &Challenge {
        &self.c0
    }

    pub fn c1(&self) -> &Challenge {
        &self.c1
    }

    pub fn to_bytes(&self) -> [u8; ProofOfWellFormedness::NUM_BYTES] {
        let mut buf = [0u8; ProofOfWellFormedness::NUM_BYTES];
        let (s, c) = (Scalar::NUM_BYTES, Challenge::NUM_BYTES);
        buf[..s].copy_from_slice(&self.r0.to_bytes());
        buf[s..2 * s].copy_from_slice(&self.r1.to_bytes());
        buf[2 * s..2 * s + c].copy_from_slice(&self.c0.to_bytes());
        buf[2 * s + c..].copy_from_slice(&self.c1.to_bytes());
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        check_len(bytes, ProofOfWellFormedness::NUM_BYTES)?;
        let (s, c) = (Scalar::NUM_BYTES, Challenge::NUM_BYTES);
        Ok(ProofOfWellFormedness {
            r0: Scalar::from_bytes(&bytes[..s])?,
            r1: Scalar::from_bytes(&bytes[s..2 * s])?,
            c0: Challenge::from_bytes(&bytes[2 * s..2 * s + c])?,
            c1: Challenge::from_bytes(&bytes[2 * s + c..])?,
        })
    }
}

/// An encrypted vote together with its proof of well-formedness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub vote: EncryptedVote,
    pub proof: ProofOfWellFormedness,
}

impl Ballot {
    /// Verify the ballot's proof under the election public key
    pub fn verify(&self, pk: &GroupElement) -> Result<(), Error> {
        self.proof.verify(&self.vote, pk)
    }
}

/// Encrypt `vote` under `pk` and prove the result is well-formed.
///
/// Fails with `UnsupportedPlaintext` before any randomness is drawn if `vote`
/// is not 0 or 1.
pub fn encrypt_vote_with_proof<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
    vote: i64,
    pk: &GroupElement,
) -> Result<Ballot, Error> {
    let vote = Vote::from_plaintext(vote)?;
    let (ciphertext, r) = vote.encrypt(rng, pk)?;
    let proof = ProofOfWellFormedness::prove(rng, &ciphertext, vote, &r, pk)?;
    Ok(Ballot {
        vote: ciphertext,
        proof,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_well_formed_votes_verify() {
        let key_pair = KeyPair::new(&mut OsRng).unwrap();

        for vote in &[0i64, 1] {
            let ballot = encrypt_vote_with_proof(&mut OsRng, *vote, key_pair.pk()).unwrap();
            ballot.verify(key_pair.pk()).unwrap();
            assert_eq!(
                ballot.vote.decrypt(key_pair.sk(), 1).unwrap(),
                *vote as u64
            );
        }
    }

    #[test]
    fn test_unsupported_plaintext() {
        let key_pair = KeyPair::new(&mut OsRng).unwrap();
        for vote in &[2i64, -1, 42] {
            assert!(matches!(
                encrypt_vote_with_proof(&mut OsRng, *vote, key_pair.pk()),
                Err(Error::UnsupportedPlaintext(v)) if v == *vote
            ));
        }
    }

    #[test]
    fn test_out_of_range_plaintext_does_not_verify() {
        // Forge a proof for an encryption of 2 by lying about the vote
        let key_pair = KeyPair::new(&mut OsRng).unwrap();
        let (ciphertext, r) = EncryptedVote::encrypt(&mut OsRng, 2, key_pair.pk()).unwrap();

        for claimed in &[Vote::No, Vote::Yes] {
            let proof =
                ProofOfWellFormedness::prove(&mut OsRng, &ciphertext, *claimed, &r, key_pair.pk())
                    .unwrap();
            assert!(matches!(
                proof.verify(&ciphertext, key_pair.pk()),
                Err(Error::ProofInvalid(_))
            ));
        }
    }

    #[test]
    fn test_wrong_vote_claim_does_not_verify() {
        let key_pair = KeyPair::new(&mut OsRng).unwrap();
        let (ciphertext, r) = Vote::Yes.encrypt(&mut OsRng, key_pair.pk()).unwrap();
        let proof =
            ProofOfWellFormedness::prove(&mut OsRng, &ciphertext, Vote::No, &r, key_pair.pk())
                .unwrap();
        assert!(proof.verify(&ciphertext, key_pair.pk()).is_err());
    }

    #[test]
    fn test_proof_is_bound_to_ciphertext_and_key() {
        let key_pair = KeyPair::new(&mut OsRng).unwrap();
        let other = KeyPair::new(&mut OsRng).unwrap();
        let ballot = encrypt_vote_with_proof(&mut OsRng, 1, key_pair.pk()).unwrap();
        let unrelated = encrypt_vote_with_proof(&mut OsRng, 1, key_pair.pk()).unwrap();

        assert!(ballot.verify(other.pk()).is_err());
        assert!(ballot.proof.verify(&unrelated.vote, key_pair.pk()).is_err());
    }

    #[test]
    fn test_bit_flips() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let key_pair = KeyPair::new(&mut rng).unwrap();
        let ballot = encrypt_vote_with_proof(&mut rng, 0, key_pair.pk()).unwrap();
        let bytes = ballot.proof.to_bytes();

        for bit in 0..bytes.len() * 8 {
            let mut flipped = bytes;
            flipped[bit / 8] ^= 0x80 >> (bit % 8);
            let accepted = ProofOfWellFormedness::from_bytes(&flipped)
                .and_then(|p| p.verify(&ballot.vote, key_pair.pk()))
                .is_ok();
            assert!(!accepted, "flipped bit {} still verifies", bit);
        }
    }

    #[test]
    fn test_round_trip() {
        let key_pair = KeyPair::new(&mut OsRng).unwrap();
        let ballot = encrypt_vote_with_proof(&mut OsRng, 1, key_pair.pk()).unwrap();

        let decoded = ProofOfWellFormedness::from_bytes(&ballot.proof.to_bytes()).unwrap();
        assert_eq!(decoded, ballot.proof);
        assert!(ProofOfWellFormedness::from_bytes(&ballot.proof.to_bytes()[..95]).is_err());

        let json = serde_json::to_string(&ballot).unwrap();
        let decoded: Ballot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, ballot);
        decoded.verify(key_pair.pk()).unwrap();
    }
}
