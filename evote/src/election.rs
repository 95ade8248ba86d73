use crate::*;
use num_enum::TryFromPrimitive;

/// Lifecycle of an election, in order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TryFromPrimitive,
)]
#[repr(u8)]
pub enum Phase {
    Init = 0,
    KeyDeclared = 1,
    Voting = 2,
    Tallying = 3,
    Done = 4,
}

/// Public bulletin-board state machine for a single yes/no election.
///
/// Every transition that accepts data checks the accompanying proof first.
/// A rejected call leaves the contract unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionContract {
    phase: Phase,
    pk: Option<GroupElement>,
    tally: EncryptedTally,
    result: Option<u64>,
}

impl ElectionContract {
    pub fn new() -> Self {
        ElectionContract {
            phase: Phase::Init,
            pk: None,
            tally: EncryptedTally::new(),
            result: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Declare the election public key along with a proof that the authority knows the secret key
    pub fn declare_public_key(
        &mut self,
        pk: GroupElement,
        proof: &ProofOfKeyKnowledge,
    ) -> Result<(), ValidationError> {
        self.expect_phase(Phase::Init)?;
        proof.verify(&pk)?;
        self.pk = Some(pk);
        self.transition(Phase::KeyDeclared);
        Ok(())
    }

    pub fn start_voting(&mut self) -> Result<(), ValidationError> {
        self.expect_phase(Phase::KeyDeclared)?;
        self.transition(Phase::Voting);
        Ok(())
    }

    /// Accept a ballot into the tally if its proof verifies
    pub fn cast_vote(&mut self, ballot: &Ballot) -> Result<(), ValidationError> {
        self.expect_phase(Phase::Voting)?;
        let pk = self.public_key()?;
        ballot.verify(&pk)?;
        self.tally = self.tally.add(&ballot.vote);
        Ok(())
    }

    pub fn stop_voting(&mut self) -> Result<(), ValidationError> {
        self.expect_phase(Phase::Voting)?;
        self.transition(Phase::Tallying);
        Ok(())
    }

    /// Publish the decrypted yes count, proven against the accumulated tally
    pub fn publish_result(
        &mut self,
        count: u64,
        proof: &ProofOfCorrectDecryption,
    ) -> Result<(), ValidationError> {
        self.expect_phase(Phase::Tallying)?;
        let pk = self.public_key()?;
        proof.verify(&self.tally.votes, count, &pk)?;
        self.result = Some(count);
        self.transition(Phase::Done);
        Ok(())
    }

    pub fn public_key(&self) -> Result<GroupElement, ValidationError> {
        self.pk.ok_or(ValidationError::WrongPhase {
            expected: Phase::KeyDeclared,
            actual: self.phase,
        })
    }

    pub fn encrypted_tally(&self) -> &EncryptedTally {
        &self.tally
    }

    /// The published yes count
    pub fn result(&self) -> Result<u64, ValidationError> {
        self.expect_phase(Phase::Done)?;
        self.result.ok_or(ValidationError::WrongPhase {
            expected: Phase::Done,
            actual: self.phase,
        })
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), ValidationError> {
        if self.phase != expected {
            return Err(ValidationError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn transition(&mut self, next: Phase) {
        info!("election phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}

impl Default for ElectionContract {
    fn default() -> Self {
        ElectionContract::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use std::convert::TryFrom;

    fn declared(key_pair: &KeyPair) -> ElectionContract {
        let proof = ProofOfKeyKnowledge::prove(&mut OsRng, key_pair).unwrap();
        let mut contract = ElectionContract::new();
        contract.declare_public_key(*key_pair.pk(), &proof).unwrap();
        contract
    }

    #[test]
    fn test_phase_order() {
        assert!(Phase::Init < Phase::KeyDeclared);
        assert!(Phase::Tallying < Phase::Done);
        assert_eq!(Phase::try_from(2u8).unwrap(), Phase::Voting);
        assert!(Phase::try_from(5u8).is_err());
    }

    #[test]
    fn test_wrong_phase() {
        let key_pair = KeyPair::new(&mut OsRng).unwrap();
        let mut contract = ElectionContract::new();

        assert!(matches!(
            contract.start_voting(),
            Err(ValidationError::WrongPhase {
                expected: Phase::KeyDeclared,
                actual: Phase::Init
            })
        ));
        assert!(contract.public_key().is_err());
        assert!(contract.result().is_err());

        let ballot = encrypt_vote_with_proof(&mut OsRng, 1, key_pair.pk()).unwrap();
        let mut contract = declared(&key_pair);
        assert!(matches!(
            contract.cast_vote(&ballot),
            Err(ValidationError::WrongPhase { .. })
        ));
        assert!(contract.stop_voting().is_err());
        assert_eq!(contract.phase(), Phase::KeyDeclared);
    }

    #[test]
    fn test_reject_bad_key_proof() {
        let key_pair = KeyPair::new(&mut OsRng).unwrap();
        let other = KeyPair::new(&mut OsRng).unwrap();
        let proof = ProofOfKeyKnowledge::prove(&mut OsRng, &other).unwrap();

        let mut contract = ElectionContract::new();
        assert!(matches!(
            contract.declare_public_key(*key_pair.pk(), &proof),
            Err(ValidationError::ProofFailed(Error::ProofInvalid(_)))
        ));
        assert_eq!(contract, ElectionContract::new());
    }

    #[test]
    fn test_reject_ballot_for_other_key() {
        let key_pair = KeyPair::new(&mut OsRng).unwrap();
        let other = KeyPair::new(&mut OsRng).unwrap();
        let mut contract = declared(&key_pair);
        contract.start_voting().unwrap();

        let good = encrypt_vote_with_proof(&mut OsRng, 1, key_pair.pk()).unwrap();
        let bad = encrypt_vote_with_proof(&mut OsRng, 1, other.pk()).unwrap();
        contract.cast_vote(&good).unwrap();
        let before = contract.clone();

        assert!(contract.cast_vote(&bad).is_err());
        assert_eq!(contract, before);
        assert_eq!(contract.encrypted_tally().count, 1);
    }

    #[test]
    fn test_reject_wrong_result() {
        let key_pair = KeyPair::new(&mut OsRng).unwrap();
        let mut contract = declared(&key_pair);
        contract.start_voting().unwrap();
        for v in &[1i64, 1, 0] {
            let ballot = encrypt_vote_with_proof(&mut OsRng, *v, key_pair.pk()).unwrap();
            contract.cast_vote(&ballot).unwrap();
        }
        contract.stop_voting().unwrap();

        let tally = *contract.encrypted_tally();
        let (count, proof) =
            decrypt_tally_with_proof(&mut OsRng, &tally.votes, tally.count, &key_pair).unwrap();
        assert_eq!(count, 2);

        assert!(contract.publish_result(3, &proof).is_err());
        assert_eq!(contract.phase(), Phase::Tallying);

        contract.publish_result(count, &proof).unwrap();
        assert_eq!(contract.phase(), Phase::Done);
        assert_eq!(contract.result().unwrap(), 2);
    }
}
