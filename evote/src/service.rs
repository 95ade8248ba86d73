use crate::*;
use rand_core::CryptoRngCore;
use std::collections::BTreeMap;
use uuid::Uuid;

/// A named, stateless computation exposed to remote callers.
///
/// Arguments and results are opaque byte strings; the built-in capabilities
/// use JSON for each of them.
pub trait Capability: Send + Sync {
    fn id(&self) -> Uuid;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn num_arguments(&self) -> usize;

    fn compute(&self, rng: &mut dyn CryptoRngCore, args: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, Error>;

    fn info(&self) -> CapabilityInfo {
        CapabilityInfo {
            id: self.id(),
            name: self.name().to_string(),
            description: self.description().to_string(),
            num_arguments: self.num_arguments(),
        }
    }
}

/// Public description of a registered capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityInfo {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub num_arguments: usize,
}

/// Capabilities by id
#[derive(Default)]
pub struct CapabilityRegistry {
    capabilities: BTreeMap<Uuid, Box<dyn Capability>>,
}

impl CapabilityRegistry {
    /// An empty registry
    pub fn new() -> Self {
        CapabilityRegistry {
            capabilities: BTreeMap::new(),
        }
    }

    /// A registry holding the key generation, vote encryption and tally decryption capabilities
    pub fn with_builtin() -> Self {
        let mut capabilities: BTreeMap<Uuid, Box<dyn Capability>> = BTreeMap::new();
        for capability in builtin() {
            capabilities.insert(capability.id(), capability);
        }
        CapabilityRegistry { capabilities }
    }

    pub fn register(&mut self, capability: Box<dyn Capability>) -> Result<(), Error> {
        let id = capability.id();
        if self.capabilities.contains_key(&id) {
            return Err(Error::DuplicateCapability(id));
        }
        self.capabilities.insert(id, capability);
        Ok(())
    }

    /// Descriptions of every registered capability, sorted by id
    pub fn list(&self) -> Vec<CapabilityInfo> {
        self.capabilities.values().map(|c| c.info()).collect()
    }

    pub fn get(&self, id: &Uuid) -> Option<&dyn Capability> {
        self.capabilities.get(id).map(|c| c.as_ref())
    }

    pub fn compute(
        &self,
        id: &Uuid,
        rng: &mut dyn CryptoRngCore,
        args: &[Vec<u8>],
    ) -> Result<Vec<Vec<u8>>, Error> {
        let capability = self.get(id).ok_or(Error::UnknownCapability(*id))?;
        if args.len() != capability.num_arguments() {
            return Err(Error::WrongArgumentCount {
                expected: capability.num_arguments(),
                found: args.len(),
            });
        }
        debug!("computing capability {} ({})", capability.name(), id);
        capability.compute(rng, args)
    }
}

fn builtin() -> Vec<Box<dyn Capability>> {
    vec![
        Box::new(NewKeyPairWithProof),
        Box::new(EncryptVoteWithProof),
        Box::new(DecryptTallyWithProof),
    ]
}

/// Generates an election key pair. Returns `[key pair, proof of key knowledge]`.
pub struct NewKeyPairWithProof;

impl NewKeyPairWithProof {
    pub const ID: Uuid = Uuid::from_u128(0x924e949e_0f98_42c6_a4ff_bb2b1c8693e0);
}

impl Capability for NewKeyPairWithProof {
    fn id(&self) -> Uuid {
        Self::ID
    }

    fn name(&self) -> &'static str {
        "new_key_pair_with_proof"
    }

    fn description(&self) -> &'static str {
        "Generate a new election key pair with a proof of secret key knowledge"
    }

    fn num_arguments(&self) -> usize {
        0
    }

    fn compute(&self, rng: &mut dyn CryptoRngCore, _args: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, Error> {
        let (key_pair, proof) = new_key_pair_with_proof(rng)?;
        Ok(vec![
            serde_json::to_vec(&key_pair)?,
            serde_json::to_vec(&proof)?,
        ])
    }
}

/// Takes `[vote, public key]`. Returns `[encrypted vote, proof of well-formedness]`.
pub struct EncryptVoteWithProof;

impl EncryptVoteWithProof {
    pub const ID: Uuid = Uuid::from_u128(0x772e6272_8c49_463f_b2d1_92088ae06da1);
}

impl Capability for EncryptVoteWithProof {
    fn id(&self) -> Uuid {
        Self::ID
    }

    fn name(&self) -> &'static str {
        "encrypt_vote_with_proof"
    }

    fn description(&self) -> &'static str {
        "Encrypt a yes/no vote with a proof that it is well-formed"
    }

    fn num_arguments(&self) -> usize {
        2
    }

    fn compute(&self, rng: &mut dyn CryptoRngCore, args: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, Error> {
        let vote: i64 = serde_json::from_slice(&args[0])?;
        let pk: GroupElement = serde_json::from_slice(&args[1])?;
        let ballot = encrypt_vote_with_proof(rng, vote, &pk)?;
        Ok(vec![
            serde_json::to_vec(&ballot.vote)?,
            serde_json::to_vec(&ballot.proof)?,
        ])
    }
}

/// Takes `[summed ciphertext, bound, key pair]`. Returns `[count, proof of correct decryption]`.
pub struct DecryptTallyWithProof;

impl DecryptTallyWithProof {
    pub const ID: Uuid = Uuid::from_u128(0xc238d864_ae22_4db5_b3d1_83c41cb8b4dd);
}

impl Capability for DecryptTallyWithProof {
    fn id(&self) -> Uuid {
        Self::ID
    }

    fn name(&self) -> &'static str {
        "decrypt_tally_with_proof"
    }

    fn description(&self) -> &'static str {
        "Decrypt an encrypted tally with a proof of correct decryption"
    }

    fn num_arguments(&self) -> usize {
        3
    }

    fn compute(&self, rng: &mut dyn CryptoRngCore, args: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, Error> {
        let tally: EncryptedVote = serde_json::from_slice(&args[0])?;
        let bound: u64 = serde_json::from_slice(&args[1])?;
        if bound > DiscreteLogTable::MAX_BOUND {
            return Err(Error::BoundTooLarge {
                bound,
                max: DiscreteLogTable::MAX_BOUND,
            });
        }
        let key_pair: KeyPair = serde_json::from_slice(&args[2])?;
        let (count, proof) = decrypt_tally_with_proof(rng, &tally, bound, &key_pair)?;
        Ok(vec![serde_json::to_vec(&count)?, serde_json::to_vec(&proof)?])
    }
}
