use crate::*;
use std::iter::FromIterator;

/// Running homomorphic sum of encrypted votes.
///
/// Append-only. `count` is the number of ciphertexts added and doubles as the
/// decryption bound, since every accepted vote is 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedTally {
    pub votes: EncryptedVote,
    pub count: u64,
}

impl EncryptedTally {
    pub fn new() -> Self {
        EncryptedTally {
            votes: EncryptedVote::identity(),
            count: 0,
        }
    }

    /// Add one encrypted vote
    pub fn add(self, vote: &EncryptedVote) -> Self {
        // Counts saturate; a saturated count is refused as a decryption bound
        EncryptedTally {
            votes: self.votes + *vote,
            count: self.count.saturating_add(1),
        }
    }

    /// Combine two partial tallies, e.g. ones accumulated on different threads
    pub fn merge(self, other: &EncryptedTally) -> Self {
        EncryptedTally {
            votes: self.votes + other.votes,
            count: self.count.saturating_add(other.count),
        }
    }

    /// Decrypt the tally into yes and no counts
    pub fn decrypt(&self, sk: &Scalar) -> Result<Tally, Error> {
        let yes = self.votes.decrypt(sk, self.count)?;
        let no = self
            .count
            .checked_sub(yes)
            .ok_or(Error::DecodeFailed { bound: self.count })?;
        Ok(Tally { yes, no })
    }
}

impl Default for EncryptedTally {
    fn default() -> Self {
        EncryptedTally::new()
    }
}

impl<'a> FromIterator<&'a EncryptedVote> for EncryptedTally {
    fn from_iter<I: IntoIterator<Item = &'a EncryptedVote>>(iter: I) -> Self {
        iter.into_iter()
            .fold(EncryptedTally::new(), |tally, vote| tally.add(vote))
    }
}

impl FromIterator<EncryptedVote> for EncryptedTally {
    fn from_iter<I: IntoIterator<Item = EncryptedVote>>(iter: I) -> Self {
        iter.into_iter()
            .fold(EncryptedTally::new(), |tally, vote| tally.add(&vote))
    }
}

/// A decrypted election result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub yes: u64,
    pub no: u64,
}
