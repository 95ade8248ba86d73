use super::*;
use rand::rngs::OsRng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn end_to_end_election() {
    let mut rng = OsRng;

    // Election authority generates its key and proves knowledge of it
    let (key_pair, key_proof) = new_key_pair_with_proof(&mut rng).unwrap();

    let mut election = ElectionContract::new();
    election
        .declare_public_key(*key_pair.pk(), &key_proof)
        .unwrap();
    election.start_voting().unwrap();

    // Voters only see the public key published on the contract
    let pk = election.public_key().unwrap();
    let votes = [1i64, 0, 0, 1, 0];
    for vote in votes.iter() {
        let ballot = encrypt_vote_with_proof(&mut rng, *vote, &pk).unwrap();

        // Ballots travel as JSON
        let json = serde_json::to_string(&ballot).unwrap();
        let ballot: Ballot = serde_json::from_str(&json).unwrap();
        election.cast_vote(&ballot).unwrap();
    }

    // A vote outside {0, 1} never produces a ballot
    assert!(encrypt_vote_with_proof(&mut rng, 2, &pk).is_err());

    // Voting is over
    // ----------------
    election.stop_voting().unwrap();
    assert!(election.cast_vote(&encrypt_vote_with_proof(&mut rng, 1, &pk).unwrap()).is_err());

    // Authority decrypts the accumulated tally and proves the result
    let tally = *election.encrypted_tally();
    assert_eq!(tally.count, 5);
    let (count, proof) =
        decrypt_tally_with_proof(&mut rng, &tally.votes, tally.count, &key_pair).unwrap();
    assert_eq!(count, 2);

    // A wrong count is refused, the right one closes the election
    assert!(election.publish_result(count + 1, &proof).is_err());
    election.publish_result(count, &proof).unwrap();
    assert_eq!(election.phase(), Phase::Done);
    assert_eq!(election.result().unwrap(), 2);

    // Anyone can re-check the result from public data
    proof.verify(&tally.votes, 2, &pk).unwrap();
    assert_eq!(
        tally.decrypt(key_pair.sk()).unwrap(),
        Tally { yes: 2, no: 3 }
    );
}

#[test]
fn election_is_reproducible_with_seeded_rng() {
    let run = |seed: u64| {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let (key_pair, _) = new_key_pair_with_proof(&mut rng).unwrap();
        let ballot = encrypt_vote_with_proof(&mut rng, 1, key_pair.pk()).unwrap();
        (key_pair, ballot)
    };

    let (kp1, ballot1) = run(42);
    let (kp2, ballot2) = run(42);
    assert_eq!(kp1, kp2);
    assert_eq!(ballot1, ballot2);

    let (kp3, _) = run(43);
    assert_ne!(kp1, kp3);
}

#[test]
fn malformed_inputs_are_rejected() {
    let key_pair = KeyPair::new(&mut OsRng).unwrap();
    let ballot = encrypt_vote_with_proof(&mut OsRng, 0, key_pair.pk()).unwrap();

    // Truncated and padded ciphertexts
    let bytes = ballot.vote.to_bytes();
    assert!(EncryptedVote::from_bytes(&bytes[..127]).is_err());
    let mut padded = bytes.to_vec();
    padded.push(0);
    assert!(EncryptedVote::from_bytes(&padded).is_err());

    // Odd-length and non-hex JSON strings
    assert!(serde_json::from_str::<GroupElement>("\"abc\"").is_err());
    assert!(serde_json::from_str::<Scalar>("\"zz\"").is_err());

    // Hex parsing goes through the same validation
    use hex::FromHex;
    assert_eq!(
        GroupElement::from_hex(key_pair.pk().to_hex()).unwrap(),
        *key_pair.pk()
    );
    assert!(matches!(
        Scalar::from_hex("ff".repeat(32)),
        Err(Error::FieldRangeError)
    ));
    assert!(matches!(
        GroupElement::from_hex("0g"),
        Err(Error::Hex(_))
    ));
}
