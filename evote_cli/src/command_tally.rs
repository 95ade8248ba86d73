use crate::config::Config;
use crate::error::CliError;
use evote::{Ballot, EncryptedTally, KeyPair, ProofOfCorrectDecryption};
use serde::Serialize;

#[derive(Serialize)]
struct DecryptOutput {
    count: u64,
    proof: ProofOfCorrectDecryption,
}

pub fn command_tally(matches: &clap::ArgMatches) -> Result<(), CliError> {
    let pk = crate::parse_public_key(crate::required(matches, "PK_HEX")?)?;
    let ballots: Vec<Ballot> = crate::read_json(crate::required(matches, "BALLOTS_FILE")?)?;

    let mut tally = EncryptedTally::new();
    for (index, ballot) in ballots.iter().enumerate() {
        ballot
            .verify(&pk)
            .map_err(|source| CliError::InvalidBallot { index, source })?;
        tally = tally.add(&ballot.vote);
    }
    info!("{} ballots verified and tallied", tally.count);

    crate::print_json(&tally)
}

pub fn command_decrypt(matches: &clap::ArgMatches, config: &Config) -> Result<(), CliError> {
    let tally: EncryptedTally = crate::read_json(crate::required(matches, "TALLY_FILE")?)?;
    if tally.count > config.max_bound {
        return Err(CliError::BoundTooLarge {
            bound: tally.count,
            max: config.max_bound,
        });
    }

    let key_pair: KeyPair = crate::read_json(&config.keypair_path)?;
    let mut rng = rand::thread_rng();
    let (count, proof) =
        evote::decrypt_tally_with_proof(&mut rng, &tally.votes, tally.count, &key_pair)?;
    info!("tally decrypted: {} yes of {}", count, tally.count);

    crate::print_json(&DecryptOutput { count, proof })
}
