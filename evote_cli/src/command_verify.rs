use crate::error::CliError;
use evote::{EncryptedTally, ProofOfCorrectDecryption, ProofOfKeyKnowledge};

pub fn command_verify_key(matches: &clap::ArgMatches) -> Result<(), CliError> {
    let pk = crate::parse_public_key(crate::required(matches, "PK_HEX")?)?;
    let proof: ProofOfKeyKnowledge = crate::read_json(crate::required(matches, "PROOF_FILE")?)?;

    proof.verify(&pk)?;
    println!("valid");
    Ok(())
}

pub fn command_verify_decryption(matches: &clap::ArgMatches) -> Result<(), CliError> {
    let pk = crate::parse_public_key(crate::required(matches, "PK_HEX")?)?;
    let tally: EncryptedTally = crate::read_json(crate::required(matches, "TALLY_FILE")?)?;
    let count = crate::required(matches, "COUNT")?;
    let count: u64 = count.trim().parse().map_err(|_| CliError::Argument {
        name: "COUNT",
        value: count.to_owned(),
    })?;
    let proof: ProofOfCorrectDecryption =
        crate::read_json(crate::required(matches, "PROOF_FILE")?)?;

    proof.verify(&tally.votes, count, &pk)?;
    println!("valid");
    Ok(())
}
