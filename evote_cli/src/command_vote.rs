use crate::error::CliError;

pub fn command_encrypt(matches: &clap::ArgMatches) -> Result<(), CliError> {
    let vote = crate::required(matches, "VOTE")?;
    let vote: i64 = vote.trim().parse().map_err(|_| CliError::Argument {
        name: "VOTE",
        value: vote.to_owned(),
    })?;
    let pk = crate::parse_public_key(crate::required(matches, "PK_HEX")?)?;

    let mut rng = rand::thread_rng();
    let ballot = evote::encrypt_vote_with_proof(&mut rng, vote, &pk)?;
    crate::print_json(&ballot)
}
