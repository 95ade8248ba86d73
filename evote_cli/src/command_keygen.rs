use crate::config::Config;
use crate::error::CliError;
use evote::{GroupElement, ProofOfKeyKnowledge};
use serde::Serialize;

#[derive(Serialize)]
struct KeygenOutput<'a> {
    pk: &'a GroupElement,
    proof: &'a ProofOfKeyKnowledge,
}

pub fn command_keygen(matches: &clap::ArgMatches, config: &Config) -> Result<(), CliError> {
    let mut rng = rand::thread_rng();
    let (key_pair, proof) = evote::new_key_pair_with_proof(&mut rng)?;

    let out = matches.value_of("out").unwrap_or(&config.keypair_path);
    crate::write_json(out, &key_pair)?;
    info!("key pair written to {}", crate::expand(out));

    crate::print_json(&KeygenOutput {
        pk: key_pair.pk(),
        proof: &proof,
    })
}
