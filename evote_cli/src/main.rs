#[macro_use]
extern crate log;

use clap::{App, AppSettings, Arg, SubCommand};
use num_enum::TryFromPrimitive;
use serde::de::DeserializeOwned;
use serde::Serialize;

mod command_capabilities;
mod command_keygen;
mod command_tally;
mod command_verify;
mod command_vote;
mod config;
mod error;

use command_capabilities::*;
use command_keygen::*;
use command_tally::*;
use command_verify::*;
use command_vote::*;
use config::Config;
use error::CliError;

#[derive(TryFromPrimitive, PartialEq, Copy, Clone, Debug)]
#[repr(u8)]
enum Verbosity {
    Silent = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl Verbosity {
    fn from_occurrences(occurrences: u64) -> Self {
        let level = (Verbosity::Warn as u64 + occurrences).min(Verbosity::Trace as u64);
        Verbosity::try_from_primitive(level as u8).unwrap_or(Verbosity::Trace)
    }

    fn filter(self) -> &'static str {
        match self {
            Verbosity::Silent => "off",
            Verbosity::Error => "error",
            Verbosity::Warn => "warn",
            Verbosity::Info => "info",
            Verbosity::Debug => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

fn main() {
    let matches = App::new("evote")
        .version("0.1")
        .about("Helios-style yes/no elections with verifiable encrypted ballots")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .global(true)
                .help("Sets the level of verbosity - RUST_LOG overrides it"),
        )
        .subcommand(
            SubCommand::with_name("keygen")
                .about("Generate an election key pair with a proof of key knowledge")
                .arg(
                    Arg::with_name("out")
                        .long("out")
                        .takes_value(true)
                        .help("Key pair output file - defaults to EVOTE_KEYPAIR"),
                ),
        )
        .subcommand(
            SubCommand::with_name("encrypt")
                .about("Encrypt a vote (0 or 1) and prove it well-formed")
                .arg(Arg::with_name("VOTE").index(1).required(true))
                .arg(
                    Arg::with_name("PK_HEX")
                        .index(2)
                        .required(true)
                        .help("Election public key in hex"),
                ),
        )
        .subcommand(
            SubCommand::with_name("tally")
                .about("Verify a file of ballots and sum them into an encrypted tally")
                .arg(Arg::with_name("PK_HEX").index(1).required(true))
                .arg(
                    Arg::with_name("BALLOTS_FILE")
                        .index(2)
                        .required(true)
                        .help("JSON array of ballots"),
                ),
        )
        .subcommand(
            SubCommand::with_name("decrypt")
                .about("Decrypt an encrypted tally with the configured key pair and prove the result")
                .arg(Arg::with_name("TALLY_FILE").index(1).required(true)),
        )
        .subcommand(
            SubCommand::with_name("verify-key")
                .about("Verify a proof of key knowledge")
                .arg(Arg::with_name("PK_HEX").index(1).required(true))
                .arg(Arg::with_name("PROOF_FILE").index(2).required(true)),
        )
        .subcommand(
            SubCommand::with_name("verify-decryption")
                .about("Verify a proof that a tally decrypts to COUNT")
                .arg(Arg::with_name("PK_HEX").index(1).required(true))
                .arg(Arg::with_name("TALLY_FILE").index(2).required(true))
                .arg(Arg::with_name("COUNT").index(3).required(true))
                .arg(Arg::with_name("PROOF_FILE").index(4).required(true)),
        )
        .subcommand(
            SubCommand::with_name("capabilities")
                .about("List the capabilities offered by the proving service"),
        )
        .get_matches();

    let verbosity = Verbosity::from_occurrences(matches.occurrences_of("v"));
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(verbosity.filter()))
        .init();
    debug!("verbosity {:?}", verbosity);

    let result = match matches.subcommand() {
        ("keygen", Some(matches)) => Config::from_env()
            .map_err(CliError::from)
            .and_then(|config| command_keygen(matches, &config)),
        ("encrypt", Some(matches)) => command_encrypt(matches),
        ("tally", Some(matches)) => command_tally(matches),
        ("decrypt", Some(matches)) => Config::from_env()
            .map_err(CliError::from)
            .and_then(|config| command_decrypt(matches, &config)),
        ("verify-key", Some(matches)) => command_verify_key(matches),
        ("verify-decryption", Some(matches)) => command_verify_decryption(matches),
        ("capabilities", Some(matches)) => command_capabilities(matches),
        _ => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("evote: {}", e);
        std::process::exit(1);
    }
}

/// Expand `~` in a user supplied path
pub fn expand(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}

/// Value of a required positional argument
pub fn required<'a>(matches: &'a clap::ArgMatches, name: &'static str) -> Result<&'a str, CliError> {
    matches.value_of(name).ok_or(CliError::Argument {
        name,
        value: String::new(),
    })
}

pub fn parse_public_key(hex_key: &str) -> Result<evote::GroupElement, CliError> {
    use hex::FromHex;
    Ok(evote::GroupElement::from_hex(hex_key.trim())?)
}

pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, CliError> {
    let path = expand(path);
    let bytes = std::fs::read(&path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CliError::Parse { path, source })
}

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), CliError> {
    let path = expand(path);
    let json = serde_json::to_vec_pretty(value)?;
    std::fs::write(&path, json).map_err(|source| CliError::Write { path, source })
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
