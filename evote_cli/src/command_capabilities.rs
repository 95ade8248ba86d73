use crate::error::CliError;
use evote::CapabilityRegistry;

pub fn command_capabilities(_matches: &clap::ArgMatches) -> Result<(), CliError> {
    let registry = CapabilityRegistry::with_builtin();
    crate::print_json(&registry.list())
}
