use crate::{
    commands::params::PARAMETER_OUTPUT, configuration::Configuration, error::CliError,
    format::Formattable, param_utils::get_format_parameter_value,
};
use clap::ArgMatches;
use std::path::PathBuf;
use tracing::trace;

pub fn print_configuration(sub_matches: &ArgMatches) -> Result<(), CliError> {
    trace!("Executing 'config get' command");

    let format = get_format_parameter_value(sub_matches)?;
    let configuration = Configuration::load_or_create_default()?;

    println!("{}", configuration.format(&format)?);
    Ok(())
}

pub fn print_configuration_path() -> Result<(), CliError> {
    let path = Configuration::get_default_configuration_file_path()?;
    println!("{}", path.display());
    Ok(())
}

pub fn export_configuration(sub_matches: &ArgMatches) -> Result<(), CliError> {
    trace!("Executing 'config export' command");

    let path = sub_matches
        .get_one::<PathBuf>(PARAMETER_OUTPUT)
        .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_OUTPUT.to_string()))?;

    let configuration = Configuration::load_or_create_default()?;
    configuration.save(path)?;

    println!("Configuration exported to {}", path.display());
    Ok(())
}
