use anyhow::Error;
use std::error::Error as StdError;
use std::process::ExitCode;
use thiserror::Error as ThisError;
use vallink_config::ConfigError;
use vallink_core::{CoreError, ValidationErrors};
use vallink_store::error::{StoreError, StoreErrorKind};

/// Process exit statuses beyond plain success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Failure {
    General = 1,
    NotFound = 2,
    InvalidInput = 3,
}

impl From<Failure> for ExitCode {
    fn from(failure: Failure) -> Self {
        ExitCode::from(failure as u8)
    }
}

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

/// The first cause in the chain that maps to a known failure decides the
/// exit code.
pub fn failure_for(err: &Error) -> Failure {
    err.chain()
        .find_map(classify)
        .unwrap_or(Failure::General)
}

fn classify(cause: &(dyn StdError + 'static)) -> Option<Failure> {
    if let Some(err) = cause.downcast_ref::<CliError>() {
        return Some(match err {
            CliError::InvalidInput(_) => Failure::InvalidInput,
            CliError::NotFound(_) => Failure::NotFound,
        });
    }
    if let Some(err) = cause.downcast_ref::<StoreError>() {
        return Some(match err.kind() {
            StoreErrorKind::Invalid | StoreErrorKind::InvalidDataPath => Failure::InvalidInput,
            _ => Failure::General,
        });
    }
    if let Some(err) = cause.downcast_ref::<ConfigError>() {
        return Some(match err {
            ConfigError::MissingHomeDir => Failure::General,
            _ => Failure::InvalidInput,
        });
    }
    if cause.is::<CoreError>() || cause.is::<ValidationErrors>() {
        return Some(Failure::InvalidInput);
    }
    None
}
