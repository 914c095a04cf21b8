use crate::{
    config::ConfigError, git::GitError, materialize::MaterializeError, resolve::ResolveError,
    validate::ValidationErrors,
};

/// Anything that can stop a run. Each variant says which stage failed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("error loading configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("error loading template: {0}")]
    Resolve(#[from] ResolveError),
    #[error("template validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("error creating structure: {0}")]
    Materialize(#[from] MaterializeError),
    #[error("error setting up git: {0}")]
    Git(#[from] GitError),
    #[error("could not determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
    #[error("could not resolve the given path: {0}")]
    UserPath(#[source] shellexpand::LookupError<std::env::VarError>),
    #[error("{0}")]
    Location(String),
}

impl Error {
    /// The process exit code for this error (see `exitcode`).
    pub fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Error::Config(_) => exitcode::CONFIG,
            Error::Resolve(ResolveError::NotFound(_)) => exitcode::USAGE,
            Error::Resolve(ResolveError::Read { .. }) => exitcode::NOINPUT,
            Error::Resolve(ResolveError::Parse { .. }) => exitcode::DATAERR,
            Error::Validation(_) => exitcode::DATAERR,
            Error::Materialize(_) => exitcode::CANTCREAT,
            Error::Git(_) => exitcode::SOFTWARE,
            Error::CurrentDir(_) => exitcode::OSERR,
            Error::UserPath(_) | Error::Location(_) => exitcode::USAGE,
        }
    }
}
