use crate::{
    config::LoadedConfig,
    error::Error,
    git::{GitBootstrapper, GitError},
    materialize::{Materialized, Materializer, Mode, OsFilesystem},
    registry::Registry,
    resolve::{Resolver, Source},
    validate::validate,
};
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct NewOptions {
    pub source: Source,
    /// Replaces the template's project name.
    pub name: Option<String>,
    /// Parent directory of the new project.
    pub location: PathBuf,
    pub dry_run: bool,
    pub init_git: bool,
    pub skip_validation: bool,
}

/// Resolves, validates and lays out a template, then (optionally)
/// turns the result into a git repository.
pub fn new(config: &LoadedConfig, registry: &Registry, options: &NewOptions) -> Result<(), Error> {
    let mut template = Resolver::new(registry).resolve(&options.source)?;
    template.rename(options.name.as_deref());

    if options.skip_validation {
        tracing::warn!(name = %template.name, "skipping template validation");
    } else {
        validate(&template)?;
        tracing::debug!(name = %template.name, "template is valid");
    }

    let mode = if options.dry_run {
        Mode::Preview
    } else {
        Mode::Create
    };
    let init_git = options.init_git || config.config.init_git;

    match Materializer::new(&OsFilesystem, &options.location).materialize(&template, mode)? {
        Materialized::Preview(preview) => {
            println!("{}", "Dry run mode - showing what would be created:".yellow());
            println!("{}", preview);
            if init_git {
                println!("{}", "A git repository would be initialized.".dimmed());
            }
        }
        Materialized::Created(project) => {
            println!(
                "{} {}",
                "Project scaffold created:".green(),
                project.to_string_lossy()
            );
            if init_git {
                GitBootstrapper::new(&project, config.config.commit_message.as_str())
                    .setup()
                    .map_err(|err| {
                        tracing::warn!(step = %err.step(), "git setup failed");
                        eprintln!("{}", git_failure_note(&err, &project).yellow());
                        err
                    })?;
                println!("{}", "Initialized git repository.".green());
            }
        }
    }
    Ok(())
}

/// Tells the user where git setup stopped. The project files are kept
/// either way.
fn git_failure_note(err: &GitError, project: &Path) -> String {
    format!(
        "Could not {} in {}; the project files were created and have been kept.",
        err.step(),
        project.to_string_lossy()
    )
}
