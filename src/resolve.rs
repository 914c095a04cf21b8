use crate::{
    registry::{Locator, Registry},
    template::Template,
};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Where a template should be loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// A registered template, by key.
    Registered(String),
    /// A template file given by the user.
    File(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("template '{0}' not found")]
    NotFound(String),
    #[error("could not read template file '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse template '{origin}': {source}")]
    Parse {
        origin: String,
        source: serde_yaml::Error,
    },
}

/// Loads templates from files, or from the templates known to a
/// `Registry`.
///
/// Resolving does not validate; see `validate::validate`.
pub struct Resolver<'r> {
    registry: &'r Registry,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Resolver { registry }
    }

    pub fn resolve(&self, source: &Source) -> Result<Template, ResolveError> {
        match source {
            Source::Registered(key) => {
                let descriptor = self.registry.lookup(key)?;
                tracing::debug!(key = %key, locator = %descriptor.locator, "loading registered template");
                match &descriptor.locator {
                    Locator::Bundled { file, contents } => parse(contents, file),
                    Locator::File(path) => load_file(path),
                }
            }
            Source::File(path) => load_file(path),
        }
    }
}

fn load_file(path: &Path) -> Result<Template, ResolveError> {
    tracing::debug!(path = %path.display(), "reading template file");
    let contents = fs::read_to_string(path).map_err(|source| ResolveError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents, &path.to_string_lossy())
}

fn parse(contents: &str, origin: &str) -> Result<Template, ResolveError> {
    Template::from_yaml(contents).map_err(|source| ResolveError::Parse {
        origin: origin.to_string(),
        source,
    })
}
