use crate::registry::{Locator, Registry, TemplateDescriptor};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

/// Given the base configuration folder path, returns
/// the path of the configuration JSON file.
fn get_json_path(config_path: &Path) -> PathBuf {
    config_path.join("config.json")
}

/// Given the base configuration folder path, returns
/// the path of the user templates folder.
fn get_template_dir(config_path: &Path) -> PathBuf {
    config_path.join("templates")
}

fn default_commit_message() -> String {
    "Initial commit".to_string()
}

fn default_version() -> String {
    super::VERSION.to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,
    /// Set up a git repository after every (non dry-run) scaffold.
    #[serde(default)]
    pub init_git: bool,
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version: default_version(),
            init_git: false,
            commit_message: default_commit_message(),
        }
    }
}

impl Config {
    /// Whether the file was written for a different version of scaffold.
    pub fn is_from_other_version(&self) -> bool {
        self.version != super::VERSION
    }

    fn load_config(path: &Path) -> Result<Option<Config>, ConfigError> {
        let json_path = get_json_path(path);
        if !json_path.exists() {
            return Ok(None);
        }
        if !json_path.is_file() {
            return Err(ConfigError::NotAFile(json_path));
        }
        let json_file = fs::File::open(&json_path).map_err(ConfigError::FileError)?;
        let reader = BufReader::new(json_file);
        serde_json::from_reader::<_, Config>(reader)
            .map_err(|e| ConfigError::BadDeserialization(e, json_path))
            .map(Some)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration JSON path ('{}') exists, but is not a file", .0.display())]
    NotAFile(PathBuf),
    #[error("error opening the configuration JSON file for reading: {0}")]
    FileError(#[source] io::Error),
    #[error(
        "error parsing the configuration JSON file: {0}\n\
        You can attempt to fix the file manually, or delete it \
        (you will lose your configuration).\n\
        The configuration file can be found in '{}'",
        .1.display()
    )]
    BadDeserialization(#[source] serde_json::Error, PathBuf),
    #[error("the templates path ('{}') exists, but is not a directory", .0.display())]
    NotAFolder(PathBuf),
    #[error("could not read the contents of the templates directory ('{}'): {1}", .0.display())]
    ReadDirError(PathBuf, #[source] glob::GlobError),
}

/// The configuration, along with the directory it was loaded from.
/// Without a directory, the defaults are used and there are no user
/// templates.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: Config,
    path: Option<PathBuf>,
}

impl LoadedConfig {
    pub fn load_config(path: PathBuf) -> Result<Self, ConfigError> {
        let config = Config::load_config(&path)?.unwrap_or_default();
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        if config.is_from_other_version() {
            tracing::warn!(
                found = %config.version,
                current = super::VERSION,
                "configuration was written by another version of scaffold"
            );
        }
        Ok(LoadedConfig {
            config,
            path: Some(path),
        })
    }

    pub fn get_template_dir(&self) -> Option<PathBuf> {
        self.path.as_deref().map(get_template_dir)
    }

    /// Registers every `*.yaml`/`*.yml` file in the user templates
    /// directory, keyed by file stem. Templates whose key is already
    /// taken are skipped.
    pub fn scan_templates(&self, registry: &mut Registry) -> Result<(), ConfigError> {
        let templates_dir = match self.get_template_dir() {
            Some(dir) if dir.exists() => dir,
            _ => return Ok(()),
        };
        if !templates_dir.is_dir() {
            return Err(ConfigError::NotAFolder(templates_dir));
        }

        let escaped = glob::Pattern::escape(&templates_dir.to_string_lossy());
        let mut found = Vec::new();
        for extension in &["yaml", "yml"] {
            let pattern = format!("{}/*.{}", escaped, extension);
            let entries = match glob::glob(&pattern) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(%pattern, %err, "bad templates directory pattern");
                    continue;
                }
            };
            for entry in entries {
                found.push(entry.map_err(|e| ConfigError::ReadDirError(templates_dir.clone(), e))?);
            }
        }
        found.sort();

        for path in found {
            if !path.is_file() {
                continue;
            }
            let key = match path.file_stem() {
                Some(stem) => stem.to_string_lossy().to_string(),
                None => continue,
            };
            let descriptor = TemplateDescriptor {
                name: key.clone(),
                description: format!("User template from {}", path.display()),
                key,
                locator: Locator::File(path),
            };
            if let Err(rejected) = registry.register(descriptor) {
                tracing::warn!(
                    key = %rejected.key,
                    path = %rejected.locator,
                    "skipping user template: the name is already taken"
                );
            }
        }
        Ok(())
    }
}
