use colored::Colorize;
use shellexpand::LookupError;
use std::{env::VarError, io, path::PathBuf, str::FromStr};

/// An existing directory, given by the user (`~` and environment
/// variables are expanded).
#[derive(Debug)]
pub struct UserDir {
    pub path_buf: PathBuf,
}

pub enum UserPathErr {
    ShellExpandError(LookupError<VarError>),
    CanonicalizeError(io::Error),
    NotDirectory,
}

impl From<LookupError<VarError>> for UserPathErr {
    fn from(err: LookupError<VarError>) -> Self {
        Self::ShellExpandError(err)
    }
}

impl From<io::Error> for UserPathErr {
    fn from(err: io::Error) -> Self {
        Self::CanonicalizeError(err)
    }
}

impl FromStr for UserDir {
    type Err = UserPathErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path_buf = expand(s)?.canonicalize()?;
        if !path_buf.is_dir() {
            return Err(UserPathErr::NotDirectory);
        }
        Ok(UserDir { path_buf })
    }
}

/// Expands `~` and environment variables in a user given path.
pub fn expand(path: &str) -> Result<PathBuf, LookupError<VarError>> {
    shellexpand::full(path).map(|expanded| PathBuf::from(expanded.into_owned()))
}

/// Tries to convert a given user path (as a string slice) to a `UserDir`.
/// If it fails, returns an error message.
pub fn to_user_dir(path: &str) -> Result<UserDir, String> {
    UserDir::from_str(path).map_err(|e| match e {
        UserPathErr::ShellExpandError(e) => {
            format!(
                "{}\n{}",
                "Error resolving the given path:".red(),
                e.to_string().red()
            )
        }
        UserPathErr::CanonicalizeError(e) => match e.kind() {
            std::io::ErrorKind::NotFound => format!(
                "{} does not exist.\n{}",
                path,
                "Please note that the provided directory should \
                    be the parent directory to the new project."
                    .dimmed()
            ),
            std::io::ErrorKind::PermissionDenied => format!("Permission denied for {}", path),
            _ => format!("{}", e),
        },
        UserPathErr::NotDirectory => {
            format!("{} is not a directory.", path)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn existing_directory() {
        let dir = TempDir::new().unwrap();
        let user_dir = to_user_dir(&dir.path().to_string_lossy()).unwrap();
        assert_eq!(user_dir.path_buf, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let message = to_user_dir(&missing.to_string_lossy()).unwrap_err();
        assert!(message.contains("does not exist"));
    }

    #[test]
    fn file_is_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "").unwrap();
        let message = to_user_dir(&file.to_string_lossy()).unwrap_err();
        assert!(message.contains("is not a directory"));
    }

    #[test]
    fn expands_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand("~/project.yaml").unwrap(), home.join("project.yaml"));
        }
    }

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(
            expand("templates/project.yaml").unwrap(),
            PathBuf::from("templates/project.yaml")
        );
    }
}
