use std::{
    fmt::Display,
    fs, io,
    path::{Path, PathBuf},
    process::Command,
};

const GITIGNORE: &str = "# Dependencies
node_modules/
vendor/

# Build outputs
dist/
build/
*.exe
*.dll
*.so
*.dylib

# Environment variables
.env
.env.local
.env.*.local

# IDE files
.vscode/
.idea/
*.swp
*.swo
*~

# OS files
.DS_Store
Thumbs.db

# Logs
*.log
npm-debug.log*
yarn-debug.log*
yarn-error.log*

# Coverage
coverage/

# Temporary folders
tmp/
temp/
";

/// The steps of setting up a repository, in the order they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GitStep {
    Detect,
    Init,
    Ignore,
    Add,
    Commit,
}

impl Display for GitStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let step = match self {
            GitStep::Detect => "detect git",
            GitStep::Init => "initialize repository",
            GitStep::Ignore => "write .gitignore",
            GitStep::Add => "stage files",
            GitStep::Commit => "make initial commit",
        };
        write!(f, "{}", step)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("git is not available on this system")]
    Unavailable,
    #[error("failed to {step}: {source}")]
    Io { step: GitStep, source: io::Error },
    #[error("failed to {step}: git exited with {status}{}", stderr_suffix(.stderr))]
    Command {
        step: GitStep,
        status: String,
        stderr: String,
    },
}

impl GitError {
    pub fn step(&self) -> GitStep {
        match self {
            GitError::Unavailable => GitStep::Detect,
            GitError::Io { step, .. } | GitError::Command { step, .. } => *step,
        }
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{}", stderr)
    }
}

/// Turns a freshly created project into a git repository with a single
/// commit.
pub struct GitBootstrapper {
    project: PathBuf,
    commit_message: String,
}

impl GitBootstrapper {
    pub fn new(project: impl Into<PathBuf>, commit_message: impl Into<String>) -> Self {
        GitBootstrapper {
            project: project.into(),
            commit_message: commit_message.into(),
        }
    }

    /// Runs every step in order, stopping at the first that fails.
    pub fn setup(&self) -> Result<(), GitError> {
        let git = which::which("git").map_err(|_| GitError::Unavailable)?;
        tracing::debug!(git = %git.display(), "found git");

        self.git(&git, GitStep::Init, &["init"])?;
        if write_ignore_file(&self.project).map_err(|source| GitError::Io {
            step: GitStep::Ignore,
            source,
        })? {
            tracing::debug!("wrote default .gitignore");
        }
        self.git(&git, GitStep::Add, &["add", "."])?;
        self.git(&git, GitStep::Commit, &["commit", "-m", self.commit_message.as_str()])?;

        tracing::info!(project = %self.project.display(), "initialized git repository");
        Ok(())
    }

    fn git(&self, git: &Path, step: GitStep, args: &[&str]) -> Result<(), GitError> {
        tracing::debug!(step = %step, ?args, "running git");
        let output = Command::new(git)
            .args(args)
            .current_dir(&self.project)
            .output()
            .map_err(|source| GitError::Io { step, source })?;
        if output.status.success() {
            Ok(())
        } else {
            Err(GitError::Command {
                step,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Writes the default `.gitignore` into `project`, unless one is already
/// there. Returns whether a file was written.
pub fn write_ignore_file(project: &Path) -> io::Result<bool> {
    let path = project.join(".gitignore");
    if path.exists() {
        return Ok(false);
    }
    fs::write(path, GITIGNORE)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_ignore_file() {
        let dir = TempDir::new().unwrap();
        assert!(write_ignore_file(dir.path()).unwrap());
        let contents = fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert!(contents.contains("node_modules/"));
        assert!(contents.contains(".env"));
    }

    #[test]
    fn never_overwrites_ignore_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".gitignore");
        fs::write(&path, "target/\n").unwrap();
        assert!(!write_ignore_file(dir.path()).unwrap());
        assert_eq!(fs::read_to_string(path).unwrap(), "target/\n");
    }

    #[test]
    fn errors_name_the_failed_step() {
        let err = GitError::Command {
            step: GitStep::Commit,
            status: "exit status: 1".to_string(),
            stderr: "nothing to commit".to_string(),
        };
        assert_eq!(err.step(), GitStep::Commit);
        assert_eq!(
            err.to_string(),
            "failed to make initial commit: git exited with exit status: 1\nnothing to commit"
        );
        assert_eq!(GitError::Unavailable.step(), GitStep::Detect);
    }

    #[test]
    fn init_fails_outside_of_existing_directory() {
        if which::which("git").is_err() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let err = GitBootstrapper::new(dir.path().join("missing"), "Initial commit")
            .setup()
            .unwrap_err();
        assert_eq!(err.step(), GitStep::Init);
        assert!(matches!(err, GitError::Io { .. }));
    }

    #[test]
    fn initializes_repository() {
        if which::which("git").is_err() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let bootstrapper = GitBootstrapper::new(dir.path(), "Initial commit");
        bootstrapper.git(Path::new("git"), GitStep::Init, &["init"]).unwrap();
        assert!(dir.path().join(".git").is_dir());
    }
}
