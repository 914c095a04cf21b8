use crate::template::Template;
use colored::Colorize;
use std::{
    fmt::Display,
    fs, io,
    path::{Component, Path, PathBuf},
};

/// The filesystem operations needed to lay out a project.
pub trait Filesystem {
    /// Creates a single directory, failing if it already exists.
    fn create_dir(&self, path: &Path) -> io::Result<()>;
    /// Creates a directory and any missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    /// Creates an empty file.
    fn create_file(&self, path: &Path) -> io::Result<()>;
}

/// The host filesystem.
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn create_file(&self, path: &Path) -> io::Result<()> {
        fs::File::create(path).map(drop)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Create,
    Preview,
}

#[derive(Debug, thiserror::Error)]
pub enum MaterializeError {
    #[error("failed to create project directory '{}': {source}", .path.display())]
    ProjectDir { path: PathBuf, source: io::Error },
    #[error("failed to create folder '{entry}': {source}")]
    Folder { entry: String, source: io::Error },
    #[error("failed to create parent directory for '{entry}': {source}")]
    Parent { entry: String, source: io::Error },
    #[error("failed to create file '{entry}': {source}")]
    File { entry: String, source: io::Error },
    #[error("refusing to create '{0}' outside of the project directory")]
    OutsideProject(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewEntry {
    Folder(String),
    File(String),
}

/// What a template would create: the project folder, its folders, and
/// then its files, each in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preview {
    pub root: String,
    pub entries: Vec<PreviewEntry>,
}

impl Preview {
    pub fn of(template: &Template) -> Self {
        let folders = template
            .folders
            .iter()
            .map(|f| PreviewEntry::Folder(f.clone()));
        let files = template.files.iter().map(|f| PreviewEntry::File(f.clone()));
        Preview {
            root: template.name.clone(),
            entries: folders.chain(files).collect(),
        }
    }
}

impl Display for Preview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{}/", self.root).cyan().bold())?;
        for entry in &self.entries {
            match entry {
                PreviewEntry::Folder(folder) => {
                    write!(f, "\n  {} {}", "dir ".dimmed(), format!("{}/", folder).blue())?
                }
                PreviewEntry::File(file) => write!(f, "\n  {} {}", "file".dimmed(), file.green())?,
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum Materialized {
    /// The project was written to disk, at the given path.
    Created(PathBuf),
    Preview(Preview),
}

/// Joins a template entry onto the project directory, provided that the
/// result stays inside of it.
fn within(project: &Path, entry: &str) -> Result<PathBuf, MaterializeError> {
    let relative = Path::new(entry);
    let contained = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !contained || entry.starts_with('\\') || entry.contains("..\\") {
        return Err(MaterializeError::OutsideProject(entry.to_string()));
    }
    Ok(project.join(relative))
}

/// Joins the project name onto the base directory. The name must be a
/// single plain path segment.
fn project_dir(base: &Path, name: &str) -> Result<PathBuf, MaterializeError> {
    let mut components = Path::new(name).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single || name.contains(&['/', '\\'][..]) {
        return Err(MaterializeError::OutsideProject(name.to_string()));
    }
    Ok(base.join(name))
}

/// Lays out templates under a base directory.
pub struct Materializer<'f, F: Filesystem> {
    fs: &'f F,
    base: PathBuf,
}

impl<'f, F: Filesystem> Materializer<'f, F> {
    pub fn new(fs: &'f F, base: impl Into<PathBuf>) -> Self {
        Materializer {
            fs,
            base: base.into(),
        }
    }

    pub fn materialize(
        &self,
        template: &Template,
        mode: Mode,
    ) -> Result<Materialized, MaterializeError> {
        match mode {
            Mode::Create => self.create(template).map(Materialized::Created),
            Mode::Preview => Ok(Materialized::Preview(Preview::of(template))),
        }
    }

    /// Creates the project directory, then every folder, then every
    /// file. Stops at the first failure, leaving whatever was already
    /// created in place.
    fn create(&self, template: &Template) -> Result<PathBuf, MaterializeError> {
        let project = project_dir(&self.base, &template.name)?;
        self.fs
            .create_dir(&project)
            .map_err(|source| MaterializeError::ProjectDir {
                path: project.clone(),
                source,
            })?;
        tracing::debug!(path = %project.display(), "created project directory");

        for folder in &template.folders {
            let path = within(&project, folder)?;
            self.fs
                .create_dir_all(&path)
                .map_err(|source| MaterializeError::Folder {
                    entry: folder.clone(),
                    source,
                })?;
            tracing::debug!(folder = %folder, "created folder");
        }

        for file in &template.files {
            let path = within(&project, file)?;
            if let Some(parent) = path.parent().filter(|parent| *parent != project) {
                self.fs
                    .create_dir_all(parent)
                    .map_err(|source| MaterializeError::Parent {
                        entry: file.clone(),
                        source,
                    })?;
            }
            self.fs
                .create_file(&path)
                .map_err(|source| MaterializeError::File {
                    entry: file.clone(),
                    source,
                })?;
            tracing::debug!(file = %file, "created file");
        }

        Ok(project)
    }
}
