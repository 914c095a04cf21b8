use serde::{Deserialize, Serialize};

/// A project layout: the project folder name, plus the folders and
/// (empty) files to create inside of it.
///
/// Paths in `folders` and `files` are relative to the project folder,
/// and are kept in declaration order, which is the order in which
/// they are created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub folders: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Template {
            name: name.into(),
            ..Template::default()
        }
    }

    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folders.push(folder.into());
        self
    }

    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.files.push(file.into());
        self
    }

    /// Replaces the project name, if an override is given.
    pub fn rename(&mut self, name: Option<&str>) {
        if let Some(name) = name {
            self.name = name.to_string();
        }
    }

    /// Parses a template from its YAML representation.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }
}
