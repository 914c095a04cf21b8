use crate::resolve::ResolveError;
use std::{
    collections::{btree_map::Entry, BTreeMap},
    fmt::Display,
    path::PathBuf,
};

/// Where the declarative document for a registered template lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    /// Shipped inside the binary.
    Bundled {
        file: &'static str,
        contents: &'static str,
    },
    /// A template file on disk, from the user's templates directory.
    File(PathBuf),
}

impl Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::Bundled { file, .. } => write!(f, "(bundled) {}", file),
            Locator::File(path) => write!(f, "{}", path.to_string_lossy()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub key: String,
    pub name: String,
    pub description: String,
    pub locator: Locator,
}

macro_rules! bundled {
    ($key:literal, $description:literal) => {
        TemplateDescriptor {
            key: $key.to_string(),
            name: $key.to_string(),
            description: $description.to_string(),
            locator: Locator::Bundled {
                file: concat!("templates/", $key, ".yaml"),
                contents: include_str!(concat!("../templates/", $key, ".yaml")),
            },
        }
    };
}

/// The templates that can be selected by key, sorted by key.
///
/// A registry is built once at startup and only read afterwards.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    templates: BTreeMap<String, TemplateDescriptor>,
}

impl Registry {
    /// A registry holding only the templates shipped with scaffold.
    pub fn builtin() -> Self {
        let mut registry = Registry::default();
        for descriptor in vec![
            bundled!(
                "react-app",
                "React application with components, pages, and utils"
            ),
            bundled!("go-api", "Go API project with handlers, models, and database"),
            bundled!(
                "node-express",
                "Node.js Express application with routes and middleware"
            ),
        ] {
            registry.templates.insert(descriptor.key.clone(), descriptor);
        }
        registry
    }

    /// Registers a new template. If the key is already taken, the
    /// registry is left untouched and the rejected descriptor is
    /// handed back.
    pub fn register(&mut self, descriptor: TemplateDescriptor) -> Result<(), TemplateDescriptor> {
        match self.templates.entry(descriptor.key.clone()) {
            Entry::Occupied(_) => Err(descriptor),
            Entry::Vacant(entry) => {
                entry.insert(descriptor);
                Ok(())
            }
        }
    }

    pub fn lookup(&self, key: &str) -> Result<&TemplateDescriptor, ResolveError> {
        self.templates
            .get(key)
            .ok_or_else(|| ResolveError::NotFound(key.to_string()))
    }

    /// All templates, in key order.
    pub fn list(&self) -> impl Iterator<Item = &TemplateDescriptor> {
        self.templates.values()
    }
}
