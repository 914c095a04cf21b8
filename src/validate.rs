use crate::template::Template;
use std::{
    collections::HashSet,
    fmt::Display,
    path::{Component, Path},
};

/// Characters that may not appear in the project name.
const INVALID_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
/// Characters that may not appear in folder or file entries. Path
/// separators are allowed, so that nested paths can be declared.
const INVALID_PATH_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// A single structural problem with a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// Which part of the template is at fault, e.g. `name` or `folders[2]`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every problem found with a template, in the order they were found.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plural = if self.0.len() == 1 { "" } else { "s" };
        write!(f, "template has {} problem{}:", self.0.len(), plural)?;
        for error in self.iter() {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Kind {
    Folder,
    File,
}

impl Kind {
    fn list(self) -> &'static str {
        match self {
            Kind::Folder => "folders",
            Kind::File => "files",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Kind::Folder => "folder",
            Kind::File => "file",
        }
    }
}

/// Whether `entry` could point outside of the project folder once joined
/// onto it.
fn escapes_root(entry: &str) -> bool {
    // Backslashes are separators on Windows only; check for them regardless,
    // so that templates behave the same on every platform.
    let path = entry.replace('\\', "/");
    let path = Path::new(&path);
    path.is_absolute()
        || entry.starts_with('/')
        || entry.starts_with('\\')
        || path.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        })
}

/// Checks the entry-local rules (emptiness, character set, containment),
/// pushing one error per violated rule.
fn check_entry(kind: Kind, index: usize, entry: &str, errors: &mut Vec<ValidationError>) {
    let field = format!("{}[{}]", kind.list(), index);
    if entry.is_empty() {
        errors.push(ValidationError::new(
            field,
            format!("{} name cannot be empty", kind.noun()),
        ));
        return;
    }
    if entry.contains(INVALID_PATH_CHARS) {
        errors.push(ValidationError::new(
            field.clone(),
            format!("{} name contains invalid characters: {}", kind.noun(), entry),
        ));
    }
    if escapes_root(entry) {
        errors.push(ValidationError::new(
            field,
            format!("{} path escapes the project folder: {}", kind.noun(), entry),
        ));
    }
}

/// Checks a template for structural errors, without touching the
/// filesystem.
///
/// All problems are collected before returning, so that a template
/// can be fixed in one go. Running this twice on the same template
/// gives the same errors, in the same order.
pub fn validate(template: &Template) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if template.name.is_empty() {
        errors.push(ValidationError::new("name", "project name cannot be empty"));
    } else if template.name.contains(INVALID_NAME_CHARS) {
        errors.push(ValidationError::new(
            "name",
            "project name contains invalid characters",
        ));
    } else if template.name == "." || template.name == ".." {
        errors.push(ValidationError::new(
            "name",
            format!("project name cannot be '{}'", template.name),
        ));
    }

    let mut seen_folders = HashSet::new();
    for (i, folder) in template.folders.iter().enumerate() {
        check_entry(Kind::Folder, i, folder, &mut errors);
        if !seen_folders.insert(folder.as_str()) {
            errors.push(ValidationError::new(
                format!("folders[{}]", i),
                format!("duplicate folder: {}", folder),
            ));
        }
    }

    let mut seen_files = HashSet::new();
    for (i, file) in template.files.iter().enumerate() {
        check_entry(Kind::File, i, file, &mut errors);
        if !seen_files.insert(file.as_str()) {
            errors.push(ValidationError::new(
                format!("files[{}]", i),
                format!("duplicate file: {}", file),
            ));
        }
        if seen_folders.contains(file.as_str()) {
            errors.push(ValidationError::new(
                format!("files[{}]", i),
                format!("file conflicts with folder: {}", file),
            ));
        }
    }

    // Walk the folders in declaration order (rather than the set) so that
    // the reported errors are stable between runs.
    let mut reported = HashSet::new();
    for (i, folder) in template.folders.iter().enumerate() {
        if seen_files.contains(folder.as_str()) && reported.insert(folder.as_str()) {
            errors.push(ValidationError::new(
                format!("folders[{}]", i),
                format!("folder conflicts with file: {}", folder),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
