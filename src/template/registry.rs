//! Partial template sources
//!
//! The renderer asks a [`PartialLoader`] for a partial's source whenever it
//! meets a `{{>name}}` tag. Loaders only hand back text; parsing and
//! rendering stay with the renderer.

use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Default file extension for partials read from disk
pub const DEFAULT_EXTENSION: &str = "mustache";

/// Errors that can occur while registering partials
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A partial with this name is already registered
    #[error("duplicate partial definition: {name}")]
    Duplicate { name: String },
}

/// Supplies template source for partial tags
pub trait PartialLoader {
    /// Source of the partial called `name`, or `None` if there is none
    fn load(&self, name: &str) -> Option<String>;
}

impl<F> PartialLoader for F
where
    F: Fn(&str) -> Option<String>,
{
    fn load(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// In-memory partials keyed by name
#[derive(Debug, Default, Clone)]
pub struct PartialRegistry {
    partials: HashMap<String, String>,
}

impl PartialRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a partial's source
    pub fn register(
        &mut self,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.partials.contains_key(&name) {
            return Err(RegistryError::Duplicate { name });
        }
        self.partials.insert(name, source.into());
        Ok(())
    }

    /// Builder form of [`PartialRegistry::register`]
    pub fn with(mut self, name: impl Into<String>, source: impl Into<String>) -> Result<Self, RegistryError> {
        self.register(name, source)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.partials.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.partials.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.partials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.partials.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl PartialLoader for PartialRegistry {
    fn load(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }
}

/// Partials read from `<base>/<name>.<extension>` on demand
#[derive(Debug, Clone)]
pub struct PartialDir {
    base_path: PathBuf,
    extension: String,
}

impl PartialDir {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Use a different file extension (without the dot)
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Path a partial name maps to
    ///
    /// Names that could escape the base directory map to nothing.
    pub fn path_for(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains("..") || name.starts_with(['/', '\\']) {
            return None;
        }
        if self.extension.is_empty() {
            return Some(self.base_path.join(name));
        }
        Some(self.base_path.join(format!("{}.{}", name, self.extension)))
    }
}

impl PartialLoader for PartialDir {
    fn load(&self, name: &str) -> Option<String> {
        let path = self.path_for(name)?;
        match std::fs::read_to_string(&path) {
            Ok(source) => Some(source),
            Err(e) => {
                tracing::debug!(partial = name, path = %path.display(), error = %e, "partial file not readable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_roundtrip() {
        let mut registry = PartialRegistry::new();
        registry.register("header", "<h1>{{title}}</h1>").unwrap();
        assert!(registry.contains("header"));
        assert_eq!(registry.load("header").as_deref(), Some("<h1>{{title}}</h1>"));
        assert_eq!(registry.load("footer"), None);
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = PartialRegistry::new();
        registry.register("a", "1").unwrap();
        let err = registry.register("a", "2").unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { ref name } if name == "a"));
        assert_eq!(registry.get("a"), Some("1"));
    }

    #[test]
    fn test_names_sorted() {
        let registry = PartialRegistry::new()
            .with("b", "")
            .and_then(|r| r.with("a", ""))
            .unwrap();
        assert_eq!(registry.names(), vec!["a", "b"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_closure_loader() {
        let loader = |name: &str| (name == "x").then(|| "X".to_string());
        assert_eq!(loader.load("x").as_deref(), Some("X"));
        assert_eq!(loader.load("y"), None);
    }

    #[test]
    fn test_dir_paths() {
        let dir = PartialDir::new("/templates");
        assert_eq!(
            dir.path_for("header"),
            Some(PathBuf::from("/templates/header.mustache"))
        );
        assert_eq!(
            dir.clone().with_extension("html").path_for("nav/top"),
            Some(PathBuf::from("/templates/nav/top.html"))
        );
        assert_eq!(dir.path_for("../secret"), None);
        assert_eq!(dir.path_for("/etc/passwd"), None);
        assert_eq!(dir.path_for(""), None);
    }

    #[test]
    fn test_dir_reads_files() {
        let base = std::env::temp_dir().join(format!("mustache-lite-partials-{}", std::process::id()));
        std::fs::create_dir_all(&base).unwrap();
        std::fs::write(base.join("greeting.mustache"), "Hi {{name}}").unwrap();

        let dir = PartialDir::new(&base);
        assert_eq!(dir.load("greeting").as_deref(), Some("Hi {{name}}"));
        assert_eq!(dir.load("missing"), None);

        std::fs::remove_dir_all(&base).unwrap();
    }
}
