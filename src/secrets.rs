//! Named secret resolution.
//!
//! Components never read credentials themselves; [`crate::config::PipelineConfig`]
//! resolves every secret once at start-up through a [`SecretStore`].

use secrecy::SecretString;
use std::collections::HashMap;

use crate::core::{PipelineError, Result};

/// Resolves a secret by project id and name.
pub trait SecretStore {
    /// Returns `Ok(None)` when the secret does not exist.
    ///
    /// # Errors
    ///
    /// Implementations backed by a remote service report transport failures here.
    fn lookup(&self, project: &str, name: &str) -> Result<Option<SecretString>>;

    /// Like [`SecretStore::lookup`], but an absent secret is an error.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingSecret`] when the secret does not exist.
    fn require(&self, project: &str, name: &str) -> Result<SecretString> {
        self.lookup(project, name)?
            .ok_or_else(|| PipelineError::MissingSecret { name: name.to_owned() })
    }
}

/// Reads `{PROJECT}_{NAME}` from the process environment, falling back to `{NAME}`.
/// The project id is upper-cased with `-` mapped to `_`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecretStore;

impl SecretStore for EnvSecretStore {
    fn lookup(&self, project: &str, name: &str) -> Result<Option<SecretString>> {
        let scoped = scoped_key(project, name);
        let value = scoped
            .and_then(|k| std::env::var(k).ok())
            .or_else(|| std::env::var(name).ok())
            .filter(|v| !v.is_empty());
        Ok(value.map(SecretString::from))
    }
}

/// In-memory store keyed by `(project, name)`.
#[derive(Debug, Default, Clone)]
pub struct MapSecretStore {
    entries: HashMap<(String, String), String>,
}

impl MapSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, project: &str, name: &str, value: &str) -> Self {
        self.entries
            .insert((project.to_owned(), name.to_owned()), value.to_owned());
        self
    }
}

impl SecretStore for MapSecretStore {
    fn lookup(&self, project: &str, name: &str) -> Result<Option<SecretString>> {
        Ok(self
            .entries
            .get(&(project.to_owned(), name.to_owned()))
            .map(|v| SecretString::from(v.clone())))
    }
}

fn scoped_key(project: &str, name: &str) -> Option<String> {
    if project.is_empty() {
        return None;
    }
    let prefix: String = project
        .chars()
        .map(|c| if c == '-' { '_' } else { c.to_ascii_uppercase() })
        .collect();
    Some(format!("{prefix}_{name}"))
}
