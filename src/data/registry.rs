//! Source registry: the chronologically ordered list of (term, URL) pairs.
//!
//! The registry is configuration, not a global. A normal run uses the built-in
//! list compiled from `data/registry.json`; tests and archived re-runs pass
//! their own file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::TermDescriptor;
use crate::error::AppError;

const BUILTIN_REGISTRY: &str = include_str!("../../data/registry.json");

#[derive(Debug, Deserialize)]
struct RegistryEntry {
    term: String,
    url: String,
}

/// Ordered terms plus the term → index lookup.
#[derive(Debug, Clone)]
pub struct Registry {
    terms: Vec<TermDescriptor>,
    index: HashMap<String, usize>,
    /// Directory that relative local URLs are resolved against.
    base_dir: Option<PathBuf>,
}

impl Registry {
    /// The registry shipped with the binary.
    pub fn builtin() -> Result<Self, AppError> {
        Self::from_json(BUILTIN_REGISTRY, None)
    }

    /// Load a registry file. Relative local URLs resolve against its directory.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|e| {
            AppError::new(2, format!("Failed to read registry '{}': {e}", path.display()))
        })?;
        let base_dir = path.parent().map(Path::to_path_buf);
        Self::from_json(&text, base_dir)
    }

    pub fn from_json(text: &str, base_dir: Option<PathBuf>) -> Result<Self, AppError> {
        let entries: Vec<RegistryEntry> = serde_json::from_str(text)
            .map_err(|e| AppError::new(2, format!("Invalid registry JSON: {e}")))?;
        let pairs = entries.into_iter().map(|e| (e.term, e.url)).collect();
        let mut registry = Self::from_pairs(pairs)?;
        registry.base_dir = base_dir;
        Ok(registry)
    }

    /// Build from (term, url) pairs given in chronological order.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, AppError> {
        if pairs.is_empty() {
            return Err(AppError::new(2, "Registry contains no terms."));
        }

        let mut terms = Vec::with_capacity(pairs.len());
        let mut index = HashMap::with_capacity(pairs.len());

        for (term_index, (term, url)) in pairs.into_iter().enumerate() {
            let term = term.trim().to_string();
            let url = url.trim().to_string();
            if term.is_empty() {
                return Err(AppError::new(
                    2,
                    format!("Registry entry {term_index} has a blank term label."),
                ));
            }
            if url.is_empty() {
                return Err(AppError::new(2, format!("Registry term '{term}' has a blank URL.")));
            }
            if index.insert(term.clone(), term_index).is_some() {
                return Err(AppError::new(
                    2,
                    format!("Registry lists term '{term}' more than once."),
                ));
            }
            terms.push(TermDescriptor { term, url, term_index });
        }

        Ok(Self {
            terms,
            index,
            base_dir: None,
        })
    }

    pub fn terms(&self) -> &[TermDescriptor] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Term labels in registry order.
    pub fn labels(&self) -> Vec<String> {
        self.terms.iter().map(|t| t.term.clone()).collect()
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }
}
