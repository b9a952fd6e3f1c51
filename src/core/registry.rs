// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Thread-safe name-keyed registry.
//!
//! Backs the message registry and the schema cache. Entries are inserted by
//! explicit registration calls; nothing is discovered at runtime.

use super::error::{CodecError, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe registry keyed by type name.
///
/// Uses RwLock for concurrent read access with exclusive write access.
pub struct TypeRegistry<T> {
    inner: RwLock<HashMap<String, T>>,
}

fn poisoned<E: std::fmt::Display>(e: E) -> CodecError {
    CodecError::Other(format!("Registry lock poisoned: {e}"))
}

impl<T> TypeRegistry<T> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Register an entry, replacing any previous entry of the same name.
    ///
    /// Returns `true` if an entry was replaced.
    pub fn register(&self, name: impl Into<String>, entry: T) -> Result<bool> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        Ok(inner.insert(name.into(), entry).is_some())
    }

    /// Get an entry by name.
    pub fn get(&self, name: &str) -> Result<Option<T>>
    where
        T: Clone,
    {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.get(name).cloned())
    }

    /// Check if an entry is registered.
    pub fn contains(&self, name: &str) -> Result<bool> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.contains_key(name))
    }

    /// Get all registered names, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        let inner = self.inner.read().map_err(poisoned)?;
        let mut names: Vec<String> = inner.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Remove an entry from the registry.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        Ok(inner.remove(name).is_some())
    }

    /// Get the number of registered entries.
    pub fn len(&self) -> Result<usize> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.len())
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<T> Default for TypeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
