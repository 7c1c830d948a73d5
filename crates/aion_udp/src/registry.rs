//! Per-compilation UDP label registry.
//!
//! The freeze/unfreeze split is a type-level guarantee: once a simulation
//! build finishes registering definitions, [`UdpRegistry::freeze`] consumes
//! it and returns a [`FrozenUdpRegistry`] that has no `register` method at
//! all — later code cannot accidentally mutate the symbol table mid-build.

use std::collections::HashMap;

use crate::definition::UdpDefinition;
use crate::error::UdpError;

/// A UDP label→definition table under construction.
///
/// Created at simulation build-start, populated by the parser as UDP
/// declarations are compiled, and consumed by [`freeze`](Self::freeze) at
/// build-end.
#[derive(Default)]
pub struct UdpRegistry {
    definitions: HashMap<String, UdpDefinition>,
}

impl UdpRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `definition` under `label`.
    ///
    /// # Errors
    ///
    /// Returns [`UdpError::DuplicateDefinition`] if `label` is already
    /// registered.
    pub fn register(&mut self, label: impl Into<String>, definition: UdpDefinition) -> Result<(), UdpError> {
        let label = label.into();
        if self.definitions.contains_key(&label) {
            return Err(UdpError::DuplicateDefinition { label });
        }
        self.definitions.insert(label, definition);
        Ok(())
    }

    /// Number of definitions currently registered.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// `true` iff no definitions are registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Consumes this registry, returning a [`FrozenUdpRegistry`] with no
    /// further write access.
    pub fn freeze(self) -> FrozenUdpRegistry {
        FrozenUdpRegistry {
            definitions: self.definitions,
        }
    }
}

/// A read-only UDP label→definition table, resolved by instance creation.
pub struct FrozenUdpRegistry {
    definitions: HashMap<String, UdpDefinition>,
}

impl FrozenUdpRegistry {
    /// Looks up the definition registered under `label`.
    ///
    /// # Errors
    ///
    /// Returns [`UdpError::UnknownDefinition`] if no definition is
    /// registered under `label`.
    pub fn get(&self, label: &str) -> Result<&UdpDefinition, UdpError> {
        self.definitions
            .get(label)
            .ok_or_else(|| UdpError::UnknownDefinition {
                label: label.to_string(),
            })
    }

    /// Number of definitions held.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// `true` iff this registry holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
