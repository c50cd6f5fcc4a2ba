//! Host-side registry of owned universes behind opaque handles
//!
//! Hosts that address a universe across a call boundary hold a
//! `UniverseHandle` instead of a reference. The registry owns the instances,
//! invalidates a handle exactly once on release, and turns any
//! use-after-release into a typed error instead of silently tolerating it.

use crate::game_of_life::Universe;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("universe handle {0} is not registered or was already released")]
    StaleHandle(u64),
}

/// Opaque ownership token for a registered universe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniverseHandle(u64);

impl UniverseHandle {
    /// Numeric identity of the handle, for diagnostics
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Maps opaque handles to live universe instances
///
/// Handle values are never reused within one registry, so a released handle
/// stays invalid for the registry's lifetime.
#[derive(Debug, Default)]
pub struct UniverseRegistry {
    next_id: u64,
    universes: HashMap<u64, Universe>,
}

impl UniverseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a universe and hand back its token
    pub fn register(&mut self, universe: Universe) -> UniverseHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.universes.insert(id, universe);
        UniverseHandle(id)
    }

    /// Borrow the universe behind a handle
    pub fn get(&self, handle: UniverseHandle) -> Result<&Universe, RegistryError> {
        self.universes
            .get(&handle.0)
            .ok_or(RegistryError::StaleHandle(handle.0))
    }

    /// Mutably borrow the universe behind a handle
    pub fn get_mut(&mut self, handle: UniverseHandle) -> Result<&mut Universe, RegistryError> {
        self.universes
            .get_mut(&handle.0)
            .ok_or(RegistryError::StaleHandle(handle.0))
    }

    /// Release a handle, returning the owned universe
    ///
    /// The handle is invalid afterwards; releasing or dereferencing it again
    /// is a `StaleHandle` error.
    pub fn release(&mut self, handle: UniverseHandle) -> Result<Universe, RegistryError> {
        self.universes
            .remove(&handle.0)
            .ok_or(RegistryError::StaleHandle(handle.0))
    }

    /// Number of live universes
    pub fn len(&self) -> usize {
        self.universes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_access() {
        let mut registry = UniverseRegistry::new();
        let handle = registry.register(Universe::new(4, 4).unwrap());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(handle).unwrap().width(), 4);

        registry.get_mut(handle).unwrap().tick();
        assert_eq!(registry.get(handle).unwrap().generation(), 1);
    }

    #[test]
    fn test_handles_are_distinct() {
        let mut registry = UniverseRegistry::new();
        let a = registry.register(Universe::dead(2, 2).unwrap());
        let b = registry.register(Universe::dead(3, 3).unwrap());

        assert_ne!(a, b);
        assert_eq!(registry.get(a).unwrap().width(), 2);
        assert_eq!(registry.get(b).unwrap().width(), 3);
    }

    #[test]
    fn test_release_returns_universe_once() {
        let mut registry = UniverseRegistry::new();
        let handle = registry.register(Universe::dead(5, 5).unwrap());

        let universe = registry.release(handle).unwrap();
        assert_eq!(universe.height(), 5);
        assert!(registry.is_empty());

        assert_eq!(registry.release(handle), Err(RegistryError::StaleHandle(handle.id())));
    }

    #[test]
    fn test_use_after_release_is_an_error() {
        let mut registry = UniverseRegistry::new();
        let handle = registry.register(Universe::dead(2, 2).unwrap());
        registry.release(handle).unwrap();

        assert!(matches!(registry.get(handle), Err(RegistryError::StaleHandle(_))));
        assert!(matches!(registry.get_mut(handle), Err(RegistryError::StaleHandle(_))));
    }

    #[test]
    fn test_handle_ids_not_reused() {
        let mut registry = UniverseRegistry::new();
        let first = registry.register(Universe::dead(2, 2).unwrap());
        registry.release(first).unwrap();

        let second = registry.register(Universe::dead(2, 2).unwrap());
        assert_ne!(first.id(), second.id());
        assert!(registry.get(first).is_err());
    }
}
