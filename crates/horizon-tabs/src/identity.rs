//! Tab keys and remount detection.
//!
//! Native tab bar hosts cannot insert, remove or reorder mounted tabs. When
//! the composition of a tab bar (its ordered routes and their hidden flags)
//! changes, every key is replaced so the host rebuilds from scratch. Nested
//! navigation state inside the tabs is lost when that happens.
//!
//! Configuration changes such as titles, icons or badges never change keys.

use std::collections::HashMap;

use horizon_tabs_core::logging::targets;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SUFFIX_LEN: usize = 8;

/// One declared tab as far as composition is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionEntry {
    pub route_name: String,
    pub hidden: bool,
}

impl CompositionEntry {
    pub fn new(route_name: impl Into<String>, hidden: bool) -> Self {
        Self {
            route_name: route_name.into(),
            hidden,
        }
    }
}

/// Result of [`IdentityManager::compute_identities`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityUpdate {
    /// Key per route.
    pub keys: HashMap<String, String>,
    /// The host must be rebuilt.
    pub remount: bool,
    pub generation: u64,
}

/// Owns the generation counter and the key map of one tab bar.
///
/// The generation exists from the first composition on, is bumped on every
/// structural change and goes away with the manager.
pub struct IdentityManager {
    rng: StdRng,
    composition: Option<Vec<CompositionEntry>>,
    generation: u64,
    keys: HashMap<String, String>,
    routes: HashMap<String, String>,
}

impl IdentityManager {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic suffixes, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            composition: None,
            generation: 0,
            keys: HashMap::new(),
            routes: HashMap::new(),
        }
    }

    /// Compare `composition` with the previous one and produce the key map.
    ///
    /// Keys are reused when nothing structural changed. Otherwise the
    /// generation increments and every suffix is regenerated; `remount` is
    /// set unless this is the first composition.
    pub fn compute_identities(&mut self, composition: &[CompositionEntry]) -> IdentityUpdate {
        let remount = match &self.composition {
            Some(previous) if previous.as_slice() == composition => {
                return IdentityUpdate {
                    keys: self.keys.clone(),
                    remount: false,
                    generation: self.generation,
                };
            }
            Some(_) => {
                self.generation += 1;
                true
            }
            None => false,
        };

        self.keys.clear();
        self.routes.clear();
        for entry in composition {
            let suffix = self.suffix();
            let key = format!("{}-{}-{}", entry.route_name, self.generation, suffix);
            self.routes.insert(key.clone(), entry.route_name.clone());
            self.keys.insert(entry.route_name.clone(), key);
        }
        self.composition = Some(composition.to_vec());

        if remount {
            tracing::debug!(target: targets::IDENTITY, generation = self.generation, "composition changed, remounting");
        } else {
            tracing::debug!(target: targets::IDENTITY, tabs = composition.len(), "first composition");
        }

        IdentityUpdate {
            keys: self.keys.clone(),
            remount,
            generation: self.generation,
        }
    }

    fn suffix(&mut self) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(SUFFIX_LEN)
            .map(char::from)
            .collect()
    }

    pub fn key_for(&self, route_name: &str) -> Option<&str> {
        self.keys.get(route_name).map(String::as_str)
    }

    /// Reverse lookup of a key issued by the current generation.
    pub fn route_for_key(&self, key: &str) -> Option<&str> {
        self.routes.get(key).map(String::as_str)
    }

    /// `None` before the first composition.
    pub fn generation(&self) -> Option<u64> {
        self.composition.as_ref().map(|_| self.generation)
    }
}

impl Default for IdentityManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(entries: &[(&str, bool)]) -> Vec<CompositionEntry> {
        entries
            .iter()
            .map(|(route, hidden)| CompositionEntry::new(*route, *hidden))
            .collect()
    }

    #[test]
    fn test_first_composition_does_not_remount() {
        let mut manager = IdentityManager::with_seed(1);
        assert_eq!(manager.generation(), None);

        let update = manager.compute_identities(&tabs(&[("index", false), ("second", false)]));
        assert!(!update.remount);
        assert_eq!(update.generation, 0);
        assert!(update.keys["index"].starts_with("index-0-"));
        assert!(update.keys["second"].starts_with("second-0-"));
    }

    #[test]
    fn test_same_composition_keeps_keys() {
        let mut manager = IdentityManager::with_seed(1);
        let composition = tabs(&[("index", false), ("second", false)]);

        let first = manager.compute_identities(&composition);
        let second = manager.compute_identities(&composition);
        assert!(!second.remount);
        assert_eq!(first.keys, second.keys);
        assert_eq!(first.generation, second.generation);
    }

    #[test]
    fn test_hidden_toggle_changes_every_key() {
        let mut manager = IdentityManager::with_seed(1);
        let first = manager.compute_identities(&tabs(&[("index", false), ("second", false)]));
        let second = manager.compute_identities(&tabs(&[("index", false), ("second", true)]));

        assert!(second.remount);
        assert_eq!(second.generation, first.generation + 1);
        for route in ["index", "second"] {
            assert_ne!(first.keys[route], second.keys[route]);
        }
    }

    #[test]
    fn test_reorder_is_structural() {
        let mut manager = IdentityManager::with_seed(1);
        manager.compute_identities(&tabs(&[("index", false), ("second", false)]));
        let update = manager.compute_identities(&tabs(&[("second", false), ("index", false)]));
        assert!(update.remount);
    }

    #[test]
    fn test_route_for_key_tracks_current_generation() {
        let mut manager = IdentityManager::with_seed(1);
        let first = manager.compute_identities(&tabs(&[("index", false)]));
        let old_key = first.keys["index"].clone();
        assert_eq!(manager.route_for_key(&old_key), Some("index"));

        manager.compute_identities(&tabs(&[("index", false), ("second", false)]));
        assert_eq!(manager.route_for_key(&old_key), None);
        let new_key = manager.key_for("index").unwrap().to_string();
        assert_eq!(manager.route_for_key(&new_key), Some("index"));
    }

    #[test]
    fn test_key_shape() {
        let mut manager = IdentityManager::with_seed(7);
        let update = manager.compute_identities(&tabs(&[("index", false)]));
        let key = &update.keys["index"];
        let suffix = key.trim_start_matches("index-0-");
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
