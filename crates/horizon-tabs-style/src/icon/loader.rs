//! Asynchronous vector glyph loading with a lookup cache.
//!
//! Lookups run on a deferred turn of the shared task queue. Results come back
//! as messages over a channel and are folded into the cache by
//! [`IconLoader::drain`]; the next render pass reads them through a
//! [`ResolvedImages`] snapshot. Nothing already returned to a caller is ever
//! mutated.

use std::collections::HashMap;
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use horizon_tabs_core::SharedTaskQueue;
use horizon_tabs_core::logging::targets;

use super::resolver::PendingLookup;
use crate::error::Result;
use crate::types::ImageSource;

/// Cache key for a glyph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub family: String,
    pub name: String,
}

impl LookupKey {
    pub fn new(family: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            name: name.into(),
        }
    }
}

/// Loaded glyph images, as seen by one render pass.
#[derive(Debug, Clone, Default)]
pub struct ResolvedImages {
    images: HashMap<LookupKey, ImageSource>,
}

impl ResolvedImages {
    pub fn get(&self, key: &LookupKey) -> Option<&ImageSource> {
        self.images.get(key)
    }

    pub fn insert(&mut self, key: LookupKey, source: ImageSource) {
        self.images.insert(key, source);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Cache entry for a lookup.
#[derive(Debug, Clone, PartialEq)]
enum CacheEntry {
    Pending,
    Found(ImageSource),
    NotFound,
}

/// A completed lookup, reported by [`IconLoader::drain`].
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOutcome {
    pub key: LookupKey,
    /// Routes that asked for the glyph while it was pending.
    pub routes: Vec<String>,
    pub found: bool,
}

type LookupMessage = (LookupKey, Result<ImageSource>);

/// Loads vector glyphs on deferred turns and caches the outcome.
pub struct IconLoader {
    queue: Arc<SharedTaskQueue>,
    sender: Sender<LookupMessage>,
    receiver: Receiver<LookupMessage>,
    cache: HashMap<LookupKey, CacheEntry>,
    waiting: HashMap<LookupKey, Vec<String>>,
}

impl IconLoader {
    /// Create a loader posting its lookups to `queue`.
    pub fn new(queue: Arc<SharedTaskQueue>) -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            queue,
            sender,
            receiver,
            cache: HashMap::new(),
            waiting: HashMap::new(),
        }
    }

    /// Ask for a glyph on behalf of `route`.
    ///
    /// Returns `true` if a new lookup was scheduled. Pending lookups are
    /// joined; failed lookups are not retried.
    pub fn request(&mut self, lookup: &PendingLookup, route: &str) -> bool {
        let key = lookup.key();
        match self.cache.get(&key) {
            Some(CacheEntry::Pending) => {
                let routes = self.waiting.entry(key).or_default();
                if !routes.iter().any(|r| r == route) {
                    routes.push(route.to_string());
                }
                false
            }
            Some(CacheEntry::Found(_)) | Some(CacheEntry::NotFound) => false,
            None => {
                self.cache.insert(key.clone(), CacheEntry::Pending);
                self.waiting.insert(key.clone(), vec![route.to_string()]);

                let family = lookup.family.clone();
                let name = lookup.name.clone();
                let sender = self.sender.clone();
                tracing::debug!(target: targets::ICON, family = %key.family, name = %key.name, "scheduling icon lookup");
                self.queue.post("icon-lookup", move || {
                    let result = family.image_source(&name);
                    // The loader may already be gone.
                    let _ = sender.send((key, result));
                });
                true
            }
        }
    }

    /// Fold finished lookups into the cache.
    pub fn drain(&mut self) -> Vec<LookupOutcome> {
        let mut outcomes = Vec::new();
        while let Ok((key, result)) = self.receiver.try_recv() {
            let found = match result {
                Ok(source) => {
                    self.cache.insert(key.clone(), CacheEntry::Found(source));
                    true
                }
                Err(err) => {
                    tracing::warn!(target: targets::ICON, error = %err, "icon lookup failed");
                    self.cache.insert(key.clone(), CacheEntry::NotFound);
                    false
                }
            };
            let routes = self.waiting.remove(&key).unwrap_or_default();
            outcomes.push(LookupOutcome { key, routes, found });
        }
        outcomes
    }

    /// Images loaded so far.
    pub fn snapshot(&self) -> ResolvedImages {
        let images = self
            .cache
            .iter()
            .filter_map(|(key, entry)| match entry {
                CacheEntry::Found(source) => Some((key.clone(), source.clone())),
                _ => None,
            })
            .collect();
        ResolvedImages { images }
    }

    pub fn is_pending(&self, key: &LookupKey) -> bool {
        matches!(self.cache.get(key), Some(CacheEntry::Pending))
    }

    pub fn pending_count(&self) -> usize {
        self.cache
            .values()
            .filter(|entry| matches!(entry, CacheEntry::Pending))
            .count()
    }
}
