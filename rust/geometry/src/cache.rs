// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry cache - memoized member solids
//!
//! Structurally identical members (same family, same normalized parameters,
//! same length) share one solid. Entries are keyed by a canonical signature
//! string and evicted least-recently-used first once either the entry or the
//! byte ceiling is reached. Entries held by more than one member are pinned.
//!
//! Correctness relies on profile and placement construction being pure: a
//! rebuilt solid must be bit-identical to the evicted one.

use crate::config::GeometryConfig;
use crate::error::Result;
use crate::mesh::Mesh;
use crate::params::CanonicalParameters;
use rustc_hash::{FxHashMap, FxHasher};
use std::fmt::Write as _;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Canonical cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(String);

impl Signature {
    /// Signature of a straight extrusion
    pub fn new(params: &CanonicalParameters, length: f64, precision: u32) -> Self {
        Self::with_extra(params, length, &[], precision)
    }

    /// Signature with additional named values (taper stations, roles, ...)
    ///
    /// Values are rounded to `precision` decimals and sorted by name, so the
    /// order in which parameters were supplied never matters.
    pub fn with_extra(
        params: &CanonicalParameters,
        length: f64,
        extra: &[(&str, f64)],
        precision: u32,
    ) -> Self {
        let mut entries: Vec<(&str, f64)> = params.entries();
        entries.extend_from_slice(extra);
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let digits = precision as usize;
        let mut key = String::with_capacity(16 + entries.len() * 24);
        key.push_str(params.family().code());
        for (name, value) in &entries {
            let _ = write!(key, "|{}={:.*}", name, digits, normalize_zero(*value));
        }
        let _ = write!(key, "|L={:.*}", digits, normalize_zero(length));
        Self(key)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 64-bit digest for compact logging
    pub fn digest(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// -0.000 and 0.000 must produce the same key
#[inline]
fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub estimated_bytes: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Debug)]
struct Entry {
    solid: Arc<Mesh>,
    ref_count: usize,
    last_access: u64,
    bytes: usize,
}

#[derive(Debug, Default)]
struct Inner {
    entries: FxHashMap<Signature, Entry>,
    total_bytes: usize,
    tick: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl Inner {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Evict LRU entries (ref_count <= 1) until `incoming` bytes fit.
    /// Returns false when the budget still overflows.
    fn make_room(&mut self, incoming: usize, max_entries: usize, max_bytes: usize) -> bool {
        loop {
            let over_count = self.entries.len() >= max_entries;
            let over_bytes = self.total_bytes.saturating_add(incoming) > max_bytes;
            if !over_count && !over_bytes {
                return true;
            }

            let victim = self
                .entries
                .iter()
                .filter(|(_, e)| e.ref_count <= 1)
                .min_by(|a, b| a.1.last_access.cmp(&b.1.last_access).then_with(|| a.0.cmp(b.0)))
                .map(|(k, _)| k.clone());

            let Some(key) = victim else {
                return false;
            };
            if let Some(entry) = self.entries.remove(&key) {
                self.total_bytes = self.total_bytes.saturating_sub(entry.bytes);
                self.evictions += 1;
                tracing::debug!(
                    signature = key.digest(),
                    bytes = entry.bytes,
                    "Evicted cached solid"
                );
            }
        }
    }
}

/// Bounded, thread-safe cache of member solids
///
/// Pass it by reference (or `Arc`) into the orchestrators; there is no
/// global instance.
#[derive(Debug)]
pub struct GeometryCache {
    inner: Mutex<Inner>,
    max_entries: usize,
    max_bytes: usize,
}

impl Default for GeometryCache {
    fn default() -> Self {
        Self::from_config(&GeometryConfig::default())
    }
}

impl GeometryCache {
    pub fn new(max_entries: usize, max_bytes: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            max_entries: max_entries.max(1),
            max_bytes,
        }
    }

    pub fn from_config(config: &GeometryConfig) -> Self {
        Self::new(config.cache_max_entries, config.cache_max_bytes)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave a half-written entry
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached solid for `signature`, building it on a miss
    ///
    /// Every successful call takes a reference; pair it with [`release`]
    /// when the caller drops the solid. `build` runs without the lock held.
    ///
    /// [`release`]: GeometryCache::release
    pub fn get_or_insert_with<F>(&self, signature: &Signature, build: F) -> Result<Arc<Mesh>>
    where
        F: FnOnce() -> Result<Mesh>,
    {
        if let Some(solid) = self.acquire(signature) {
            return Ok(solid);
        }

        let solid = Arc::new(build()?);
        let bytes = solid.estimated_bytes();

        let mut inner = self.lock();
        inner.misses += 1;
        let tick = inner.next_tick();

        // Another thread may have built the same solid meanwhile
        if let Some(entry) = inner.entries.get_mut(signature) {
            entry.ref_count += 1;
            entry.last_access = tick;
            return Ok(Arc::clone(&entry.solid));
        }

        if !inner.make_room(bytes, self.max_entries, self.max_bytes) {
            tracing::warn!(
                signature = signature.digest(),
                entries = inner.entries.len(),
                bytes = inner.total_bytes + bytes,
                "Geometry cache over budget, every entry is shared; inserting anyway"
            );
        }

        inner.total_bytes += bytes;
        inner.entries.insert(
            signature.clone(),
            Entry {
                solid: Arc::clone(&solid),
                ref_count: 1,
                last_access: tick,
                bytes,
            },
        );
        tracing::debug!(signature = signature.digest(), bytes, "Cached new solid");
        Ok(solid)
    }

    fn acquire(&self, signature: &Signature) -> Option<Arc<Mesh>> {
        let mut inner = self.lock();
        let tick = inner.next_tick();
        let solid = inner.entries.get_mut(signature).map(|entry| {
            entry.ref_count += 1;
            entry.last_access = tick;
            Arc::clone(&entry.solid)
        })?;
        inner.hits += 1;
        tracing::debug!(signature = signature.digest(), "Geometry cache hit");
        Some(solid)
    }

    /// Drop one reference to a cached solid
    pub fn release(&self, signature: &Signature) {
        if let Some(entry) = self.lock().entries.get_mut(signature) {
            entry.ref_count = entry.ref_count.saturating_sub(1);
        }
    }

    /// Current reference count, `None` when not cached
    pub fn ref_count(&self, signature: &Signature) -> Option<usize> {
        self.lock().entries.get(signature).map(|e| e.ref_count)
    }

    pub fn contains(&self, signature: &Signature) -> bool {
        self.lock().entries.contains_key(signature)
    }

    /// Drop every entry; counters are kept
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.total_bytes = 0;
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            entries: inner.entries.len(),
            estimated_bytes: inner.total_bytes,
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{PipeParams, RectangleParams};
    use crate::profile::create_rectangle;
    use crate::extrusion::extrude_centered;

    fn rect(width: f64) -> CanonicalParameters {
        CanonicalParameters::Rectangle(RectangleParams { width, height: 100.0 })
    }

    fn build(width: f64) -> Result<Mesh> {
        extrude_centered(&create_rectangle(width, 100.0), 1000.0)
    }

    #[test]
    fn test_signature_rounding() {
        let a = Signature::new(&rect(100.0), 3000.0, 3);
        let b = Signature::new(&rect(100.0004), 3000.0002, 3);
        let c = Signature::new(&rect(100.01), 3000.0, 3);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str(), "RECTANGLE|height=100.000|width=100.000|L=3000.000");
    }

    #[test]
    fn test_signature_extra_order_independent() {
        let params = CanonicalParameters::Pipe(PipeParams {
            outer_diameter: 150.0,
            wall_thickness: 6.0,
        });
        let a = Signature::with_extra(&params, 9000.0, &[("footLength", 1.0), ("footDiameter", 2.0)], 3);
        let b = Signature::with_extra(&params, 9000.0, &[("footDiameter", 2.0), ("footLength", 1.0)], 3);
        assert_eq!(a, b);
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_hit_and_miss_counts() {
        let cache = GeometryCache::default();
        let sig = Signature::new(&rect(100.0), 1000.0, 3);
        let first = cache.get_or_insert_with(&sig, || build(100.0)).unwrap();
        let second = cache
            .get_or_insert_with(&sig, || panic!("must not rebuild"))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.ref_count(&sig), Some(2));

        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
        assert_eq!(stats.estimated_bytes, first.estimated_bytes());
    }

    #[test]
    fn test_lru_eviction_skips_shared_entries() {
        let cache = GeometryCache::new(2, usize::MAX);
        let a = Signature::new(&rect(1.0), 1000.0, 3);
        let b = Signature::new(&rect(2.0), 1000.0, 3);
        let c = Signature::new(&rect(3.0), 1000.0, 3);

        cache.get_or_insert_with(&a, || build(1.0)).unwrap();
        cache.get_or_insert_with(&a, || build(1.0)).unwrap(); // a is shared
        cache.get_or_insert_with(&b, || build(2.0)).unwrap();
        cache.get_or_insert_with(&c, || build(3.0)).unwrap();

        assert!(cache.contains(&a));
        assert!(!cache.contains(&b));
        assert!(cache.contains(&c));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_over_budget_insert_when_everything_is_shared() {
        let cache = GeometryCache::new(1, usize::MAX);
        let a = Signature::new(&rect(1.0), 1000.0, 3);
        let b = Signature::new(&rect(2.0), 1000.0, 3);
        cache.get_or_insert_with(&a, || build(1.0)).unwrap();
        cache.get_or_insert_with(&a, || build(1.0)).unwrap();
        cache.get_or_insert_with(&b, || build(2.0)).unwrap();
        assert_eq!(cache.stats().entries, 2);

        // Releasing makes `a` evictable again
        cache.release(&a);
        let c = Signature::new(&rect(3.0), 1000.0, 3);
        cache.get_or_insert_with(&c, || build(3.0)).unwrap();
        assert!(!cache.contains(&a));
    }

    #[test]
    fn test_byte_ceiling() {
        let one = build(1.0).unwrap().estimated_bytes();
        let cache = GeometryCache::new(100, one * 2);
        for w in 1..=3 {
            let sig = Signature::new(&rect(w as f64), 1000.0, 3);
            cache.get_or_insert_with(&sig, || build(w as f64)).unwrap();
        }
        let stats = cache.stats();
        assert_eq!(stats.entries, 2);
        assert!(stats.estimated_bytes <= one * 2);
    }

    #[test]
    fn test_build_error_is_not_cached() {
        let cache = GeometryCache::default();
        let sig = Signature::new(&rect(1.0), 1000.0, 3);
        let err = cache.get_or_insert_with(&sig, || extrude_centered(&create_rectangle(1.0, 1.0), 0.0));
        assert!(err.is_err());
        assert!(!cache.contains(&sig));
    }

    #[test]
    fn test_clear() {
        let cache = GeometryCache::default();
        let sig = Signature::new(&rect(1.0), 1000.0, 3);
        cache.get_or_insert_with(&sig, || build(1.0)).unwrap();
        cache.clear();
        assert_eq!(cache.stats().entries, 0);
        assert_eq!(cache.stats().estimated_bytes, 0);
    }
}
