// registry/mod.rs — The four-namespace region registry.
//
// One instance owns four key-to-region maps (general, buffer, stack, heap),
// each behind its own RwLock so operations in different namespaces never
// contend. Per-namespace locking gives the required per-key mutual exclusion;
// every critical section is a short in-memory action, no I/O inside a lock.
//
// There is no eviction: registries grow until a caller releases a key. That
// mirrors the system this replaces and is a documented limitation, not a
// feature to silently fix.

pub mod buffer;
pub mod error;
pub mod slots;
pub mod stack;

pub use buffer::BufferRegion;
pub use error::{Namespace, RegionError, RegionResult};
pub use slots::{BoundsVerdict, SlotRegion};
pub use stack::StackRegion;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

/// The two resizable slot namespaces. They share one contract but are kept as
/// deliberately separate keyspaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotNamespace {
    General,
    Heap,
}

impl From<SlotNamespace> for Namespace {
    fn from(ns: SlotNamespace) -> Self {
        match ns {
            SlotNamespace::General => Namespace::General,
            SlotNamespace::Heap => Namespace::Heap,
        }
    }
}

/// Confirmation returned by a successful resize.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResizeOutcome {
    pub old_size: usize,
    pub new_size: usize,
}

/// Result of a bounds probe: the verdict plus the capacity it was judged
/// against. Callers must re-check after any resize — a verdict is only valid
/// for the capacity it reports.
#[derive(Debug, Clone, Copy)]
pub struct BoundsReport {
    pub verdict: BoundsVerdict,
    pub size: usize,
}

/// Per-namespace key → logical size maps (slot count for general/heap/buffer,
/// current depth for stack). A consistent point-in-time snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct UsageSummary {
    pub general: HashMap<String, usize>,
    pub buffer: HashMap<String, usize>,
    pub stack: HashMap<String, usize>,
    pub heap: HashMap<String, usize>,
}

impl UsageSummary {
    pub fn live_regions(&self) -> usize {
        self.general.len() + self.buffer.len() + self.stack.len() + self.heap.len()
    }
}

/// Key-addressed memory-region registry.
///
/// All operations are synchronous in-memory actions that run to completion;
/// cost is O(1) or O(size) bounded by the region's declared capacity.
pub struct RegionRegistry {
    general: RwLock<HashMap<String, SlotRegion>>,
    buffer: RwLock<HashMap<String, BufferRegion>>,
    stack: RwLock<HashMap<String, StackRegion>>,
    heap: RwLock<HashMap<String, SlotRegion>>,
    reclaim_runs: AtomicU64,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self {
            general: RwLock::new(HashMap::new()),
            buffer: RwLock::new(HashMap::new()),
            stack: RwLock::new(HashMap::new()),
            heap: RwLock::new(HashMap::new()),
            reclaim_runs: AtomicU64::new(0),
        }
    }

    fn slot_map(&self, ns: SlotNamespace) -> &RwLock<HashMap<String, SlotRegion>> {
        match ns {
            SlotNamespace::General => &self.general,
            SlotNamespace::Heap => &self.heap,
        }
    }

    // ─── General / Heap ──────────────────────────────────────────────────────

    /// Creates a slot region with all slots absent. Creation is rejected, not
    /// overwritten, when the key already exists in this namespace.
    pub async fn allocate(&self, ns: SlotNamespace, key: &str, size: usize) -> RegionResult<()> {
        let mut map = self.slot_map(ns).write().await;
        if map.contains_key(key) {
            return Err(RegionError::AlreadyExists {
                namespace: ns.into(),
                key: key.to_string(),
            });
        }
        map.insert(key.to_string(), SlotRegion::new(size));
        info!(namespace = %Namespace::from(ns), key, size, "region allocated");
        Ok(())
    }

    pub async fn release(&self, ns: SlotNamespace, key: &str) -> RegionResult<()> {
        let mut map = self.slot_map(ns).write().await;
        match map.remove(key) {
            Some(_) => {
                info!(namespace = %Namespace::from(ns), key, "region released");
                Ok(())
            }
            None => Err(RegionError::NotFound {
                namespace: ns.into(),
                key: key.to_string(),
            }),
        }
    }

    /// Probes whether `index` is inside the region's current capacity. The
    /// out-of-range case is a verdict in the report, never an error.
    pub async fn check_bounds(
        &self,
        ns: SlotNamespace,
        key: &str,
        index: i64,
    ) -> RegionResult<BoundsReport> {
        let map = self.slot_map(ns).read().await;
        let region = map.get(key).ok_or_else(|| RegionError::NotFound {
            namespace: ns.into(),
            key: key.to_string(),
        })?;
        Ok(BoundsReport {
            verdict: region.check_bounds(index),
            size: region.capacity(),
        })
    }

    /// Grows or shrinks the region to exactly `new_size`, preserving slots
    /// below `min(old, new)`. Capacity and contents change under one write
    /// lock — no reader can observe them disagreeing.
    pub async fn resize(
        &self,
        ns: SlotNamespace,
        key: &str,
        new_size: usize,
    ) -> RegionResult<ResizeOutcome> {
        let mut map = self.slot_map(ns).write().await;
        let region = map.get_mut(key).ok_or_else(|| RegionError::NotFound {
            namespace: ns.into(),
            key: key.to_string(),
        })?;
        let old_size = region.resize(new_size);
        info!(namespace = %Namespace::from(ns), key, old_size, new_size, "region resized");
        Ok(ResizeOutcome { old_size, new_size })
    }

    /// Stores `value` at `index`. Unlike `check_bounds`, an out-of-range
    /// index here is a fault: a write has no verdict to report.
    pub async fn write_slot(
        &self,
        ns: SlotNamespace,
        key: &str,
        index: i64,
        value: Value,
    ) -> RegionResult<()> {
        let mut map = self.slot_map(ns).write().await;
        let region = map.get_mut(key).ok_or_else(|| RegionError::NotFound {
            namespace: ns.into(),
            key: key.to_string(),
        })?;
        if !region.check_bounds(index).is_in_bounds() {
            return Err(RegionError::OutOfBounds {
                key: key.to_string(),
                index,
                size: region.capacity(),
            });
        }
        region.set(index as usize, value);
        Ok(())
    }

    /// Full contents snapshot (absent slots are `null`).
    pub async fn slot_content(
        &self,
        ns: SlotNamespace,
        key: &str,
    ) -> RegionResult<Vec<Option<Value>>> {
        let map = self.slot_map(ns).read().await;
        let region = map.get(key).ok_or_else(|| RegionError::NotFound {
            namespace: ns.into(),
            key: key.to_string(),
        })?;
        Ok(region.snapshot())
    }

    // ─── Buffer ──────────────────────────────────────────────────────────────

    pub async fn create_buffer(&self, key: &str, size: usize) -> RegionResult<()> {
        let mut map = self.buffer.write().await;
        if map.contains_key(key) {
            return Err(RegionError::AlreadyExists {
                namespace: Namespace::Buffer,
                key: key.to_string(),
            });
        }
        map.insert(key.to_string(), BufferRegion::new(size));
        info!(namespace = %Namespace::Buffer, key, size, "buffer created");
        Ok(())
    }

    pub async fn release_buffer(&self, key: &str) -> RegionResult<()> {
        let mut map = self.buffer.write().await;
        match map.remove(key) {
            Some(_) => {
                info!(namespace = %Namespace::Buffer, key, "buffer released");
                Ok(())
            }
            None => Err(RegionError::NotFound {
                namespace: Namespace::Buffer,
                key: key.to_string(),
            }),
        }
    }

    /// Byte snapshot — callers never observe later mutations through it.
    pub async fn buffer_content(&self, key: &str) -> RegionResult<Vec<u8>> {
        let map = self.buffer.read().await;
        let buffer = map.get(key).ok_or_else(|| RegionError::NotFound {
            namespace: Namespace::Buffer,
            key: key.to_string(),
        })?;
        Ok(buffer.snapshot())
    }

    // ─── Stack ───────────────────────────────────────────────────────────────

    pub async fn create_stack(&self, key: &str, capacity: usize) -> RegionResult<()> {
        let mut map = self.stack.write().await;
        if map.contains_key(key) {
            return Err(RegionError::AlreadyExists {
                namespace: Namespace::Stack,
                key: key.to_string(),
            });
        }
        map.insert(key.to_string(), StackRegion::new(capacity));
        info!(namespace = %Namespace::Stack, key, capacity, "stack created");
        Ok(())
    }

    /// Returns the depth after the push.
    pub async fn push(&self, key: &str, value: Value) -> RegionResult<usize> {
        let mut map = self.stack.write().await;
        let stack = map.get_mut(key).ok_or_else(|| RegionError::NotFound {
            namespace: Namespace::Stack,
            key: key.to_string(),
        })?;
        if !stack.push(value) {
            return Err(RegionError::Overflow {
                key: key.to_string(),
                capacity: stack.capacity(),
            });
        }
        Ok(stack.depth())
    }

    /// Removes and returns the most recently pushed value.
    pub async fn pop(&self, key: &str) -> RegionResult<Value> {
        let mut map = self.stack.write().await;
        let stack = map.get_mut(key).ok_or_else(|| RegionError::NotFound {
            namespace: Namespace::Stack,
            key: key.to_string(),
        })?;
        stack.pop().ok_or_else(|| RegionError::Underflow {
            key: key.to_string(),
        })
    }

    pub async fn release_stack(&self, key: &str) -> RegionResult<()> {
        let mut map = self.stack.write().await;
        match map.remove(key) {
            Some(_) => {
                info!(namespace = %Namespace::Stack, key, "stack released");
                Ok(())
            }
            None => Err(RegionError::NotFound {
                namespace: Namespace::Stack,
                key: key.to_string(),
            }),
        }
    }

    // ─── Summary / reclaim ───────────────────────────────────────────────────

    /// Live keys and their current logical sizes, per namespace.
    ///
    /// All four read guards are held before any map is read, so the summary
    /// is a consistent snapshot rather than an interleaving of partial
    /// updates.
    pub async fn summarize(&self) -> UsageSummary {
        let general = self.general.read().await;
        let buffer = self.buffer.read().await;
        let stack = self.stack.read().await;
        let heap = self.heap.read().await;

        UsageSummary {
            general: general
                .iter()
                .map(|(k, r)| (k.clone(), r.capacity()))
                .collect(),
            buffer: buffer.iter().map(|(k, b)| (k.clone(), b.len())).collect(),
            stack: stack.iter().map(|(k, s)| (k.clone(), s.depth())).collect(),
            heap: heap.iter().map(|(k, r)| (k.clone(), r.capacity())).collect(),
        }
    }

    /// Idempotent hook for external triggers (file watcher, REST endpoint).
    ///
    /// Regions are only ever freed by an explicit release; this records and
    /// logs the run so operators can see the trigger fired. Returns the total
    /// run count.
    pub fn reclaim(&self) -> u64 {
        let runs = self.reclaim_runs.fetch_add(1, Ordering::Relaxed) + 1;
        info!(runs, "reclaim triggered");
        runs
    }

    pub fn reclaim_runs(&self) -> u64 {
        self.reclaim_runs.load(Ordering::Relaxed)
    }
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
