// registry/slots.rs — Resizable optional-value slot arrays (general + heap).

use serde_json::Value;

/// Outcome of a bounds probe. Out-of-range is a reported verdict, not a
/// fault — callers that need a fault use the write path instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsVerdict {
    InBounds,
    OutOfBounds,
}

impl BoundsVerdict {
    pub fn is_in_bounds(self) -> bool {
        matches!(self, BoundsVerdict::InBounds)
    }
}

/// An ordered sequence of optional slots, all absent at creation.
///
/// Capacity is the slot vector's length — there is no separate size field, so
/// capacity and contents can never disagree, resize included. Bounds checks
/// take a signed index so negative indices are representable and always out
/// of bounds.
#[derive(Debug, Clone, Default)]
pub struct SlotRegion {
    slots: Vec<Option<Value>>,
}

impl SlotRegion {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn check_bounds(&self, index: i64) -> BoundsVerdict {
        if index >= 0 && (index as usize) < self.slots.len() {
            BoundsVerdict::InBounds
        } else {
            BoundsVerdict::OutOfBounds
        }
    }

    /// Grow with absent slots or truncate. Slots below `min(old, new)` keep
    /// their values. Returns the old capacity.
    pub fn resize(&mut self, new_size: usize) -> usize {
        let old = self.slots.len();
        self.slots.resize(new_size, None);
        old
    }

    /// Caller must have verified `index < capacity()`.
    pub fn set(&mut self, index: usize, value: Value) {
        self.slots[index] = Some(value);
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    /// Point-in-time copy of the contents, not a live view.
    pub fn snapshot(&self) -> Vec<Option<Value>> {
        self.slots.clone()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
