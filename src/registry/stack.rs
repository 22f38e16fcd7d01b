// registry/stack.rs — Bounded LIFO regions.

use serde_json::Value;

/// A bounded last-in-first-out stack of values.
///
/// Depth never exceeds the declared capacity: `push` refuses once full and
/// `pop` refuses when empty. The registry layer turns those refusals into
/// Overflow/Underflow errors carrying the key.
#[derive(Debug, Clone)]
pub struct StackRegion {
    capacity: usize,
    items: Vec<Value>,
}

impl StackRegion {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn depth(&self) -> usize {
        self.items.len()
    }

    /// Appends `value`. Returns false (leaving the stack unchanged) when the
    /// stack is already at capacity.
    pub fn push(&mut self, value: Value) -> bool {
        if self.items.len() >= self.capacity {
            return false;
        }
        self.items.push(value);
        true
    }

    /// Removes and returns the most recently pushed value, or None when empty.
    pub fn pop(&mut self) -> Option<Value> {
        self.items.pop()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn push_to_capacity_then_overflow() {
        let mut stack = StackRegion::new(3);
        assert!(stack.push(json!(1)));
        assert!(stack.push(json!(2)));
        assert!(stack.push(json!(3)));
        assert_eq!(stack.depth(), 3);

        // The refused push leaves contents unchanged.
        assert!(!stack.push(json!(4)));
        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.pop(), Some(json!(3)));
    }

    #[test]
    fn pop_empty_is_none_and_depth_stays_zero() {
        let mut stack = StackRegion::new(2);
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.depth(), 0);

        stack.push(json!("only"));
        assert_eq!(stack.pop(), Some(json!("only")));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn zero_capacity_stack_rejects_every_push() {
        let mut stack = StackRegion::new(0);
        assert!(!stack.push(json!(1)));
        assert_eq!(stack.depth(), 0);
    }

    proptest! {
        // LIFO law: pushing v1..vn then popping n times yields exact reverse order.
        #[test]
        fn pops_reverse_pushes(values in proptest::collection::vec(any::<i64>(), 0..32)) {
            let mut stack = StackRegion::new(values.len());
            for v in &values {
                prop_assert!(stack.push(json!(v)));
            }

            let mut popped = Vec::new();
            while let Some(v) = stack.pop() {
                popped.push(v);
            }

            let expected: Vec<Value> = values.iter().rev().map(|v| json!(v)).collect();
            prop_assert_eq!(popped, expected);
        }
    }
}
