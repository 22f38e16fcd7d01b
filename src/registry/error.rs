// registry/error.rs — Domain error taxonomy for region operations.

use serde::Serialize;
use thiserror::Error;

/// The four independent keyspaces of the registry. The same key string may
/// exist simultaneously in all four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    General,
    Buffer,
    Stack,
    Heap,
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Namespace::General => write!(f, "general"),
            Namespace::Buffer => write!(f, "buffer"),
            Namespace::Stack => write!(f, "stack"),
            Namespace::Heap => write!(f, "heap"),
        }
    }
}

pub type RegionResult<T> = Result<T, RegionError>;

/// Every way a registry operation can fail.
///
/// Out-of-range on `check_bounds` is deliberately NOT here — a bounds probe
/// reports a verdict, not a fault. `OutOfBounds` only fires on the slot write
/// path, where a failed write cannot be a verdict.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("{namespace} region already exists for key {key}")]
    AlreadyExists { namespace: Namespace, key: String },

    #[error("no {namespace} region exists for key {key}")]
    NotFound { namespace: Namespace, key: String },

    #[error("stack overflow for key {key} (capacity {capacity})")]
    Overflow { key: String, capacity: usize },

    #[error("stack underflow for key {key}")]
    Underflow { key: String },

    #[error("index {index} is out of bounds for key {key} with size {size}")]
    OutOfBounds { key: String, index: i64, size: usize },

    /// Anything not otherwise classified. Logged with full context at the
    /// request boundary and reported generically to the caller.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl RegionError {
    /// Stable machine-readable tag used in error response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            RegionError::AlreadyExists { .. } => "already_exists",
            RegionError::NotFound { .. } => "not_found",
            RegionError::Overflow { .. } => "overflow",
            RegionError::Underflow { .. } => "underflow",
            RegionError::OutOfBounds { .. } => "out_of_bounds",
            RegionError::Unexpected(_) => "unexpected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_display_is_lowercase() {
        assert_eq!(Namespace::General.to_string(), "general");
        assert_eq!(Namespace::Heap.to_string(), "heap");
    }

    #[test]
    fn error_messages_name_the_key() {
        let err = RegionError::NotFound {
            namespace: Namespace::Stack,
            key: "frames".to_string(),
        };
        assert_eq!(err.kind(), "not_found");
        assert_eq!(err.to_string(), "no stack region exists for key frames");

        let err = RegionError::Overflow {
            key: "frames".to_string(),
            capacity: 4,
        };
        assert_eq!(err.to_string(), "stack overflow for key frames (capacity 4)");
    }
}
