// registry/buffer.rs — Fixed-size byte regions.

/// A fixed-length byte region, zero-filled at creation. No resize operation
/// exists by design — buffers are immutable in size once created.
#[derive(Debug, Clone)]
pub struct BufferRegion {
    data: Vec<u8>,
}

impl BufferRegion {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0u8; size],
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Point-in-time copy of the bytes, not a live view.
    pub fn snapshot(&self) -> Vec<u8> {
        self.data.clone()
    }
}
