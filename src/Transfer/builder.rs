use std::sync::Arc;

use super::queue::TransferQueue;
use super::Ring::RING_CAPACITY;
use crate::Core::error::{TransferError, TransferResult};
use crate::Core::SharedSurface::{create_staging_buffer, SharedBuffer, TileGeometry};

pub const DEFAULT_TILE_WIDTH: u32 = 256;
pub const DEFAULT_TILE_HEIGHT: u32 = 256;

pub struct TransferQueueBuilder {
    capacity: usize,
    tile_width: u32,
    tile_height: u32,
    shared_buffer: Option<Arc<dyn SharedBuffer>>,
}

impl Default for TransferQueueBuilder {
    fn default() -> Self {
        Self {
            capacity: RING_CAPACITY,
            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
            shared_buffer: None,
        }
    }
}

impl TransferQueueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_tile_size(mut self, width: u32, height: u32) -> Self {
        self.tile_width = width;
        self.tile_height = height;
        self
    }

    /// Use an existing shared buffer instead of creating a staging buffer.
    /// The tile size setting is ignored in that case.
    pub fn with_shared_buffer(mut self, buffer: Arc<dyn SharedBuffer>) -> Self {
        self.shared_buffer = Some(buffer);
        self
    }

    pub fn build(self) -> TransferResult<TransferQueue> {
        if self.capacity == 0 {
            return Err(TransferError::InvalidConfig("capacity must be greater than zero"));
        }

        let buffer = match self.shared_buffer {
            Some(buffer) => buffer,
            None => {
                if self.tile_width == 0 || self.tile_height == 0 {
                    return Err(TransferError::InvalidConfig("tile size must be non-zero"));
                }
                // One extra buffer so the consumer can hold a frame while the ring is full.
                create_staging_buffer(
                    TileGeometry::new(self.tile_width, self.tile_height),
                    self.capacity + 1,
                )
            }
        };

        log::debug!(
            "transfer queue with {} slots, tiles {:?}",
            self.capacity,
            buffer.geometry()
        );
        Ok(TransferQueue::new(self.capacity, buffer))
    }
}
