// Shared transfer buffer abstraction
// One buffer object is multiplexed across ring slots over time: the producer
// publishes frames into it and the drain retrieves them back in the same order.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::Core::error::{TransferError, TransferResult};

/// Only RGBA8888 frames are produced.
pub const BYTES_PER_PIXEL: usize = 4;

/// Pixel geometry of every frame in a shared buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileGeometry {
    pub width: u32,
    pub height: u32,
    /// Row stride in pixels, always `>= width`.
    pub stride: u32,
}

impl TileGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            stride: width,
        }
    }

    pub fn with_stride(mut self, stride: u32) -> Self {
        self.stride = stride.max(self.width);
        self
    }

    #[inline]
    pub fn stride_bytes(&self) -> usize {
        self.stride as usize * BYTES_PER_PIXEL
    }

    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    #[inline]
    pub fn byte_len(&self) -> usize {
        self.stride_bytes() * self.height as usize
    }
}

/// A frame handed to the producer between `acquire_writable` and
/// `release_and_publish` (or `cancel`).
pub struct WritableFrame {
    pub(crate) pixels: Vec<u8>,
    pub(crate) geometry: TileGeometry,
}

impl WritableFrame {
    /// A zeroed frame of `geometry.byte_len()` bytes, for buffers that keep
    /// their own backing storage.
    pub fn new(geometry: TileGeometry) -> Self {
        Self {
            pixels: vec![0u8; geometry.byte_len()],
            geometry,
        }
    }

    /// Give back the pixel storage, e.g. to hand it to a platform surface.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    #[inline]
    pub fn geometry(&self) -> TileGeometry {
        self.geometry
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Mutable view of row `row`, stride padding excluded.
    pub fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let start = row * self.geometry.stride_bytes();
        let len = self.geometry.row_bytes();
        &mut self.pixels[start..start + len]
    }
}

/// A published frame as seen by the consumer.
pub struct TransferFrame {
    pub(crate) sequence: u64,
    pub(crate) pixels: Vec<u8>,
    pub(crate) geometry: TileGeometry,
}

impl TransferFrame {
    /// Wrap published pixels for the consumer.
    ///
    /// `pixels` must be exactly `geometry.byte_len()` bytes, stride padding
    /// included; anything else is a `GeometryMismatch`.
    pub fn new(sequence: u64, pixels: Vec<u8>, geometry: TileGeometry) -> TransferResult<Self> {
        if pixels.len() != geometry.byte_len() {
            return Err(TransferError::GeometryMismatch {
                expected: geometry.byte_len(),
                actual: pixels.len(),
            });
        }
        Ok(Self {
            sequence,
            pixels,
            geometry,
        })
    }

    /// Give back the pixel storage once the frame has been consumed.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Publish order of this frame, starting at 0.
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn geometry(&self) -> TileGeometry {
        self.geometry
    }
}

/// Platform shared buffer contract.
///
/// Implementations must keep their own FIFO: `retrieve_next` yields frames in
/// exactly the order `release_and_publish` accepted them. The ring relies on
/// that ordering and does not derive it from its own lock.
pub trait SharedBuffer: Send + Sync + Debug {
    fn geometry(&self) -> TileGeometry;

    /// Lock a buffer for writing. Fails when none is free.
    fn acquire_writable(&self) -> TransferResult<WritableFrame>;

    /// Unlock and queue the frame for the consumer. Returns its sequence number.
    fn release_and_publish(&self, frame: WritableFrame) -> u64;

    /// Unlock without publishing.
    fn cancel(&self, frame: WritableFrame);

    /// Advance to the next published frame. Must be called once per ring slot
    /// visited, even when the content is about to be thrown away.
    fn retrieve_next(&self) -> Option<TransferFrame>;

    /// Hand a retrieved frame's storage back to the buffer.
    fn recycle(&self, frame: TransferFrame);
}

/// Create the default in-process shared buffer.
///
/// # Arguments
/// * `geometry` - Pixel geometry of every frame
/// * `buffer_count` - Number of backing buffers (ring capacity + 1)
pub fn create_staging_buffer(geometry: TileGeometry, buffer_count: usize) -> Arc<dyn SharedBuffer> {
    Arc::new(StagingBuffer::new(geometry, buffer_count))
}

struct StagingState {
    free: Vec<Vec<u8>>,
    published: VecDeque<TransferFrame>,
    next_sequence: u64,
}

/// In-process shared buffer with a fixed pool of backing buffers.
///
/// Its mutex is independent of the gate: it only serializes the buffer's own
/// free list and publish queue.
pub struct StagingBuffer {
    geometry: TileGeometry,
    buffer_count: usize,
    state: Mutex<StagingState>,
}

impl StagingBuffer {
    pub fn new(geometry: TileGeometry, buffer_count: usize) -> Self {
        let free = (0..buffer_count)
            .map(|_| vec![0u8; geometry.byte_len()])
            .collect();
        Self {
            geometry,
            buffer_count,
            state: Mutex::new(StagingState {
                free,
                published: VecDeque::with_capacity(buffer_count),
                next_sequence: 0,
            }),
        }
    }

    pub fn buffer_count(&self) -> usize {
        self.buffer_count
    }

    /// Frames published but not yet retrieved.
    pub fn published_len(&self) -> usize {
        self.state.lock().published.len()
    }

    /// Buffers available to `acquire_writable`.
    pub fn free_len(&self) -> usize {
        self.state.lock().free.len()
    }

    /// `(free, published)` if the buffer is not busy right now.
    pub(crate) fn try_counts(&self) -> Option<(usize, usize)> {
        self.state
            .try_lock()
            .map(|state| (state.free.len(), state.published.len()))
    }

    fn give_back(&self, pixels: Vec<u8>) {
        if pixels.len() != self.geometry.byte_len() {
            log::warn!(
                "dropping foreign buffer of {} bytes (expected {})",
                pixels.len(),
                self.geometry.byte_len()
            );
            return;
        }
        let mut state = self.state.lock();
        if state.free.len() < self.buffer_count {
            state.free.push(pixels);
        }
    }
}

impl Debug for StagingBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::Debug::StructDebug::debug_staging_buffer(self, f)
    }
}

impl SharedBuffer for StagingBuffer {
    fn geometry(&self) -> TileGeometry {
        self.geometry
    }

    fn acquire_writable(&self) -> TransferResult<WritableFrame> {
        let pixels = self
            .state
            .lock()
            .free
            .pop()
            .ok_or(TransferError::BufferExhausted)?;
        Ok(WritableFrame {
            pixels,
            geometry: self.geometry,
        })
    }

    fn release_and_publish(&self, frame: WritableFrame) -> u64 {
        let mut state = self.state.lock();
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.published.push_back(TransferFrame {
            sequence,
            pixels: frame.pixels,
            geometry: frame.geometry,
        });
        sequence
    }

    fn cancel(&self, frame: WritableFrame) {
        self.give_back(frame.pixels);
    }

    fn retrieve_next(&self) -> Option<TransferFrame> {
        self.state.lock().published.pop_front()
    }

    fn recycle(&self, frame: TransferFrame) {
        self.give_back(frame.pixels);
    }
}
