// Producer side: wait for room, fill the shared buffer, record the slot.

use super::gate::Readiness;
use super::queue::TransferQueue;
use super::Structs::{TileDescriptor, TileToken};
use crate::Core::error::{TransferError, TransferResult};
use crate::Core::SharedSurface::{WritableFrame, BYTES_PER_PIXEL};

/// Why an enqueue was abandoned. The content is dropped in every case and
/// upstream re-rasterizes on a later frame if it still needs the tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The GPU context is gone or the queue was discarded.
    ContextUnavailable,
    /// `interrupt(true)` released the producer.
    Interrupted,
    /// Woken up, but the ring still had no empty slot.
    QueueFull,
    /// The shared buffer had nothing writable to hand out.
    BufferUnavailable,
    /// The writer reported an error; nothing was published.
    WriteFailed,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Accepted { index: usize },
    Rejected(RejectReason),
}

impl EnqueueOutcome {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, EnqueueOutcome::Accepted { .. })
    }

    #[inline]
    pub fn is_rejected(&self) -> bool {
        !self.is_accepted()
    }
}

/// Tightly packed RGBA8888 pixels produced by the rasterizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TileBitmap {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> TransferResult<Self> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(TransferError::GeometryMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A bitmap of a single color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * BYTES_PER_PIXEL)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl TransferQueue {
    /// Enqueue one tile update.
    ///
    /// Blocks at most once when the ring is full. `writer` runs only after the
    /// gate reports ready, while the shared buffer frame is locked; if it
    /// fails, the frame is cancelled and no slot is taken.
    pub fn try_enqueue<W>(
        &self,
        destination: TileToken,
        descriptor: TileDescriptor,
        writer: W,
    ) -> EnqueueOutcome
    where
        W: FnOnce(&mut WritableFrame) -> TransferResult<()>,
    {
        let mut state = self.gate.lock();

        if let Readiness::NotReady(reason) = self.gate.wait_for_capacity(&mut state) {
            log::debug!(
                "quit tile update: not ready ({:?}) for tile x y {} {}",
                reason,
                descriptor.x,
                descriptor.y
            );
            return EnqueueOutcome::Rejected(reason);
        }

        let mut frame = match self.buffer.acquire_writable() {
            Ok(frame) => frame,
            Err(e) => {
                log::debug!(
                    "quit tile update for x y {} {}: {}",
                    descriptor.x,
                    descriptor.y,
                    e
                );
                return EnqueueOutcome::Rejected(RejectReason::BufferUnavailable);
            }
        };

        if let Err(e) = writer(&mut frame) {
            log::error!(
                "writing tile x y {} {} failed: {}",
                descriptor.x,
                descriptor.y,
                e
            );
            self.buffer.cancel(frame);
            return EnqueueOutcome::Rejected(RejectReason::WriteFailed);
        }

        let sequence = self.buffer.release_and_publish(frame);

        let index = state.ring.acquire_next_write_index();
        state
            .ring
            .commit(index, destination, descriptor, Some(sequence));

        log::trace!(
            "tile x y {} {} queued @ index {} (frame {})",
            descriptor.x,
            descriptor.y,
            index,
            sequence
        );
        EnqueueOutcome::Accepted { index }
    }

    /// Enqueue a full-tile bitmap. Partial uploads are rejected.
    pub fn enqueue_bitmap(
        &self,
        destination: TileToken,
        descriptor: TileDescriptor,
        bitmap: &TileBitmap,
    ) -> EnqueueOutcome {
        self.try_enqueue(destination, descriptor, |frame| write_bitmap(frame, bitmap))
    }
}

// Row by row, since the frame stride may exceed the tile width.
fn write_bitmap(frame: &mut WritableFrame, bitmap: &TileBitmap) -> TransferResult<()> {
    let geometry = frame.geometry();
    if bitmap.width != geometry.width || bitmap.height != geometry.height {
        return Err(TransferError::PartialTile {
            width: bitmap.width,
            height: bitmap.height,
            tile_width: geometry.width,
            tile_height: geometry.height,
        });
    }

    let row_bytes = geometry.row_bytes();
    for row in 0..bitmap.height as usize {
        let src = &bitmap.pixels[row * row_bytes..(row + 1) * row_bytes];
        frame.row_mut(row).copy_from_slice(src);
    }
    Ok(())
}
