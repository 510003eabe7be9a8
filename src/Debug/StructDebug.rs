use std::fmt;

use crate::Core::SharedSurface::{SharedBuffer, StagingBuffer};
use crate::Transfer::Ring::SlotRing;
use crate::Transfer::TransferQueue;

/// Debug function for TransferQueue
///
/// Shows:
/// - Capacity
/// - Ring and flags, if the gate is free right now
/// - The shared buffer
///
/// Uses `try_lock` so that formatting never waits behind a drain or a
/// producer holding the gate.
pub fn debug_transfer_queue(queue: &TransferQueue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut s = f.debug_struct("TransferQueue");
    s.field("capacity", &queue.capacity);
    match queue.gate.try_lock() {
        Some(state) => {
            s.field("ring", &state.ring)
                .field("interrupted", &state.interrupted)
                .field("context_available", &state.context_available)
                .field("blocked_producers", &state.blocked);
        }
        None => {
            s.field("ring", &"<locked>");
        }
    }
    s.field("buffer", &queue.buffer).finish()
}

/// Debug function for SlotRing
pub fn debug_slot_ring(ring: &SlotRing, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SlotRing")
        .field("write_index", &ring.write_index)
        .field("empty_count", &ring.empty_count)
        .field("statuses", &ring.statuses())
        .finish()
}

/// Debug function for StagingBuffer
///
/// Frame contents are never printed, only the pool counters.
pub fn debug_staging_buffer(buffer: &StagingBuffer, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut s = f.debug_struct("StagingBuffer");
    s.field("geometry", &buffer.geometry())
        .field("buffer_count", &buffer.buffer_count());
    if let Some((free, published)) = buffer.try_counts() {
        s.field("free", &free).field("published", &published);
    }
    s.finish_non_exhaustive()
}
