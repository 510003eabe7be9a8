use std::sync::Arc;

use super::gate::Gate;
use super::Ring::SlotStatus;
use crate::Core::SharedSurface::SharedBuffer;

/// Hands rasterized tiles from one producer thread to the rendering thread.
///
/// The producer calls [`try_enqueue`](Self::try_enqueue) /
/// [`enqueue_bitmap`](Self::enqueue_bitmap); the rendering thread calls
/// [`drain`](Self::drain) once per frame. The owning compositor drives
/// [`interrupt`](Self::interrupt), [`discard_all`](Self::discard_all) and the
/// context-loss notifications.
///
/// ### Concurrency Design:
/// - The gate's lock covers slot statuses, `write_index`, `empty_count` and
///   both lifecycle flags.
/// - Frame bytes are not covered by it: they move through the shared buffer,
///   which keeps its own publish order.
/// - Only the producer ever blocks, and for at most one wait per enqueue.
pub struct TransferQueue {
    pub(crate) gate: Gate,
    pub(crate) buffer: Arc<dyn SharedBuffer>,
    pub(crate) capacity: usize,
}

/// Point-in-time view of the queue, read under the gate's lock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QueueStats {
    pub capacity: usize,
    pub empty_count: usize,
    pub write_index: usize,
    pub pending_transfer: usize,
    pub pending_discard: usize,
    pub interrupted: bool,
    pub context_available: bool,
    pub blocked_producers: usize,
}

impl TransferQueue {
    pub(crate) fn new(capacity: usize, buffer: Arc<dyn SharedBuffer>) -> Self {
        Self {
            gate: Gate::new(capacity),
            buffer,
            capacity,
        }
    }

    /// Number of slots in the ring.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The shared buffer frames travel through.
    pub fn shared_buffer(&self) -> &Arc<dyn SharedBuffer> {
        &self.buffer
    }

    pub fn stats(&self) -> QueueStats {
        let state = self.gate.lock();
        let statuses = state.ring.statuses();
        let count = |wanted: SlotStatus| statuses.iter().filter(|&&s| s == wanted).count();
        QueueStats {
            capacity: self.capacity,
            empty_count: state.ring.empty_count(),
            write_index: state.ring.write_index(),
            pending_transfer: count(SlotStatus::PendingTransfer),
            pending_discard: count(SlotStatus::PendingDiscard),
            interrupted: state.interrupted,
            context_available: state.context_available,
            blocked_producers: state.blocked,
        }
    }

    /// Status of every slot, by ring index.
    pub fn slot_statuses(&self) -> Vec<SlotStatus> {
        self.gate.lock().ring.statuses()
    }
}
