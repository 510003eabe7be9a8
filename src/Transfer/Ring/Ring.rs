// This is the fixed ring of transfer slots shared by the producer and the drain

use crate::Transfer::Structs::Transfer_Structs::{TileDescriptor, TileToken};

/// Number of slots in the ring.
/// The shared buffer behind it holds one more frame than this.
pub const RING_CAPACITY: usize = 4;

/// Lifecycle of a single slot.
///
/// - `Empty -> PendingTransfer` only on commit.
/// - `PendingTransfer -> Empty` only when a drain copies or skips it.
/// - `PendingTransfer -> PendingDiscard` only on discard; never back.
/// - `PendingDiscard -> Empty` only in the drain's cleanup sub-pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SlotStatus {
    #[default]
    Empty,
    PendingTransfer,
    PendingDiscard,
}

/// A single ring entry.
#[derive(Clone, Debug, Default)]
pub struct Slot {
    pub status: SlotStatus,

    /// Back-reference to the destination tile the producer rendered for.
    /// Only ever compared and handed to the registry, never owned.
    pub destination: Option<TileToken>,

    /// Snapshot of the destination identity taken at enqueue time.
    pub descriptor: TileDescriptor,

    /// Sequence number of the shared-buffer frame published for this slot.
    pub frame_sequence: Option<u64>,
}

/// Fixed-capacity ring of transfer slots.
///
/// This struct carries no synchronization of its own; every access goes
/// through the gate's lock.
///
/// ### Bookkeeping:
/// - `write_index` is the slot of the most recent commit. The oldest slot is
///   always `(write_index + 1) % capacity`.
/// - `empty_count` counts slots a producer may still commit into. It drops by
///   one on every commit into an empty slot and is reset to `capacity` once per
///   completed drain cycle.
pub struct SlotRing {
    pub(crate) slots: Box<[Slot]>,
    pub(crate) write_index: usize,
    pub(crate) empty_count: usize,
}
