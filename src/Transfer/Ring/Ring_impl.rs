use super::Ring::{Slot, SlotRing, SlotStatus};
use crate::Transfer::Structs::Transfer_Structs::{TileDescriptor, TileToken};

impl SlotRing {
    /// Create a ring of `capacity` empty slots.
    ///
    /// # Panics
    /// Panics if `capacity` is zero. The builder rejects that before we get here.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "slot ring capacity must be non-zero");
        Self {
            slots: vec![Slot::default(); capacity].into_boxed_slice(),
            write_index: 0,
            empty_count: capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    #[inline]
    pub fn empty_count(&self) -> usize {
        self.empty_count
    }

    /// # Panics
    /// Panics if `index >= capacity()`.
    #[inline]
    pub fn status(&self, index: usize) -> SlotStatus {
        self.slots[index].status
    }

    /// # Panics
    /// Panics if `index >= capacity()`.
    #[inline]
    pub fn slot(&self, index: usize) -> &Slot {
        &self.slots[index]
    }

    pub fn statuses(&self) -> Vec<SlotStatus> {
        self.slots.iter().map(|s| s.status).collect()
    }

    /// Number of slots that are not `Empty`.
    pub fn occupied(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.status != SlotStatus::Empty)
            .count()
    }

    /// Index the next commit will land on. Pure arithmetic, no side effects.
    #[inline]
    pub fn acquire_next_write_index(&self) -> usize {
        (self.write_index + 1) % self.capacity()
    }

    /// Record a freshly published frame in slot `index` and advance the write index.
    ///
    /// The caller holds the gate lock and has already seen capacity. Committing
    /// into a slot that is not `Empty` is a producer serialization bug: it is
    /// logged and the slot is overwritten. Returns `false` in that case.
    ///
    /// # Panics
    /// Panics if `index >= capacity()`.
    pub fn commit(
        &mut self,
        index: usize,
        destination: TileToken,
        descriptor: TileDescriptor,
        frame_sequence: Option<u64>,
    ) -> bool {
        let expected = self.acquire_next_write_index();
        if index != expected {
            log::error!(
                "commit out of order: index {} but next write index is {}",
                index,
                expected
            );
        }

        let slot = &mut self.slots[index];
        let was_empty = slot.status == SlotStatus::Empty && slot.destination.is_none();
        if !was_empty {
            log::error!(
                "commit into a busy slot @ index {} (status {:?}), overwriting",
                index,
                slot.status
            );
        }

        slot.destination = Some(destination);
        slot.descriptor = descriptor;
        slot.frame_sequence = frame_sequence;
        slot.status = SlotStatus::PendingTransfer;

        self.write_index = index;
        // An overwrite does not free anything, so only a real empty slot is consumed.
        if was_empty {
            self.empty_count = self.empty_count.saturating_sub(1);
        }
        was_empty
    }

    /// Return slot `index` to `Empty` and forget its destination.
    ///
    /// # Panics
    /// Panics if `index >= capacity()`.
    pub fn release(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        slot.status = SlotStatus::Empty;
        slot.destination = None;
        slot.frame_sequence = None;
    }

    /// Flag every slot for discard, empty ones included.
    ///
    /// No slot is free for a producer until a drain cleans them up.
    pub fn mark_all_discard(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.status = SlotStatus::PendingDiscard;
        }
        self.empty_count = 0;
    }

    /// Slot indices from oldest to newest, wrapping exactly once.
    pub fn oldest_first(&self) -> impl Iterator<Item = usize> {
        let capacity = self.capacity();
        let start = self.acquire_next_write_index();
        (0..capacity).map(move |k| (start + k) % capacity)
    }

    /// Called once per completed drain cycle, when every slot is `Empty` again.
    pub fn reset_empty_count(&mut self) {
        debug_assert_eq!(self.occupied(), 0, "reset with slots still in flight");
        self.empty_count = self.capacity();
    }

    /// Re-derive `empty_count` from the slot statuses after a partial drain.
    pub fn recount_empty(&mut self) {
        self.empty_count = self.capacity() - self.occupied();
    }
}
