use super::queue::TransferQueue;
use super::Ring::SlotRing;
use std::fmt;

// Debug proxy implementations that call the standalone debug functions
impl fmt::Debug for TransferQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_transfer_queue(self, f)
    }
}

impl fmt::Debug for SlotRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_slot_ring(self, f)
    }
}
