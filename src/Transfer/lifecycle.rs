// Interrupt, discard and context-loss transitions driven by the compositor.

use super::queue::TransferQueue;

impl TransferQueue {
    /// Release a producer blocked on a full ring, and keep rejecting while set.
    ///
    /// Used while upstream tears tiles down and must not wait on the queue.
    pub fn interrupt(&self, interrupt: bool) {
        let mut state = self.gate.lock();
        state.interrupted = interrupt;
        if interrupt {
            self.gate.signal(&mut state);
        }
    }

    /// Drop all in-flight work. Call before destroying destination tiles.
    ///
    /// Every slot is flagged for discard (empty ones too) and the context is
    /// marked unavailable so the producer stops. A blocked producer is
    /// signalled only if the context was still available.
    pub fn discard_all(&self) {
        let mut state = self.gate.lock();
        state.ring.mark_all_discard();

        let had_context = state.context_available;
        state.context_available = false;
        if had_context {
            self.gate.signal(&mut state);
        }
        log::debug!("transfer queue discarded (context was available: {})", had_context);
    }

    /// The GPU context went away. Pending slots stay queued.
    pub fn on_context_lost(&self) {
        let mut state = self.gate.lock();
        let had_context = state.context_available;
        state.context_available = false;
        if had_context {
            self.gate.signal(&mut state);
        }
    }

    /// The GPU context is back; the next drain copies whatever is still pending.
    pub fn on_context_restored(&self) {
        self.gate.lock().context_available = true;
    }

    pub fn is_interrupted(&self) -> bool {
        self.gate.lock().interrupted
    }

    pub fn has_context(&self) -> bool {
        self.gate.lock().context_available
    }
}
