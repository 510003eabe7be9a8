// Mutex + condition variable pair guarding the ring and the two lifecycle flags.

use parking_lot::{Condvar, Mutex, MutexGuard};

use super::producer::RejectReason;
use super::Ring::SlotRing;

/// Everything the gate's lock protects.
pub(crate) struct QueueState {
    pub(crate) ring: SlotRing,
    pub(crate) interrupted: bool,
    pub(crate) context_available: bool,
    /// Bumped on every signal. A waiter leaves the condvar only once it moves.
    pub(crate) wake_epoch: u64,
    /// Producers currently parked in `wait_for_capacity`.
    pub(crate) blocked: usize,
}

impl QueueState {
    fn new(capacity: usize) -> Self {
        Self {
            ring: SlotRing::new(capacity),
            interrupted: false,
            context_available: true,
            wake_epoch: 0,
            blocked: 0,
        }
    }
}

pub(crate) enum Readiness {
    Ready,
    NotReady(RejectReason),
}

pub(crate) struct Gate {
    state: Mutex<QueueState>,
    cond: Condvar,
}

impl Gate {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(QueueState::new(capacity)),
            cond: Condvar::new(),
        }
    }

    #[inline]
    pub(crate) fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock()
    }

    #[inline]
    pub(crate) fn try_lock(&self) -> Option<MutexGuard<'_, QueueState>> {
        self.state.try_lock()
    }

    /// Producer side. Must be called holding the lock.
    ///
    /// Waits at most once. During teardown `empty_count` can stay at zero
    /// forever, so the producer is released by the first signal (drain,
    /// interrupt or context loss) instead of looping on capacity.
    pub(crate) fn wait_for_capacity(&self, state: &mut MutexGuard<'_, QueueState>) -> Readiness {
        if !state.context_available {
            return Readiness::NotReady(RejectReason::ContextUnavailable);
        }

        if state.ring.empty_count() == 0 {
            if state.interrupted {
                return Readiness::NotReady(RejectReason::Interrupted);
            }

            let epoch = state.wake_epoch;
            state.blocked += 1;
            // The epoch only filters spurious wakeups; one signal ends the wait.
            while state.wake_epoch == epoch {
                self.cond.wait(state);
            }
            state.blocked -= 1;

            if state.interrupted {
                return Readiness::NotReady(RejectReason::Interrupted);
            }
        }

        if !state.context_available {
            return Readiness::NotReady(RejectReason::ContextUnavailable);
        }

        // Woken without room (interrupt raised and cleared before we ran).
        if state.ring.empty_count() == 0 {
            return Readiness::NotReady(RejectReason::QueueFull);
        }

        Readiness::Ready
    }

    /// Wake one blocked producer. Must be called holding the lock.
    pub(crate) fn signal(&self, state: &mut QueueState) {
        state.wake_epoch = state.wake_epoch.wrapping_add(1);
        self.cond.notify_one();
    }
}
