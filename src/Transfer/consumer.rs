// Consumer side: the drain cycle run by the rendering thread.

use super::queue::TransferQueue;
use super::staleness::live_destination;
use super::Ring::SlotStatus;
use crate::Core::registry::{Destination, DestinationRegistry};
use crate::Core::render_state::{RenderContext, RenderStateGuard};

/// What one drain cycle did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Slots walked by the main pass; always the ring capacity unless deferred.
    pub visited: usize,
    /// Frames copied into their destination.
    pub applied: usize,
    /// Frames dropped because their destination was repurposed or gone.
    pub obsolete: usize,
    /// Frames whose copy failed or that were missing from the shared buffer.
    pub failed: usize,
    /// Slots cleaned up after a discard.
    pub discarded: usize,
    /// Pending slots left for a later drain because the context is unavailable.
    pub deferred: usize,
}

impl TransferQueue {
    /// Copy every pending frame into its destination, oldest first.
    ///
    /// Discarded slots are cleaned up before anything else. When the context
    /// is unavailable only that cleanup runs and pending slots stay queued.
    /// Otherwise every slot ends up `Empty`, `empty_count` goes back to the
    /// capacity and one blocked producer is signalled.
    pub fn drain<R, C>(&self, registry: &mut R, render: &mut C) -> DrainReport
    where
        R: DestinationRegistry,
        C: RenderContext,
    {
        let _scope = RenderStateGuard::enter(render);
        let mut state = self.gate.lock();
        let mut report = DrainReport::default();

        for index in state.ring.oldest_first() {
            if state.ring.status(index) == SlotStatus::PendingDiscard {
                // Keep the shared buffer in step even though the content is unused.
                if let Some(frame) = self.buffer.retrieve_next() {
                    self.buffer.recycle(frame);
                }
                state.ring.release(index);
                report.discarded += 1;
            }
        }

        if !state.context_available {
            state.ring.recount_empty();
            report.deferred = state.ring.occupied();
            log::debug!(
                "drain deferred: no context, {} slot(s) left pending",
                report.deferred
            );
            return report;
        }

        for index in state.ring.oldest_first() {
            report.visited += 1;
            if state.ring.status(index) != SlotStatus::PendingTransfer {
                continue;
            }

            let slot = state.ring.slot(index).clone();
            let frame = self.buffer.retrieve_next();
            state.ring.release(index);

            let Some(frame) = frame else {
                log::warn!("no frame in the shared buffer for slot @ index {}", index);
                report.failed += 1;
                continue;
            };
            if let Some(expected) = slot.frame_sequence {
                if frame.sequence() != expected {
                    log::warn!(
                        "shared buffer out of step @ index {}: expected frame {}, got {}",
                        index,
                        expected,
                        frame.sequence()
                    );
                }
            }

            match live_destination(&slot, registry) {
                None => report.obsolete += 1,
                Some(destination) => match destination.apply_content(&frame) {
                    Ok(()) => {
                        // Later staleness checks compare against this content.
                        destination.stamp_descriptor(&slot.descriptor);
                        report.applied += 1;
                        log::trace!(
                            "copied tile x y {} {} from slot @ index {}",
                            slot.descriptor.x,
                            slot.descriptor.y,
                            index
                        );
                    }
                    Err(e) => {
                        log::error!(
                            "copy of tile x y {} {} failed: {}",
                            slot.descriptor.x,
                            slot.descriptor.y,
                            e
                        );
                        report.failed += 1;
                    }
                },
            }
            self.buffer.recycle(frame);
        }

        state.ring.reset_empty_count();
        self.gate.signal(&mut state);
        report
    }
}
