mod common;

use common::{descriptor, identity, init_logging, paint, small_queue, CopyLog, RecordingTile};
use tile_transfer::Core::TileRegistry;
use tile_transfer::Transfer::Ring::SlotStatus;
use tile_transfer::{EnqueueOutcome, RejectReason};

#[test]
fn context_lost_rejects_until_restored() {
    init_logging();
    let queue = small_queue(4);
    let log = CopyLog::default();
    let mut registry = TileRegistry::new();
    let token = registry.insert(RecordingTile::new(identity(0, 0), &log));

    queue.on_context_lost();
    assert!(!queue.has_context());
    let outcome = queue.try_enqueue(token, descriptor(identity(0, 0), 1), paint(1));
    assert_eq!(outcome, EnqueueOutcome::Rejected(RejectReason::ContextUnavailable));
    assert_eq!(queue.stats().empty_count, 4);

    queue.on_context_restored();
    assert!(queue.has_context());
    let outcome = queue.try_enqueue(token, descriptor(identity(0, 0), 1), paint(1));
    assert!(outcome.is_accepted());
}

#[test]
fn pending_slots_survive_context_loss() {
    let queue = small_queue(4);
    let log = CopyLog::default();
    let mut registry = TileRegistry::new();
    let a = registry.insert(RecordingTile::new(identity(0, 0), &log));
    let b = registry.insert(RecordingTile::new(identity(1, 0), &log));
    assert!(queue.try_enqueue(a, descriptor(identity(0, 0), 1), paint(1)).is_accepted());
    assert!(queue.try_enqueue(b, descriptor(identity(1, 0), 1), paint(2)).is_accepted());

    queue.on_context_lost();
    let report = queue.drain(&mut registry, &mut ());
    assert_eq!(report.deferred, 2);
    assert_eq!(report.applied, 0);
    assert!(log.borrow().is_empty());
    let stats = queue.stats();
    assert_eq!(stats.pending_transfer, 2);
    assert_eq!(stats.empty_count, 2);

    queue.on_context_restored();
    let report = queue.drain(&mut registry, &mut ());
    assert_eq!(report.applied, 2);
    let xs: Vec<i32> = log.borrow().iter().map(|c| c.x).collect();
    assert_eq!(xs, vec![0, 1]);
}

#[test]
fn slots_left_across_context_loss_are_still_checked() {
    let queue = small_queue(4);
    let log = CopyLog::default();
    let mut registry = TileRegistry::new();
    let a = registry.insert(RecordingTile::new(identity(0, 0), &log));
    assert!(queue.try_enqueue(a, descriptor(identity(0, 0), 1), paint(1)).is_accepted());

    queue.on_context_lost();
    registry.get_mut(a).unwrap().identity = identity(9, 9);
    queue.on_context_restored();

    let report = queue.drain(&mut registry, &mut ());
    assert_eq!(report.obsolete, 1);
    assert!(log.borrow().is_empty());
}

#[test]
fn interrupt_only_matters_when_full() {
    let queue = small_queue(2);
    let log = CopyLog::default();
    let mut registry = TileRegistry::new();
    let token = registry.insert(RecordingTile::new(identity(0, 0), &log));

    queue.interrupt(true);
    assert!(queue.is_interrupted());
    assert!(queue.try_enqueue(token, descriptor(identity(0, 0), 1), paint(1)).is_accepted());
    assert!(queue.try_enqueue(token, descriptor(identity(0, 0), 2), paint(2)).is_accepted());

    // Full and interrupted: rejected without waiting.
    let outcome = queue.try_enqueue(token, descriptor(identity(0, 0), 3), paint(3));
    assert_eq!(outcome, EnqueueOutcome::Rejected(RejectReason::Interrupted));

    queue.interrupt(false);
    queue.drain(&mut registry, &mut ());
    assert!(queue.try_enqueue(token, descriptor(identity(0, 0), 4), paint(4)).is_accepted());
}

#[test]
fn discard_holds_capacity_until_drained() {
    let queue = small_queue(4);
    let log = CopyLog::default();
    let mut registry = TileRegistry::new();
    let token = registry.insert(RecordingTile::new(identity(0, 0), &log));
    assert!(queue.try_enqueue(token, descriptor(identity(0, 0), 1), paint(1)).is_accepted());

    queue.discard_all();
    assert!(queue
        .slot_statuses()
        .iter()
        .all(|&s| s == SlotStatus::PendingDiscard));
    assert_eq!(queue.stats().empty_count, 0);

    let outcome = queue.try_enqueue(token, descriptor(identity(0, 0), 2), paint(2));
    assert_eq!(outcome, EnqueueOutcome::Rejected(RejectReason::ContextUnavailable));

    // Context back before cleanup: the ring is still full of discards.
    queue.on_context_restored();
    queue.interrupt(true);
    let outcome = queue.try_enqueue(token, descriptor(identity(0, 0), 3), paint(3));
    assert_eq!(outcome, EnqueueOutcome::Rejected(RejectReason::Interrupted));
    queue.interrupt(false);

    let report = queue.drain(&mut registry, &mut ());
    assert_eq!(report.discarded, 4);
    assert!(log.borrow().is_empty());
    assert!(queue.try_enqueue(token, descriptor(identity(0, 0), 4), paint(4)).is_accepted());

    queue.drain(&mut registry, &mut ());
    let copied = log.borrow();
    assert_eq!(copied.len(), 1);
    assert_eq!(copied[0].picture_count, 4);
    assert_eq!(copied[0].first_byte, 4);
}

#[test]
fn discard_is_idempotent() {
    let queue = small_queue(4);
    let mut registry: TileRegistry<RecordingTile> = TileRegistry::new();

    queue.discard_all();
    queue.discard_all();
    let stats = queue.stats();
    assert_eq!(stats.pending_discard, 4);
    assert!(!stats.context_available);

    let report = queue.drain(&mut registry, &mut ());
    assert_eq!(report.discarded, 4);
    assert_eq!(queue.stats().empty_count, 4);
    assert!(!queue.has_context());
}
