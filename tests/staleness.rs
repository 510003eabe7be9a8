mod common;

use common::{descriptor, identity, CopyLog, RecordingTile};
use tile_transfer::Core::TileRegistry;
use tile_transfer::Transfer::staleness::is_obsolete;
use tile_transfer::Transfer::Ring::{Slot, SlotStatus};
use tile_transfer::Transfer::Structs::{PainterId, TileDescriptor, TileToken};

fn pending(token: TileToken, descriptor: TileDescriptor) -> Slot {
    Slot {
        status: SlotStatus::PendingTransfer,
        destination: Some(token),
        descriptor,
        frame_sequence: None,
    }
}

fn setup() -> (TileRegistry<RecordingTile>, TileToken, CopyLog) {
    let log = CopyLog::default();
    let mut registry = TileRegistry::new();
    let token = registry.insert(RecordingTile::new(identity(2, 3), &log));
    (registry, token, log)
}

#[test]
fn matching_identity_is_live() {
    let (mut registry, token, _log) = setup();
    let slot = pending(token, descriptor(identity(2, 3), 1));
    assert!(!is_obsolete(&slot, &mut registry));
}

#[test]
fn picture_count_is_not_part_of_identity() {
    let (mut registry, token, _log) = setup();
    let slot = pending(token, descriptor(identity(2, 3), 99));
    assert!(!is_obsolete(&slot, &mut registry));
}

#[test]
fn moved_tile_is_obsolete() {
    let (mut registry, token, _log) = setup();
    let slot = pending(token, descriptor(identity(2, 3), 1));

    registry.get_mut(token).unwrap().identity = identity(2, 4);
    assert!(is_obsolete(&slot, &mut registry));
}

#[test]
fn rescaled_tile_is_obsolete() {
    let (mut registry, token, _log) = setup();
    let slot = pending(token, descriptor(identity(2, 3), 1));

    registry.get_mut(token).unwrap().identity.scale = 2.0;
    assert!(is_obsolete(&slot, &mut registry));
}

#[test]
fn other_painter_is_obsolete() {
    let (mut registry, token, _log) = setup();
    let slot = pending(token, descriptor(identity(2, 3), 1));

    registry.get_mut(token).unwrap().identity.painter = PainterId(8);
    assert!(is_obsolete(&slot, &mut registry));
}

#[test]
fn removed_destination_is_obsolete() {
    let (mut registry, token, log) = setup();
    let slot = pending(token, descriptor(identity(2, 3), 1));

    registry.remove(token);
    assert!(is_obsolete(&slot, &mut registry));

    // Index reused by a tile with the same identity: the old token still misses.
    let fresh = registry.insert(RecordingTile::new(identity(2, 3), &log));
    assert_eq!(fresh.index(), token.index());
    assert!(is_obsolete(&slot, &mut registry));
    assert!(!is_obsolete(&pending(fresh, slot.descriptor), &mut registry));
}

#[test]
fn destination_without_backing_is_obsolete() {
    let (mut registry, token, _log) = setup();
    let slot = pending(token, descriptor(identity(2, 3), 1));

    registry.get_mut(token).unwrap().backing = false;
    assert!(is_obsolete(&slot, &mut registry));
}

#[test]
fn slot_without_destination_is_obsolete() {
    let (mut registry, _token, _log) = setup();
    let slot = Slot::default();
    assert!(is_obsolete(&slot, &mut registry));
}
