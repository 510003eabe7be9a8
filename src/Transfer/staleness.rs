// When a queued frame no longer belongs to the tile it was rendered for.
//
// The check is on identity, not content: a tile recycled for another region,
// scale or painter between enqueue and drain makes the slot's frame useless
// even though the token may still resolve.

use super::Ring::Slot;
use crate::Core::registry::{Destination, DestinationRegistry};

/// Resolve the slot's destination, or `None` when the slot is obsolete.
pub fn live_destination<'r, R>(slot: &Slot, registry: &'r mut R) -> Option<&'r mut R::Target>
where
    R: DestinationRegistry,
{
    let Some(token) = slot.destination else {
        log::debug!("slot has no destination, such that the tile is obsolete");
        return None;
    };

    let Some(destination) = registry.resolve(token) else {
        log::debug!(
            "destination {:?} is gone, such that the tile is obsolete",
            token
        );
        return None;
    };

    if !destination.has_backing() {
        log::debug!("destination has no backing texture, such that the tile is obsolete");
        return None;
    }

    if destination.identity() != slot.descriptor.identity() {
        log::debug!(
            "mismatching x, y, scale or painter for tile x y {} {}, such that the tile is obsolete",
            slot.descriptor.x,
            slot.descriptor.y
        );
        return None;
    }

    Some(destination)
}

/// `true` if the slot's payload should be dropped without copying.
pub fn is_obsolete<R: DestinationRegistry>(slot: &Slot, registry: &mut R) -> bool {
    live_destination(slot, registry).is_none()
}
