mod builder;
mod consumer;
mod debug;
mod gate;
mod lifecycle;
mod producer;
mod queue;
pub mod staleness;

pub use builder::TransferQueueBuilder;
pub use consumer::DrainReport;
pub use producer::{EnqueueOutcome, RejectReason, TileBitmap};
pub use queue::{QueueStats, TransferQueue};

pub mod Ring {
    pub mod Ring;
    pub mod Ring_impl;
    pub use Ring::{Slot, SlotRing, SlotStatus, RING_CAPACITY}; // re-export for stable path
}

pub mod Structs {
    pub mod Transfer_Structs;
    pub use Transfer_Structs::{PainterId, TileDescriptor, TileIdentity, TileToken}; // re-export for stable path
}
