// Module naming follows project convention (Transfer = tile transfer queue core)
#[allow(non_snake_case)]
pub mod Transfer;

#[allow(non_snake_case)]
pub mod Core;

#[allow(non_snake_case)]
pub mod Debug {
    pub mod StructDebug;
}

pub use crate::Core::error::{TransferError, TransferResult};
pub use crate::Transfer::{
    DrainReport, EnqueueOutcome, QueueStats, RejectReason, TransferQueue, TransferQueueBuilder,
};
