#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_utils::Backoff;
use tile_transfer::Core::{Destination, TransferFrame, WritableFrame};
use tile_transfer::Transfer::Structs::{PainterId, TileDescriptor, TileIdentity};
use tile_transfer::{TransferError, TransferQueue, TransferQueueBuilder, TransferResult};

pub const TILE: u32 = 4;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn small_queue(capacity: usize) -> TransferQueue {
    TransferQueueBuilder::new()
        .with_capacity(capacity)
        .with_tile_size(TILE, TILE)
        .build()
        .unwrap()
}

pub fn identity(x: i32, y: i32) -> TileIdentity {
    TileIdentity {
        x,
        y,
        scale: 1.0,
        painter: PainterId(7),
    }
}

pub fn descriptor(identity: TileIdentity, picture_count: u32) -> TileDescriptor {
    TileDescriptor::new(
        identity.x,
        identity.y,
        identity.scale,
        identity.painter,
        picture_count,
    )
}

/// Writer that fills the whole frame with `byte`.
pub fn paint(byte: u8) -> impl FnOnce(&mut WritableFrame) -> TransferResult<()> {
    move |frame| {
        frame.pixels_mut().fill(byte);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Copied {
    pub x: i32,
    pub y: i32,
    pub picture_count: u32,
    pub frame: u64,
    pub first_byte: u8,
}

pub type CopyLog = Rc<RefCell<Vec<Copied>>>;

/// Destination that records every copy into a shared log.
pub struct RecordingTile {
    pub identity: TileIdentity,
    pub fail: bool,
    pub backing: bool,
    pub stamped: Option<TileDescriptor>,
    pending: Option<(u64, u8)>,
    log: CopyLog,
}

impl RecordingTile {
    pub fn new(identity: TileIdentity, log: &CopyLog) -> Self {
        Self {
            identity,
            fail: false,
            backing: true,
            stamped: None,
            pending: None,
            log: Rc::clone(log),
        }
    }
}

impl Destination for RecordingTile {
    fn identity(&self) -> TileIdentity {
        self.identity
    }

    fn has_backing(&self) -> bool {
        self.backing
    }

    fn apply_content(&mut self, frame: &TransferFrame) -> TransferResult<()> {
        if self.fail {
            return Err(TransferError::copy_failed("framebuffer incomplete"));
        }
        self.pending = Some((frame.sequence(), frame.pixels()[0]));
        Ok(())
    }

    fn stamp_descriptor(&mut self, descriptor: &TileDescriptor) {
        self.stamped = Some(*descriptor);
        let (frame, first_byte) = self.pending.take().unwrap_or_default();
        self.log.borrow_mut().push(Copied {
            x: descriptor.x,
            y: descriptor.y,
            picture_count: descriptor.picture_count,
            frame,
            first_byte,
        });
    }
}

/// Poll `cond` until it holds or five seconds pass.
pub fn wait_until(cond: impl Fn() -> bool) -> bool {
    let backoff = Backoff::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    while !cond() {
        if Instant::now() > deadline {
            return false;
        }
        if backoff.is_completed() {
            thread::sleep(Duration::from_millis(1));
        } else {
            backoff.snooze();
        }
    }
    true
}
