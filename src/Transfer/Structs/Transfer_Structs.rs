// Plain value types recorded in the ring at enqueue time.
// Nothing here owns a destination; tokens are resolved through the registry.

/// Identity of the painter (the owning layer/surface) a tile was rendered for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PainterId(pub u64);

/// Generation-checked handle to a destination tile owned by a registry.
///
/// A token whose generation no longer matches the registry entry resolves to
/// nothing, which is how a recycled tile is told apart from the one a producer
/// rendered for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileToken {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl TileToken {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// The externally visible identity of a destination tile: where it sits,
/// at which scale, and for which painter.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TileIdentity {
    pub x: i32,
    pub y: i32,
    pub scale: f32,
    pub painter: PainterId,
}

/// Snapshot taken by the producer when a tile is enqueued.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TileDescriptor {
    pub x: i32,
    pub y: i32,
    pub scale: f32,
    pub painter: PainterId,
    /// Version of the source content (picture count) the pixels were rendered from.
    pub picture_count: u32,
}

impl TileDescriptor {
    pub fn new(x: i32, y: i32, scale: f32, painter: PainterId, picture_count: u32) -> Self {
        Self {
            x,
            y,
            scale,
            painter,
            picture_count,
        }
    }

    /// The identity part of the snapshot, compared against the destination at drain time.
    /// `picture_count` is content versioning and never takes part in the comparison.
    #[inline]
    pub fn identity(&self) -> TileIdentity {
        TileIdentity {
            x: self.x,
            y: self.y,
            scale: self.scale,
            painter: self.painter,
        }
    }
}
