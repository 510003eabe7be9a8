// Destination tiles and the registry that owns them.
// The ring only ever stores `TileToken`s; resolving one goes through here.

use crate::Core::error::{TransferError, TransferResult};
use crate::Core::SharedSurface::{TileGeometry, TransferFrame, BYTES_PER_PIXEL};
use crate::Transfer::Structs::Transfer_Structs::{TileDescriptor, TileIdentity, TileToken};

/// A resource a transferred frame is copied into.
pub trait Destination {
    /// Current identity, read fresh at drain time.
    fn identity(&self) -> TileIdentity;

    /// A destination without backing storage cannot receive content.
    fn has_backing(&self) -> bool {
        true
    }

    /// Copy the frame into this destination.
    fn apply_content(&mut self, frame: &TransferFrame) -> TransferResult<()>;

    /// Record which content the destination now holds.
    fn stamp_descriptor(&mut self, descriptor: &TileDescriptor);
}

/// Resolves tokens recorded in the ring to live destinations.
pub trait DestinationRegistry {
    type Target: Destination;

    /// `None` once the token's entry has been removed or reused.
    fn resolve(&mut self, token: TileToken) -> Option<&mut Self::Target>;
}

struct Entry<D> {
    generation: u32,
    value: Option<D>,
}

/// Generation-checked slab of destinations.
///
/// Removing an entry bumps its generation, so every token handed out for the
/// old occupant stops resolving even after the index is reused.
pub struct TileRegistry<D> {
    entries: Vec<Entry<D>>,
    free: Vec<u32>,
    live: usize,
}

impl<D> Default for TileRegistry<D> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }
}

impl<D> TileRegistry<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: D) -> TileToken {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let entry = &mut self.entries[index as usize];
            entry.value = Some(value);
            return TileToken::new(index, entry.generation);
        }
        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            generation: 0,
            value: Some(value),
        });
        TileToken::new(index, 0)
    }

    pub fn remove(&mut self, token: TileToken) -> Option<D> {
        let entry = self.entries.get_mut(token.index as usize)?;
        if entry.generation != token.generation {
            return None;
        }
        let value = entry.value.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(token.index);
        self.live -= 1;
        Some(value)
    }

    pub fn get(&self, token: TileToken) -> Option<&D> {
        self.entries
            .get(token.index as usize)
            .filter(|e| e.generation == token.generation)
            .and_then(|e| e.value.as_ref())
    }

    pub fn get_mut(&mut self, token: TileToken) -> Option<&mut D> {
        self.entries
            .get_mut(token.index as usize)
            .filter(|e| e.generation == token.generation)
            .and_then(|e| e.value.as_mut())
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

impl<D: Destination> DestinationRegistry for TileRegistry<D> {
    type Target = D;

    fn resolve(&mut self, token: TileToken) -> Option<&mut D> {
        self.get_mut(token)
    }
}

/// A tile texture in CPU memory, tightly packed RGBA8888.
#[derive(Debug, Clone)]
pub struct TileTexture {
    identity: TileIdentity,
    width: u32,
    height: u32,
    backing: Option<Vec<u8>>,
    stamped: Option<TileDescriptor>,
    uploads: u64,
}

impl TileTexture {
    pub fn new(identity: TileIdentity, width: u32, height: u32) -> Self {
        Self {
            identity,
            width,
            height,
            backing: Some(vec![0u8; width as usize * height as usize * BYTES_PER_PIXEL]),
            stamped: None,
            uploads: 0,
        }
    }

    /// Reassign the tile to a different region, scale or painter.
    pub fn set_identity(&mut self, identity: TileIdentity) {
        self.identity = identity;
    }

    /// Release the backing texture; later copies into this tile fail.
    pub fn drop_backing(&mut self) {
        self.backing = None;
    }

    /// Descriptor of the content last copied in.
    pub fn stamped(&self) -> Option<&TileDescriptor> {
        self.stamped.as_ref()
    }

    pub fn pixels(&self) -> Option<&[u8]> {
        self.backing.as_deref()
    }

    pub fn upload_count(&self) -> u64 {
        self.uploads
    }
}

impl Destination for TileTexture {
    fn identity(&self) -> TileIdentity {
        self.identity
    }

    fn has_backing(&self) -> bool {
        self.backing.is_some()
    }

    fn apply_content(&mut self, frame: &TransferFrame) -> TransferResult<()> {
        let (width, height) = (self.width, self.height);
        let backing = self
            .backing
            .as_mut()
            .ok_or_else(|| TransferError::copy_failed("tile has no backing texture"))?;

        let geometry: TileGeometry = frame.geometry();
        if geometry.width != width || geometry.height != height {
            return Err(TransferError::GeometryMismatch {
                expected: backing.len(),
                actual: geometry.row_bytes() * geometry.height as usize,
            });
        }

        // Frame rows may be padded out to the stride; the texture is tight.
        let row_bytes = geometry.row_bytes();
        let stride_bytes = geometry.stride_bytes();
        for row in 0..height as usize {
            let dst = row * row_bytes;
            let src = row * stride_bytes;
            backing[dst..dst + row_bytes].copy_from_slice(&frame.pixels()[src..src + row_bytes]);
        }
        self.uploads += 1;
        Ok(())
    }

    fn stamp_descriptor(&mut self, descriptor: &TileDescriptor) {
        self.stamped = Some(*descriptor);
    }
}
