pub mod SharedSurface;
pub mod error;
pub mod registry;
pub mod render_state;

pub use SharedSurface::{
    create_staging_buffer, SharedBuffer, StagingBuffer, TileGeometry, TransferFrame, WritableFrame,
};
pub use error::{TransferError, TransferResult};
pub use registry::{Destination, DestinationRegistry, TileRegistry, TileTexture};
pub use render_state::{RenderContext, RenderStateGuard};
