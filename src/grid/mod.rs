pub mod batch;
pub mod extent;
mod hex_set;
pub mod tessellate;

pub use batch::{
    GridBatch, build_batch, build_batch_par, build_batch_with_limit, build_pointy_batch,
};
pub use extent::{Coordinate, Extent};
pub use hex_set::HexSet;
pub use tessellate::{DEFAULT_MAX_HEXAGONS, tessellate, tessellate_extent};
