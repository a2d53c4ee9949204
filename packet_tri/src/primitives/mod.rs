pub mod vec3x4;
pub use vec3x4::*;
pub mod lane_mask;
pub use lane_mask::*;
pub mod ray;
pub use ray::*;
pub mod triangle;
pub use triangle::*;
pub mod triangle_batch;
pub use triangle_batch::*;

/// Number of rays in a packet and triangles in a batch.
pub const LANES: usize = 4;
