//! Packet ray/triangle intersection: 4 rays against up to 4 triangles at once.

mod error;
pub use error::*;
mod primitives;
pub use primitives::*;
mod intersector;
pub use intersector::*;
