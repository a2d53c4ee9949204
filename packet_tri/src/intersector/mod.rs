use super::{LaneMask, RayPacket};

pub mod moeller;
pub use moeller::*;
pub mod stream;
pub use stream::*;

/// A kernel testing one packet of rays against one group of primitives.
pub trait PacketIntersector {
    type Primitive: Sync;

    fn name() -> &'static str;

    /// Closest hit: records in `ray` every hit nearer than its current `tfar`.
    /// Lanes outside `valid` and lanes that miss are left untouched.
    fn intersect(valid: LaneMask, ray: &mut RayPacket, primitive: &Self::Primitive);

    /// Any hit: returns the lanes that are blocked, with lanes outside
    /// `valid` reported as blocked.
    fn occluded(valid: LaneMask, ray: &RayPacket, primitive: &Self::Primitive) -> LaneMask;
}
