use rayon::prelude::*;

use super::PacketIntersector;
use crate::{LaneMask, RayPacket};

fn check_lengths(packets: usize, masks: usize) {
    if packets != masks {
        log::debug!("{} packets but {} lane masks, extra entries are ignored", packets, masks);
    }
}

/// Closest hit for every packet against every primitive, packets in parallel.
///
/// Each packet walks `primitives` in order on a single thread, so the result is
/// the same as calling [`PacketIntersector::intersect`] in a loop.
pub fn intersect_stream<I: PacketIntersector>(
    packets: &mut [RayPacket],
    masks: &[LaneMask],
    primitives: &[I::Primitive]
) {
    check_lengths(packets.len(), masks.len());
    log::trace!("{}: intersecting {} packets with {} primitives", I::name(), packets.len(), primitives.len());

    packets.par_iter_mut().zip(masks.par_iter()).for_each(|(packet, valid)| {
        for primitive in primitives {
            I::intersect(*valid, packet, primitive);
        }
    });
}

/// Any hit for every packet against `primitives`, packets in parallel.
///
/// Returns one mask per packet, in input order. A packet stops visiting
/// primitives once all of its lanes are blocked.
pub fn occluded_stream<I: PacketIntersector>(
    packets: &[RayPacket],
    masks: &[LaneMask],
    primitives: &[I::Primitive]
) -> Vec<LaneMask> {
    check_lengths(packets.len(), masks.len());
    log::trace!("{}: occlusion of {} packets with {} primitives", I::name(), packets.len(), primitives.len());

    packets.par_iter().zip(masks.par_iter()).map(|(packet, valid)| {
        // lanes outside the mask count as blocked from the start
        let mut occlusion = LaneMask::from_simd(!valid.to_simd());
        for primitive in primitives {
            occlusion = I::occluded(LaneMask::from_simd(!occlusion.to_simd()), packet, primitive);
            if occlusion.is_all_lanes() {
                break;
            }
        }
        occlusion
    }).collect()
}
