use glam::*;

use super::PacketIntersector;
use crate::{LaneMask, RayPacket, TriangleBatch, Vec3x4};
use crate::primitives::BatchLane;

/*****************************************************************************
*                               PUB STRUCTS
******************************************************************************/

/// Four rays against up to four triangles.
///
/// A Möller-Trumbore variant working on the precomputed geometric normal
/// `edge1 x edge2`: the determinant, both edge tests and the depth test are
/// compared as numerators scaled by `|det|`, so the only division happens once
/// per accepted lane.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoellerTrumbore;

/*****************************************************************************
*                               PRIVATE STRUCTS
******************************************************************************/

/// Numerators of the lanes that passed every test against one triangle.
struct EdgeTest {
    valid: BVec4A,
    u: Vec4,
    v: Vec4,
    t: Vec4,
    abs_det: Vec4
}

/*****************************************************************************
*                               IMPLEMENTATIONS
******************************************************************************/

impl MoellerTrumbore {
    #[inline(always)]
    fn edge_test(valid: BVec4A, ray: &RayPacket, tri: &BatchLane) -> Option<EdgeTest> {
        let mut valid = valid;
        let normal = Vec3x4::splat(tri.normal);

        // calculate determinant
        let c = Vec3x4::splat(tri.v0) - ray.origin;
        let r = ray.direction.cross(&c);
        let det = normal.dot(&ray.direction);
        let abs_det = det.abs();
        let sgn_det = det.signum();
        valid &= det.cmpne(Vec4::ZERO);
        if !valid.any() {
            return None;
        }

        // test against edge p2 p0, u = (C x D).e2 / det
        let u = -r.dot(&Vec3x4::splat(tri.e2)) * sgn_det;
        valid &= u.cmpge(Vec4::ZERO);
        if !valid.any() {
            return None;
        }

        // test against edge p0 p1, v = (D x C).e1 / det
        let v = r.dot(&Vec3x4::splat(tri.e1)) * sgn_det;
        valid &= v.cmpge(Vec4::ZERO);
        if !valid.any() {
            return None;
        }

        // test against edge p1 p2
        let w = abs_det - u - v;
        valid &= w.cmpge(Vec4::ZERO);
        if !valid.any() {
            return None;
        }

        // depth test, t = Ng.C / det
        let t = normal.dot(&c) * sgn_det;
        valid &= t.cmpge(abs_det * ray.tnear) & (abs_det * ray.tfar).cmpge(t);
        if !valid.any() {
            return None;
        }

        Some(EdgeTest {
            valid,
            u,
            v,
            t,
            abs_det
        })
    }

    #[inline]
    fn select_ids(mask: BVec4A, if_true: u32, if_false: UVec4) -> UVec4 {
        let [x, y, z, w] = LaneMask::from_simd(mask).lanes();
        UVec4::select(BVec4::new(x, y, z, w), UVec4::splat(if_true), if_false)
    }
}

impl PacketIntersector for MoellerTrumbore {
    type Primitive = TriangleBatch;

    fn name() -> &'static str {
        "moeller"
    }

    fn intersect(valid: LaneMask, ray: &mut RayPacket, primitive: &TriangleBatch) {
        let valid_i = valid.to_simd();

        for i in 0..primitive.size() {
            let tri = primitive.lane(i);
            let Some(hit) = Self::edge_test(valid_i, ray, &tri) else {
                continue;
            };

            // update hit information for all rays that hit the triangle
            let rcp_abs_det = hit.abs_det.recip();
            ray.u = Vec4::select(hit.valid, hit.u * rcp_abs_det, ray.u);
            ray.v = Vec4::select(hit.valid, hit.v * rcp_abs_det, ray.v);
            let t = (hit.t * rcp_abs_det).max(ray.tnear).min(ray.tfar);
            ray.tfar = Vec4::select(hit.valid, t, ray.tfar);
            ray.prim_id = Self::select_ids(hit.valid, tri.prim_id, ray.prim_id);
            ray.geom_id = Self::select_ids(hit.valid, tri.geom_id, ray.geom_id);
            ray.normal = Vec3x4::select(hit.valid, &Vec3x4::splat(tri.normal), &ray.normal);
        }
    }

    fn occluded(valid: LaneMask, ray: &RayPacket, primitive: &TriangleBatch) -> LaneMask {
        let valid_i = valid.to_simd();
        let mut occlusion = !valid_i;

        for i in 0..primitive.size() {
            let tri = primitive.lane(i);
            let Some(hit) = Self::edge_test(valid_i, ray, &tri) else {
                continue;
            };

            occlusion |= hit.valid;
            if occlusion.all() {
                break;
            }
        }

        LaneMask::from_simd(occlusion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Triangle, INVALID_ID, LANES};
    use approx::assert_relative_eq;

    fn unit_batch() -> TriangleBatch {
        TriangleBatch::new(&[Triangle::new(&Vec3::ZERO, &Vec3::X, &Vec3::Y).with_ids(5, 1)]).unwrap()
    }

    fn packet_towards_z(points: [Vec2; LANES]) -> RayPacket {
        RayPacket::new(
            &points.map(|p| Vec3::new(p.x, p.y, -1.0)),
            &[Vec3::Z; LANES],
            Vec4::ZERO,
            Vec4::splat(f32::INFINITY)
        )
    }

    #[test]
    fn unit_triangle_scenario() {
        let mut packet = packet_towards_z([Vec2::splat(0.25); LANES]);
        MoellerTrumbore::intersect(LaneMask::all_lanes(), &mut packet, &unit_batch());

        for i in 0..LANES {
            let hit = packet.hit(i).unwrap();
            assert_relative_eq!(hit.t, 1.0, max_relative = 1e-5);
            assert_relative_eq!(hit.uv.x, 0.25, max_relative = 1e-5);
            assert_relative_eq!(hit.uv.y, 0.25, max_relative = 1e-5);
            assert_eq!(hit.normal, Vec3::Z);
            assert_eq!((hit.prim_id, hit.geom_id), (5, 1));
        }
    }

    #[test]
    fn reversed_direction_flips_determinant_sign() {
        let mut packet = RayPacket::new(
            &[Vec3::new(0.1, 0.6, 2.0); LANES],
            &[Vec3::NEG_Z; LANES],
            Vec4::ZERO,
            Vec4::splat(10.0)
        );
        MoellerTrumbore::intersect(LaneMask::all_lanes(), &mut packet, &unit_batch());

        let hit = packet.hit(0).unwrap();
        assert_relative_eq!(hit.t, 2.0, max_relative = 1e-5);
        assert_relative_eq!(hit.uv.x, 0.1, max_relative = 1e-5);
        assert_relative_eq!(hit.uv.y, 0.6, max_relative = 1e-5);
    }

    #[test]
    fn misses_leave_lanes_untouched() {
        let mut packet = packet_towards_z([
            Vec2::new(0.25, 0.25),
            Vec2::new(0.75, 0.75),
            Vec2::new(-0.1, 0.5),
            Vec2::new(0.5, -0.1)
        ]);
        let before = packet;
        MoellerTrumbore::intersect(LaneMask::all_lanes(), &mut packet, &unit_batch());

        assert!(packet.hit(0).is_some());
        for i in 1..LANES {
            assert!(packet.hit(i).is_none());
            assert_eq!(packet.tfar[i].to_bits(), before.tfar[i].to_bits());
            assert_eq!(packet.u[i].to_bits(), before.u[i].to_bits());
            assert_eq!(packet.v[i].to_bits(), before.v[i].to_bits());
            assert_eq!(packet.normal.lane(i), before.normal.lane(i));
            assert_eq!(packet.prim_id[i], INVALID_ID);
        }
    }

    #[test]
    fn masked_lanes_are_skipped() {
        let mut packet = packet_towards_z([Vec2::splat(0.25); LANES]);
        MoellerTrumbore::intersect(LaneMask::Lane1 | LaneMask::Lane2, &mut packet, &unit_batch());
        assert_eq!(
            [0, 1, 2, 3].map(|i| packet.hit(i).is_some()),
            [false, true, true, false]
        );

        let blocked = MoellerTrumbore::occluded(LaneMask::Lane1, &packet_towards_z([Vec2::splat(0.25); LANES]), &unit_batch());
        assert!(blocked.is_all_lanes());
    }

    #[test]
    fn parallel_rays_never_hit() {
        let mut packet = RayPacket::new(
            &[Vec3::new(-1.0, 0.25, 0.0); LANES],
            &[Vec3::X; LANES],
            Vec4::ZERO,
            Vec4::splat(f32::INFINITY)
        );
        let before = packet;
        MoellerTrumbore::intersect(LaneMask::all_lanes(), &mut packet, &unit_batch());
        assert_eq!(packet, before);
        assert!(MoellerTrumbore::occluded(LaneMask::all_lanes(), &packet, &unit_batch()).is_no_lanes());
    }

    #[test]
    fn grazing_edges_and_vertices_are_hits() {
        let mut packet = packet_towards_z([
            Vec2::new(0.5, 0.0),
            Vec2::new(0.0, 0.5),
            Vec2::new(0.5, 0.5),
            Vec2::new(0.0, 0.0)
        ]);
        MoellerTrumbore::intersect(LaneMask::all_lanes(), &mut packet, &unit_batch());
        for i in 0..LANES {
            assert!(packet.hit(i).is_some(), "lane {} should graze the triangle", i);
        }
        assert_eq!(packet.v[0], 0.0);
        assert_eq!(packet.u[1], 0.0);
    }

    #[test]
    fn just_outside_an_edge_is_a_miss() {
        let eps = 1e-6;
        let packet = packet_towards_z([
            Vec2::new(0.5, -eps),
            Vec2::new(-eps, 0.5),
            Vec2::new(0.5 + eps, 0.5 + eps),
            Vec2::new(-eps, -eps)
        ]);
        assert!(MoellerTrumbore::occluded(LaneMask::all_lanes(), &packet, &unit_batch()).is_no_lanes());
    }

    #[test]
    fn depth_range_is_inclusive() {
        let mut packet = packet_towards_z([Vec2::splat(0.25); LANES]);
        packet.tnear = Vec4::new(0.0, 1.0, 1.5, 0.0);
        packet.tfar = Vec4::new(1.0, 2.0, 2.0, 0.5);
        MoellerTrumbore::intersect(LaneMask::all_lanes(), &mut packet, &unit_batch());
        assert_eq!(
            [0, 1, 2, 3].map(|i| packet.hit(i).is_some()),
            [true, true, false, false]
        );
    }

    #[test]
    fn nearest_triangle_in_batch_wins() {
        let tris = [3.0, 1.0, 4.0, 2.0].map(|z| {
            Triangle::new(&Vec3::new(-1.0, -1.0, z), &Vec3::new(2.0, -1.0, z), &Vec3::new(-1.0, 2.0, z)).with_ids(z as u32, 0)
        });
        let mut packet = packet_towards_z([Vec2::ZERO; LANES]);
        MoellerTrumbore::intersect(LaneMask::all_lanes(), &mut packet, &TriangleBatch::new(&tris).unwrap());

        let hit = packet.hit(0).unwrap();
        assert_eq!(hit.prim_id, 1);
        assert_relative_eq!(hit.t, 2.0, max_relative = 1e-5);
    }

    #[test]
    fn empty_inputs() {
        let mut packet = packet_towards_z([Vec2::splat(0.25); LANES]);
        let before = packet;

        MoellerTrumbore::intersect(LaneMask::all_lanes(), &mut packet, &TriangleBatch::empty());
        MoellerTrumbore::intersect(LaneMask::no_lanes(), &mut packet, &unit_batch());
        assert_eq!(packet, before);

        assert!(MoellerTrumbore::occluded(LaneMask::no_lanes(), &packet, &unit_batch()).is_all_lanes());
        assert!(MoellerTrumbore::occluded(LaneMask::no_lanes(), &packet, &TriangleBatch::empty()).is_all_lanes());
        assert!(MoellerTrumbore::occluded(LaneMask::all_lanes(), &packet, &TriangleBatch::empty()).is_no_lanes());
    }

    #[test]
    fn zero_area_triangle_is_never_hit() {
        let sliver = Triangle::new(&Vec3::ZERO, &Vec3::X, &(Vec3::X * 2.0));
        let packet = RayPacket::new(
            &[Vec3::new(0.5, -1.0, 0.0), Vec3::new(0.5, 0.0, -1.0), Vec3::new(1.5, 1.0, 1.0), Vec3::ZERO],
            &[Vec3::Y, Vec3::Z, Vec3::new(0.0, -1.0, -1.0), Vec3::X],
            Vec4::ZERO,
            Vec4::splat(f32::INFINITY)
        );
        let blocked = MoellerTrumbore::occluded(LaneMask::all_lanes(), &packet, &TriangleBatch::new(&[sliver]).unwrap());
        assert!(blocked.is_no_lanes());
    }
}
