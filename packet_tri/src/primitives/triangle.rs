use glam::*;

use super::{Ray, Hit};

/*****************************************************************************
*                               PUB STRUCTS
******************************************************************************/

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub p0: Vec3,
    pub p1: Vec3,
    pub p2: Vec3,
    pub prim_id: u32,
    pub geom_id: u32
}

/*****************************************************************************
*                               IMPLEMENTATIONS
******************************************************************************/

impl Triangle {
    #[inline]
    pub fn new(p0: &Vec3, p1: &Vec3, p2: &Vec3) -> Self {
        Triangle {
            p0: *p0,
            p1: *p1,
            p2: *p2,
            prim_id: 0,
            geom_id: 0
        }
    }

    #[inline]
    pub fn with_ids(mut self, prim_id: u32, geom_id: u32) -> Self {
        self.prim_id = prim_id;
        self.geom_id = geom_id;
        self
    }

    #[inline]
    pub fn edge1(&self) -> Vec3 {
        self.p1 - self.p0
    }

    #[inline]
    pub fn edge2(&self) -> Vec3 {
        self.p2 - self.p0
    }

    /// Unnormalized geometric normal, `edge1 x edge2`.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.edge1().cross(self.edge2())
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite()
    }

    /// Zero-area triangles have a zero normal and can never be hit.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.normal() == Vec3::ZERO
    }

    /// Single ray Möller-Trumbore test with inclusive edges and range.
    ///
    /// Follows the same acceptance rules as the packet kernel: a zero
    /// determinant is a miss, a barycentric coordinate of exactly zero is a hit.
    #[allow(clippy::manual_range_contains)]
    pub fn intersect(&self, ray: &Ray, tnear: f32, tfar: f32) -> Option<Hit> {
        let edge1 = self.edge1();
        let edge2 = self.edge2();
        let pvec = ray.direction().cross(edge2);
        let det = edge1.dot(pvec);
        if det == 0.0 {
            return None;
        }
        let inv_det = 1.0 / det;

        let tvec = *ray.origin() - self.p0;
        let u = tvec.dot(pvec) * inv_det;
        if u < 0.0 || u > 1.0 {
            return None;
        }

        let qvec = tvec.cross(edge1);
        let v = ray.direction().dot(qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(qvec) * inv_det;
        if t < tnear || t > tfar {
            return None;
        }

        Some(Hit {
            t,
            uv: Vec2::new(u, v),
            normal: edge1.cross(edge2),
            prim_id: self.prim_id,
            geom_id: self.geom_id
        })
    }
}
