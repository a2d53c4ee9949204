use glam::*;

use super::{Vec3x4, LANES};

/// Identifier stored in a lane that has not hit anything yet.
pub const INVALID_ID: u32 = u32::MAX;

/*****************************************************************************
*                               PUB STRUCTS
******************************************************************************/

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3
}

/// Hit record of a single ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub t: f32,
    pub uv: Vec2,
    /// Unnormalized geometric normal of the hit triangle.
    pub normal: Vec3,
    pub prim_id: u32,
    pub geom_id: u32
}

/// Four rays and the hit state they accumulate.
///
/// `tfar` doubles as the hit distance: every accepted hit shrinks it, so a
/// lane only ever moves to closer triangles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayPacket {
    pub origin: Vec3x4,
    pub direction: Vec3x4,
    pub tnear: Vec4,
    pub tfar: Vec4,
    pub u: Vec4,
    pub v: Vec4,
    pub normal: Vec3x4,
    pub prim_id: UVec4,
    pub geom_id: UVec4
}

/*****************************************************************************
*                               IMPLEMENTATIONS
******************************************************************************/

impl Ray {
    #[inline]
    pub fn new(origin: &Vec3, direction: &Vec3) -> Self {
        Ray {
            origin: *origin,
            direction: *direction
        }
    }

    #[inline]
    pub fn origin(&self) -> &Vec3 {
        &self.origin
    }

    #[inline]
    pub fn direction(&self) -> &Vec3 {
        &self.direction
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Ray {
            origin: Vec3::ZERO,
            direction: Vec3::Z
        }
    }
}

impl RayPacket {
    pub fn new(origins: &[Vec3; LANES], directions: &[Vec3; LANES], tnear: Vec4, tfar: Vec4) -> Self {
        debug_assert!(tnear.cmple(tfar).all(), "tnear must not exceed tfar");

        RayPacket {
            origin: Vec3x4::from_array(origins),
            direction: Vec3x4::from_array(directions),
            tnear,
            tfar,
            u: Vec4::ZERO,
            v: Vec4::ZERO,
            normal: Vec3x4::ZERO,
            prim_id: UVec4::splat(INVALID_ID),
            geom_id: UVec4::splat(INVALID_ID)
        }
    }

    pub fn from_rays(rays: &[Ray; LANES], tnear: f32, tfar: f32) -> Self {
        Self::new(
            &rays.map(|r| r.origin),
            &rays.map(|r| r.direction),
            Vec4::splat(tnear),
            Vec4::splat(tfar)
        )
    }

    pub fn ray(&self, i: usize) -> Ray {
        Ray {
            origin: self.origin.lane(i),
            direction: self.direction.lane(i)
        }
    }

    pub fn rays(&self) -> [Ray; LANES] {
        [self.ray(0), self.ray(1), self.ray(2), self.ray(3)]
    }

    /// Returns the hit recorded in lane `i`, if any.
    pub fn hit(&self, i: usize) -> Option<Hit> {
        if self.geom_id[i] == INVALID_ID {
            return None;
        }

        Some(Hit {
            t: self.tfar[i],
            uv: Vec2::new(self.u[i], self.v[i]),
            normal: self.normal.lane(i),
            prim_id: self.prim_id[i],
            geom_id: self.geom_id[i]
        })
    }
}

impl Default for RayPacket {
    fn default() -> Self {
        Self::from_rays(&[Ray::default(); LANES], 0.0, f32::INFINITY)
    }
}
