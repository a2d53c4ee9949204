use glam::*;
use std::ops::{Add, Sub};

use super::LANES;

/*****************************************************************************
*                               PUB STRUCTS
******************************************************************************/

/// Four 3D vectors stored component-wise, one lane per vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3x4 {
    pub x: Vec4,
    pub y: Vec4,
    pub z: Vec4
}

/*****************************************************************************
*                               IMPLEMENTATIONS
******************************************************************************/

impl Vec3x4 {
    pub const ZERO: Self = Vec3x4 {
        x: Vec4::ZERO,
        y: Vec4::ZERO,
        z: Vec4::ZERO
    };

    #[inline]
    pub fn new(x: Vec4, y: Vec4, z: Vec4) -> Self {
        Vec3x4 {
            x,
            y,
            z
        }
    }

    /// Broadcasts a single vector into every lane.
    #[inline]
    pub fn splat(v: Vec3) -> Self {
        Vec3x4 {
            x: Vec4::splat(v.x),
            y: Vec4::splat(v.y),
            z: Vec4::splat(v.z)
        }
    }

    #[inline]
    pub fn from_array(v: &[Vec3; LANES]) -> Self {
        Vec3x4 {
            x: Vec4::from_array(v.map(|v| v.x)),
            y: Vec4::from_array(v.map(|v| v.y)),
            z: Vec4::from_array(v.map(|v| v.z))
        }
    }

    #[inline]
    pub fn to_array(&self) -> [Vec3; LANES] {
        let mut result = [Vec3::ZERO; LANES];
        for (i, v) in result.iter_mut().enumerate() {
            *v = self.lane(i);
        }
        result
    }

    #[inline]
    pub fn lane(&self, i: usize) -> Vec3 {
        Vec3::new(self.x[i], self.y[i], self.z[i])
    }

    #[inline]
    pub fn set_lane(&mut self, i: usize, v: Vec3) {
        self.x[i] = v.x;
        self.y[i] = v.y;
        self.z[i] = v.z;
    }

    #[inline]
    pub fn dot(&self, other: &Vec3x4) -> Vec4 {
        (self.x * other.x) + (self.y * other.y) + (self.z * other.z)
    }

    #[inline]
    pub fn cross(&self, other: &Vec3x4) -> Vec3x4 {
        Vec3x4 {
            x: (self.y * other.z) - (other.y * self.z),
            y: (self.z * other.x) - (other.z * self.x),
            z: (self.x * other.y) - (other.x * self.y)
        }
    }

    /// Per lane, picks `if_true` where `mask` is set and `if_false` elsewhere.
    #[inline]
    pub fn select(mask: BVec4A, if_true: &Vec3x4, if_false: &Vec3x4) -> Vec3x4 {
        Vec3x4 {
            x: Vec4::select(mask, if_true.x, if_false.x),
            y: Vec4::select(mask, if_true.y, if_false.y),
            z: Vec4::select(mask, if_true.z, if_false.z)
        }
    }
}

impl Add for Vec3x4 {
    type Output = Vec3x4;

    #[inline]
    fn add(self, rhs: Vec3x4) -> Vec3x4 {
        Vec3x4::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3x4 {
    type Output = Vec3x4;

    #[inline]
    fn sub(self, rhs: Vec3x4) -> Vec3x4 {
        Vec3x4::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
