use glam::*;

use super::{Triangle, Vec3x4, LANES};
use crate::BatchError;

/*****************************************************************************
*                               PUB STRUCTS
******************************************************************************/

/// Up to four pre-processed triangles laid out component-wise.
///
/// Only the first `size` lanes are meaningful; the rest are zero and never
/// tested.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleBatch {
    pub v0: Vec3x4,
    pub e1: Vec3x4,
    pub e2: Vec3x4,
    pub normal: Vec3x4,
    pub prim_id: UVec4,
    pub geom_id: UVec4,
    size: usize
}

/// Scalar view of one lane of a [`TriangleBatch`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct BatchLane {
    pub v0: Vec3,
    pub e1: Vec3,
    pub e2: Vec3,
    pub normal: Vec3,
    pub prim_id: u32,
    pub geom_id: u32
}

/*****************************************************************************
*                               IMPLEMENTATIONS
******************************************************************************/

impl TriangleBatch {
    pub fn new(triangles: &[Triangle]) -> Result<Self, BatchError> {
        if triangles.len() > LANES {
            return Err(BatchError::TooManyTriangles { count: triangles.len() });
        }

        let mut batch = Self::empty();
        for (i, triangle) in triangles.iter().enumerate() {
            if !triangle.is_finite() {
                return Err(BatchError::NonFiniteVertex { index: i });
            }
            if triangle.is_degenerate() {
                log::debug!("triangle {} (prim {}) has zero area and will never be hit", i, triangle.prim_id);
            }

            batch.v0.set_lane(i, triangle.p0);
            batch.e1.set_lane(i, triangle.edge1());
            batch.e2.set_lane(i, triangle.edge2());
            batch.normal.set_lane(i, triangle.normal());
            batch.prim_id[i] = triangle.prim_id;
            batch.geom_id[i] = triangle.geom_id;
        }
        batch.size = triangles.len();

        Ok(batch)
    }

    #[inline]
    pub fn empty() -> Self {
        TriangleBatch {
            v0: Vec3x4::ZERO,
            e1: Vec3x4::ZERO,
            e2: Vec3x4::ZERO,
            normal: Vec3x4::ZERO,
            prim_id: UVec4::ZERO,
            geom_id: UVec4::ZERO,
            size: 0
        }
    }

    /// Splits `triangles` into batches of at most four, keeping input order.
    pub fn pack(triangles: &[Triangle]) -> Result<Vec<Self>, BatchError> {
        let mut batches = Vec::with_capacity(triangles.len().div_ceil(LANES));
        for (chunk_idx, chunk) in triangles.chunks(LANES).enumerate() {
            let batch = Self::new(chunk).map_err(|err| match err {
                BatchError::NonFiniteVertex { index } => BatchError::NonFiniteVertex { index: chunk_idx * LANES + index },
                err => err
            })?;
            batches.push(batch);
        }

        log::trace!("packed {} triangles into {} batches", triangles.len(), batches.len());
        Ok(batches)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub(crate) fn lane(&self, i: usize) -> BatchLane {
        BatchLane {
            v0: self.v0.lane(i),
            e1: self.e1.lane(i),
            e2: self.e2.lane(i),
            normal: self.normal.lane(i),
            prim_id: self.prim_id[i],
            geom_id: self.geom_id[i]
        }
    }
}

impl Default for TriangleBatch {
    fn default() -> Self {
        Self::empty()
    }
}
