use bitmask_enum::bitmask;
use glam::BVec4A;

use super::LANES;

const ALL_LANES_BITS: u8 = 0b1111;

/// One bit per ray lane of a packet.
///
/// Passed in to say which lanes take part in a query, and handed back by
/// occlusion queries to say which lanes are blocked.
#[bitmask(u8)]
pub enum LaneMask {
    Lane0,
    Lane1,
    Lane2,
    Lane3
}

impl LaneMask {
    #[inline]
    pub fn all_lanes() -> Self {
        Self::from(ALL_LANES_BITS)
    }

    #[inline]
    pub fn no_lanes() -> Self {
        Self::from(0)
    }

    #[inline]
    pub fn from_lanes(lanes: [bool; LANES]) -> Self {
        let mut bits = 0u8;
        for (i, lane) in lanes.into_iter().enumerate() {
            bits |= (lane as u8) << i;
        }
        Self::from(bits)
    }

    #[inline]
    pub fn lane(&self, i: usize) -> bool {
        assert!(i < LANES, "lane index {} out of range", i);
        (self.bits() >> i) & 1 != 0
    }

    #[inline]
    pub fn lanes(&self) -> [bool; LANES] {
        [self.lane(0), self.lane(1), self.lane(2), self.lane(3)]
    }

    #[inline]
    pub fn count(&self) -> u32 {
        (self.bits() & ALL_LANES_BITS).count_ones()
    }

    #[inline]
    pub fn is_all_lanes(&self) -> bool {
        self.bits() & ALL_LANES_BITS == ALL_LANES_BITS
    }

    #[inline]
    pub fn is_no_lanes(&self) -> bool {
        self.bits() & ALL_LANES_BITS == 0
    }

    /// Expands the bits into a SIMD lane mask.
    #[inline]
    pub fn to_simd(self) -> BVec4A {
        let [x, y, z, w] = self.lanes();
        BVec4A::new(x, y, z, w)
    }

    #[inline]
    pub fn from_simd(mask: BVec4A) -> Self {
        Self::from(mask.bitmask() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_lanes_are_single_bits() {
        assert_eq!(LaneMask::Lane0.bits(), 0b0001);
        assert_eq!(LaneMask::Lane3.bits(), 0b1000);
        assert_eq!((LaneMask::Lane0 | LaneMask::Lane2).lanes(), [true, false, true, false]);
    }

    #[test]
    fn simd_conversion_is_lossless() {
        for bits in 0..=ALL_LANES_BITS {
            let mask = LaneMask::from(bits);
            assert_eq!(LaneMask::from_simd(mask.to_simd()), mask);
            assert_eq!(mask.count(), bits.count_ones());
        }
    }

    #[test]
    fn all_and_none() {
        assert!(LaneMask::all_lanes().is_all_lanes());
        assert!(LaneMask::no_lanes().is_no_lanes());
        assert_eq!(LaneMask::from_lanes([true; LANES]), LaneMask::all_lanes());
        assert_eq!(LaneMask::all_lanes().to_simd(), BVec4A::splat(true));
    }

    #[test]
    #[should_panic]
    fn lane_out_of_range_panics() {
        LaneMask::all_lanes().lane(LANES);
    }
}
