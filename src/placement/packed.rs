//! Bit-packed `(x, y, height)` placement used by the game's object files.
//!
//! Layout of the `u32`:
//!
//! ```text
//! bits 20..32  height - 1
//! bits 10..20  y
//! bits  0..10  x
//! ```
//!
//! The stored height is the voxel just below the surface, so a column whose
//! top is `h` is packed as `h - 1`.

use std::fmt;

use serde::{Deserialize, Serialize};

const COORD_BITS: u32 = 10;
const COORD_MASK: u32 = (1 << COORD_BITS) - 1;
const HEIGHT_SHIFT: u32 = 2 * COORD_BITS;

/// Largest coordinate a placement can address.
pub const MAX_COORD: u16 = COORD_MASK as u16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackedPlacement(u32);

impl PackedPlacement {
    /// Packs a placement. Returns `None` if a coordinate needs more than
    /// 10 bits or the height is 0.
    pub fn new(x: u16, y: u16, height: u8) -> Option<Self> {
        if x > MAX_COORD || y > MAX_COORD || height == 0 {
            return None;
        }
        Some(Self(
            ((u32::from(height) - 1) << HEIGHT_SHIFT) | (u32::from(y) << COORD_BITS) | u32::from(x),
        ))
    }

    /// Packs the surface of the column at `(x, y)` whose top height is `top`.
    ///
    /// A column with top 0 is packed at height 1.
    pub fn at_surface(x: usize, y: usize, top: u8) -> Self {
        debug_assert!(x <= MAX_COORD as usize && y <= MAX_COORD as usize);
        let x = (x as u32) & COORD_MASK;
        let y = (y as u32) & COORD_MASK;
        let below = u32::from(top.max(1)) - 1;
        Self((below << HEIGHT_SHIFT) | (y << COORD_BITS) | x)
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn x(self) -> u16 {
        (self.0 & COORD_MASK) as u16
    }

    pub const fn y(self) -> u16 {
        ((self.0 >> COORD_BITS) & COORD_MASK) as u16
    }

    /// Surface height of the column; `(raw >> 20) + 1`.
    pub const fn height(self) -> u16 {
        ((self.0 >> HEIGHT_SHIFT) + 1) as u16
    }

    /// Squared distance between this placement's column and `(x, y)`.
    pub fn distance_sq(self, x: usize, y: usize) -> u64 {
        let dx = (self.x() as i64) - x as i64;
        let dy = (self.y() as i64) - y as i64;
        (dx * dx + dy * dy) as u64
    }

    pub fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for PackedPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_layout() {
        let p = PackedPlacement::new(3, 2, 1).unwrap();
        assert_eq!(p.raw(), (2 << 10) | 3);

        let p = PackedPlacement::new(1023, 1023, 255).unwrap();
        assert_eq!(p.raw(), (254 << 20) | (1023 << 10) | 1023);
    }

    #[test]
    fn test_round_trip_full_domain() {
        for h in 1..=255u8 {
            for &(x, y) in &[(0, 0), (1023, 0), (0, 1023), (1023, 1023), (517, 64), (1, 1022)] {
                let p = PackedPlacement::new(x, y, h).unwrap();
                assert_eq!((p.x(), p.y(), p.height()), (x, y, h as u16));
            }
        }
        for x in 0..1024u16 {
            let p = PackedPlacement::new(x, 1023 - x, 128).unwrap();
            assert_eq!((p.x(), p.y(), p.height()), (x, 1023 - x, 128));
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(PackedPlacement::new(1024, 0, 10).is_none());
        assert!(PackedPlacement::new(0, 1024, 10).is_none());
        assert!(PackedPlacement::new(5, 5, 0).is_none());
    }

    #[test]
    fn test_at_surface_matches_new() {
        let a = PackedPlacement::at_surface(40, 700, 180);
        let b = PackedPlacement::new(40, 700, 180).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_at_surface_clamps_zero_height() {
        let p = PackedPlacement::at_surface(9, 9, 0);
        assert_eq!(p.height(), 1);
        assert_eq!(p.raw() >> 20, 0);
    }

    #[test]
    fn test_distance_sq() {
        let p = PackedPlacement::new(10, 20, 5).unwrap();
        assert_eq!(p.distance_sq(13, 24), 25);
        assert_eq!(p.distance_sq(10, 20), 0);
    }

    #[test]
    fn test_display_is_decimal_raw() {
        let p = PackedPlacement::from_raw(1_234_567);
        assert_eq!(p.to_string(), "1234567");
    }
}
