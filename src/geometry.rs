//! Region: a rectangle of terminal cells.
//!
//! Widgets render into a region; the container carves the banner row out of
//! its own region with [`Region::split_horizontal`] and [`Region::inset_x`].

/// A rectangular region in terminal cells defined by position and size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// Whether the region covers no cells.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the point (x, y) lies inside this region.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Split horizontally at `offset` cells from the top edge.
    ///
    /// Returns `(top, bottom)`. The offset is clamped to `[0, height]`.
    #[inline]
    pub const fn split_horizontal(self, offset: i32) -> (Region, Region) {
        let clamped = if offset < 0 {
            0
        } else if offset > self.height {
            self.height
        } else {
            offset
        };
        let top = Region { x: self.x, y: self.y, width: self.width, height: clamped };
        let bottom = Region {
            x: self.x,
            y: self.y + clamped,
            width: self.width,
            height: self.height - clamped,
        };
        (top, bottom)
    }

    /// Shrink by `margin` cells on the left and right. Width clamps to zero.
    #[inline]
    pub const fn inset_x(self, margin: i32) -> Region {
        let w = self.width - 2 * margin;
        Region {
            x: self.x + margin,
            y: self.y,
            width: if w > 0 { w } else { 0 },
            height: self.height,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_new_and_empty() {
        let r = Region::new(1, 2, 3, 4);
        assert_eq!((r.x, r.y, r.width, r.height), (1, 2, 3, 4));
        assert!(Region::EMPTY.is_empty());
        assert!(Region::new(0, 0, 5, 0).is_empty());
        assert!(!r.is_empty());
    }

    #[test]
    fn region_right_bottom() {
        let r = Region::new(10, 20, 30, 40);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 60);
    }

    #[test]
    fn region_contains_point() {
        let r = Region::new(0, 0, 10, 5);
        assert!(r.contains(0, 0));
        assert!(r.contains(9, 4));
        assert!(!r.contains(10, 4));
        assert!(!r.contains(-1, 0));
    }

    #[test]
    fn split_horizontal_takes_top_rows() {
        let (top, bottom) = Region::new(0, 0, 20, 5).split_horizontal(1);
        assert_eq!(top, Region::new(0, 0, 20, 1));
        assert_eq!(bottom, Region::new(0, 1, 20, 4));
    }

    #[test]
    fn split_horizontal_clamps() {
        let r = Region::new(0, 0, 20, 2);
        assert_eq!(r.split_horizontal(5).0, r);
        assert_eq!(r.split_horizontal(-1).0.height, 0);
    }

    #[test]
    fn inset_x_shrinks_both_sides() {
        assert_eq!(Region::new(0, 0, 20, 1).inset_x(1), Region::new(1, 0, 18, 1));
        assert_eq!(Region::new(0, 0, 1, 1).inset_x(1).width, 0);
    }
}
