use std::fmt;

use super::{Axis, Expanse, Point};
use crate::{Error, Result};

/// A rectangle on the grid.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Rect {
    /// Construct a rectangle from its top-left corner and size.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// The size of this rectangle.
    pub fn expanse(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// True if the rectangle covers no cells.
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Does this rectangle contain the point?
    pub fn contains_point(&self, p: Point) -> bool {
        if p.x < self.tl.x || p.x >= self.tl.x.saturating_add(self.w) {
            false
        } else {
            !(p.y < self.tl.y || p.y >= self.tl.y.saturating_add(self.h))
        }
    }

    /// Does this rectangle completely enclose the other? Empty rectangles are
    /// enclosed by any rectangle whose bounds they fall within.
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.tl.x >= self.tl.x
            && other.tl.y >= self.tl.y
            && other.tl.x.saturating_add(other.w) <= self.tl.x.saturating_add(self.w)
            && other.tl.y.saturating_add(other.h) <= self.tl.y.saturating_add(self.h)
    }

    /// Translate a screen point into this rectangle's local space, where the
    /// top-left cell is (1, 1). Points outside the rectangle are an error.
    pub fn local_point(&self, pt: Point) -> Result<Point> {
        self.localize(pt)
            .ok_or_else(|| Error::Geometry(format!("{pt} outside rectangle {self}")))
    }

    /// Like [`Rect::local_point`], for hit tests where a miss is expected.
    pub fn localize(&self, pt: Point) -> Option<Point> {
        self.contains_point(pt).then(|| Point {
            x: pt.x - self.tl.x + 1,
            y: pt.y - self.tl.y + 1,
        })
    }

    /// Shrink the rectangle by `border` cells on every side. A border that
    /// consumes the whole rectangle yields an empty rectangle at the centre.
    pub fn inset(&self, border: u32) -> Self {
        let dw = border.saturating_mul(2).min(self.w);
        let dh = border.saturating_mul(2).min(self.h);
        Self {
            tl: Point {
                x: self.tl.x.saturating_add(dw / 2),
                y: self.tl.y.saturating_add(dh / 2),
            },
            w: self.w - dw,
            h: self.h - dh,
        }
    }

    /// Clamp this rectangle so that it lies within `outer`.
    pub fn clamp_within(&self, outer: &Self) -> Self {
        let x = self
            .tl
            .x
            .clamp(outer.tl.x, outer.tl.x.saturating_add(outer.w));
        let y = self
            .tl
            .y
            .clamp(outer.tl.y, outer.tl.y.saturating_add(outer.h));
        let right = self
            .tl
            .x
            .saturating_add(self.w)
            .min(outer.tl.x.saturating_add(outer.w));
        let bottom = self
            .tl
            .y
            .saturating_add(self.h)
            .min(outer.tl.y.saturating_add(outer.h));
        Self {
            tl: Point { x, y },
            w: right.saturating_sub(x),
            h: bottom.saturating_sub(y),
        }
    }

    /// Extent along an axis.
    pub fn along(&self, axis: Axis) -> u32 {
        self.expanse().along(axis)
    }

    /// Build a sub-rectangle from offsets and extents expressed on a main axis
    /// and its cross axis, relative to this rectangle's origin.
    pub fn sub_main_cross(
        &self,
        axis: Axis,
        main_offset: u32,
        cross_offset: u32,
        main: u32,
        cross: u32,
    ) -> Self {
        match axis {
            Axis::Horizontal => Self::new(
                self.tl.x.saturating_add(main_offset),
                self.tl.y.saturating_add(cross_offset),
                main,
                cross,
            ),
            Axis::Vertical => Self::new(
                self.tl.x.saturating_add(cross_offset),
                self.tl.y.saturating_add(main_offset),
                cross,
                main,
            ),
        }
    }
}

impl From<Expanse> for Rect {
    fn from(e: Expanse) -> Self {
        e.rect()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{} {}x{}", self.tl.x, self.tl.y, self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn contains_point() -> Result<()> {
        let r = Rect::new(1, 1, 10, 3);
        assert!(r.contains_point(Point::new(1, 1)));
        assert!(r.contains_point(Point::new(10, 3)));
        assert!(!r.contains_point(Point::new(11, 3)));
        assert!(!r.contains_point(Point::new(10, 4)));
        assert!(!r.contains_point(Point::zero()));
        assert!(!Rect::new(5, 5, 0, 3).contains_point(Point::new(5, 5)));
        Ok(())
    }

    #[test]
    fn local_point_is_one_based() -> Result<()> {
        let r = Rect::new(12, 1, 5, 3);
        assert_eq!(r.local_point(Point::new(12, 1))?, Point::new(1, 1));
        assert_eq!(r.local_point(Point::new(16, 3))?, Point::new(5, 3));
        assert!(r.local_point(Point::new(5, 2)).is_err());
        assert_eq!(r.localize(Point::new(13, 2)), Some(Point::new(2, 2)));
        assert_eq!(r.localize(Point::new(17, 1)), None);
        Ok(())
    }

    #[test]
    fn inset() {
        assert_eq!(Rect::new(1, 1, 10, 5).inset(1), Rect::new(2, 2, 8, 3));
        assert_eq!(Rect::new(1, 1, 10, 5).inset(0), Rect::new(1, 1, 10, 5));
        let tiny = Rect::new(1, 1, 3, 1).inset(1);
        assert_eq!(tiny.h, 0);
        assert_eq!(tiny.w, 1);
    }

    #[test]
    fn clamp_within() {
        let outer = Rect::new(1, 1, 10, 10);
        assert_eq!(Rect::new(5, 5, 10, 2).clamp_within(&outer), Rect::new(5, 5, 6, 2));
        assert_eq!(Rect::new(20, 1, 4, 4).clamp_within(&outer), Rect::new(11, 1, 0, 4));
    }

    #[test]
    fn sub_main_cross() {
        let r = Rect::new(3, 4, 20, 10);
        assert_eq!(
            r.sub_main_cross(Axis::Horizontal, 2, 1, 5, 3),
            Rect::new(5, 5, 5, 3)
        );
        assert_eq!(
            r.sub_main_cross(Axis::Vertical, 2, 1, 5, 3),
            Rect::new(4, 6, 3, 5)
        );
    }

    proptest! {
        #[test]
        fn clamped_rects_are_contained(
            x in 0u32..50, y in 0u32..50, w in 0u32..50, h in 0u32..50,
            ox in 1u32..20, oy in 1u32..20, ow in 0u32..30, oh in 0u32..30,
        ) {
            let outer = Rect::new(ox, oy, ow, oh);
            let clamped = Rect::new(x, y, w, h).clamp_within(&outer);
            prop_assert!(outer.contains_rect(&clamped));
        }

        #[test]
        fn local_point_round_trips(
            x in 1u32..40, y in 1u32..40, w in 1u32..40, h in 1u32..40,
            dx in 0u32..40, dy in 0u32..40,
        ) {
            let r = Rect::new(x, y, w, h);
            let p = Point::new(x + dx % w, y + dy % h);
            let local = r.local_point(p).unwrap();
            prop_assert!(local.x >= 1 && local.x <= w);
            prop_assert!(local.y >= 1 && local.y <= h);
            prop_assert_eq!(local.x + x - 1, p.x);
        }
    }
}
