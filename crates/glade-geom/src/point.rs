use std::fmt;

/// A cell position on the grid.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct Point {
    /// Column, 1-based.
    pub x: u32,
    /// Row, 1-based.
    pub y: u32,
}

impl Point {
    /// Construct a point.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The (0, 0) point, which lies outside every grid rectangle.
    pub fn zero() -> Self {
        (0, 0).into()
    }

    /// Is this the (0, 0) point?
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl From<(u32, u32)> for Point {
    #[inline]
    fn from(v: (u32, u32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_off_grid() {
        assert!(Point::zero().is_zero());
        assert!(!Point::new(1, 1).is_zero());
        assert_eq!(Point::from((3, 4)).to_string(), "(3, 4)");
    }
}
