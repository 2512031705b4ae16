use std::ops::{Add, Neg, Sub};

/// A signed pixel position.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl Point {
    /// Construct a new point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return the origin point.
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Return true when both coordinates are zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Clamp each coordinate independently into `[min, max]`. If a component
    /// of `max` is below the matching component of `min`, `min` wins.
    pub fn clamp_between(&self, min: Self, max: Self) -> Self {
        Self {
            x: self.x.min(max.x).max(min.x),
            y: self.y.min(max.y).max(min.y),
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
        }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_sub(other.x),
            y: self.y.saturating_sub(other.y),
        }
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: self.x.saturating_neg(),
            y: self.y.saturating_neg(),
        }
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from(v: (i32, i32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub() {
        assert_eq!(Point::zero() + (1, 1).into(), Point::new(1, 1));
        assert_eq!(Point::new(5, 3) - Point::new(2, 7), Point::new(3, -4));
        assert_eq!(-Point::new(2, -3), Point::new(-2, 3));
    }

    #[test]
    fn clamp_between() {
        let p = Point::new(-5, 50);
        assert_eq!(
            p.clamp_between(Point::zero(), Point::new(10, 10)),
            Point::new(0, 10)
        );
        // Inverted bounds resolve towards the minimum.
        assert_eq!(
            p.clamp_between(Point::new(20, 20), Point::new(10, 10)),
            Point::new(20, 20)
        );
    }
}
