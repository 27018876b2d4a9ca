//! Integer geometry primitives used for grid coordinates and pixel bounds

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// An integer point (grid coordinate or pixel offset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Floor a world-space position onto the integer pixel grid
    pub fn from_world(pos: Vec2) -> Self {
        Self {
            x: pos.x.floor() as i32,
            y: pos.y.floor() as i32,
        }
    }

    pub fn is(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }

    /// Integer division of both components (truncates toward zero)
    pub fn div(self, s: i32) -> Self {
        Self {
            x: self.x / s,
            y: self.y / s,
        }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, s: i32) -> Point {
        Point::new(self.x * s, self.y * s)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Integer rectangle with `(x, y)` at the bottom-left corner
///
/// Width and height are expected to be non-negative, but a rect that is
/// being dragged can temporarily invert. Use [`RectI::normalized`] to get
/// the equivalent rect with positive extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RectI {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl RectI {
    pub const ZERO: RectI = RectI {
        x: 0,
        y: 0,
        w: 0,
        h: 0,
    };

    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_origin_size(origin: Point, size: Point) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y
    }

    pub fn top(&self) -> i32 {
        self.y + self.h
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Point {
        Point::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_size(&mut self, w: i32, h: i32) {
        self.w = w;
        self.h = h;
    }

    /// Inclusive on all four edges
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }

    /// Point containment for a world-space position
    pub fn contains(&self, pos: Vec2) -> bool {
        let p = Point::from_world(pos);
        self.contains_point(p.x, p.y)
    }

    pub fn contains_rect(&self, other: &RectI) -> bool {
        self.left() <= other.left()
            && self.bottom() <= other.bottom()
            && self.right() >= other.right()
            && self.top() >= other.top()
    }

    /// Rects that only share an edge do not overlap
    pub fn overlaps(&self, other: &RectI) -> bool {
        self.left() < other.right()
            && self.bottom() < other.top()
            && self.right() > other.left()
            && self.top() > other.bottom()
    }

    pub fn is_inverted(&self) -> bool {
        self.w < 0 || self.h < 0
    }

    /// The same area with non-negative width and height
    pub fn normalized(&self) -> RectI {
        let mut rect = *self;
        if rect.w < 0 {
            rect.w = rect.w.saturating_neg();
            rect.x = rect.x.saturating_sub(rect.w);
        }
        if rect.h < 0 {
            rect.h = rect.h.saturating_neg();
            rect.y = rect.y.saturating_sub(rect.h);
        }
        rect
    }
}

impl fmt::Display for RectI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {} {}x{}]", self.x, self.y, self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(3, 4);
        let b = Point::new(1, -2);
        assert_eq!(a + b, Point::new(4, 2));
        assert_eq!(a - b, Point::new(2, 6));
        assert_eq!(a * 3, Point::new(9, 12));
        assert_eq!(Point::new(9, -9).div(2), Point::new(4, -4));
        // operands are untouched
        assert_eq!(a, Point::new(3, 4));
    }

    #[test]
    fn test_point_from_world_floors() {
        assert_eq!(Point::from_world(Vec2::new(1.9, -0.1)), Point::new(1, -1));
    }

    #[test]
    fn test_rect_edges() {
        let rect = RectI::new(10, 20, 30, 40);
        assert_eq!(rect.left(), 10);
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.bottom(), 20);
        assert_eq!(rect.top(), 60);
        assert_eq!(rect.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_contains_point_is_inclusive() {
        let rect = RectI::new(0, 0, 10, 10);
        assert!(rect.contains_point(0, 0));
        assert!(rect.contains_point(10, 10));
        assert!(rect.contains_point(5, 5));
        assert!(!rect.contains_point(11, 5));
        assert!(!rect.contains_point(5, -1));
    }

    #[test]
    fn test_contains_rect() {
        let outer = RectI::new(0, 0, 100, 100);
        assert!(outer.contains_rect(&RectI::new(10, 10, 20, 20)));
        assert!(outer.contains_rect(&outer));
        assert!(!outer.contains_rect(&RectI::new(90, 90, 20, 20)));
    }

    #[test]
    fn test_overlaps_excludes_shared_edges() {
        let a = RectI::new(0, 0, 10, 10);
        assert!(a.overlaps(&RectI::new(5, 5, 10, 10)));
        assert!(!a.overlaps(&RectI::new(10, 0, 10, 10)));
        assert!(!a.overlaps(&RectI::new(0, 10, 10, 10)));
    }

    #[test]
    fn test_normalized() {
        let rect = RectI::new(50, 50, -20, -10);
        assert!(rect.is_inverted());
        let fixed = rect.normalized();
        assert_eq!(fixed, RectI::new(30, 40, 20, 10));
        assert!(!fixed.is_inverted());
        assert_eq!(fixed.normalized(), fixed);
    }

    #[test]
    fn test_normalized_saturates() {
        let fixed = RectI::new(i32::MIN, 0, i32::MIN, -5).normalized();
        assert_eq!(fixed, RectI::new(i32::MIN, -5, i32::MAX, 5));
    }
}
