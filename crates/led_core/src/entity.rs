//! Entities placed on an entity layer

use crate::{Point, RectI};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A placed entity: its world-space bounds and an origin marker relative to them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entity {
    pub bounds: RectI,
    pub origin: Point,
}

impl Entity {
    pub fn new(bounds: RectI, origin: Point) -> Self {
        Self { bounds, origin }
    }

    /// Entity whose origin sits at the bottom-center of its bounds
    pub fn at(position: Point, size: Point) -> Self {
        Self {
            bounds: RectI::from_origin_size(position, size),
            origin: Point::new(size.x / 2, 0),
        }
    }

    /// World position of the origin marker
    pub fn origin_world(&self) -> Vec2 {
        (self.bounds.origin() + self.origin).as_vec2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_world() {
        let entity = Entity::at(Point::new(10, 20), Point::new(16, 32));
        assert_eq!(entity.origin, Point::new(8, 0));
        assert_eq!(entity.origin_world(), Vec2::new(18.0, 20.0));
    }
}
