//! Integer axis-aligned boxes for the character and power-ups.
//!
//! Everything on screen is a square of `sprite_size` pixels addressed by its
//! top-left corner, so overlap tests and bounds clamping stay in exact integer
//! arithmetic. Boxes that only share an edge do not overlap.

use glam::IVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aabb {
    pub min: IVec2,
    pub size: IVec2,
}

impl Aabb {
    pub fn new(min: IVec2, size: IVec2) -> Self {
        Self { min, size }
    }

    pub fn left(&self) -> i32 {
        self.min.x
    }

    pub fn top(&self) -> i32 {
        self.min.y
    }

    pub fn right(&self) -> i32 {
        self.min.x + self.size.x
    }

    pub fn bottom(&self) -> i32 {
        self.min.y + self.size.y
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.right() <= other.left()
            || self.left() >= other.right()
            || self.bottom() <= other.top()
            || self.top() >= other.bottom())
    }
}

/// Legal range for a box's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: IVec2,
    pub max: IVec2,
}

impl Bounds {
    pub fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// Plain min/max clamp: no bounce, no velocity response.
    pub fn clamp(&self, point: IVec2) -> IVec2 {
        point.clamp(self.min, self.max)
    }

    pub fn contains(&self, point: IVec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: i32, y: i32) -> Aabb {
        Aabb::new(IVec2::new(x, y), IVec2::splat(64))
    }

    #[test]
    fn identical_boxes_intersect() {
        assert!(square(100, 100).intersects(&square(100, 100)));
    }

    #[test]
    fn partial_overlap_intersects() {
        assert!(square(100, 100).intersects(&square(163, 163)));
        assert!(square(100, 100).intersects(&square(37, 120)));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        assert!(!square(100, 100).intersects(&square(164, 100)));
        assert!(!square(100, 100).intersects(&square(100, 36)));
    }

    #[test]
    fn far_apart_boxes_do_not_intersect() {
        assert!(!square(0, 0).intersects(&square(300, 300)));
    }

    #[test]
    fn intersection_is_symmetric() {
        let a = square(10, 20);
        let b = square(50, 70);
        assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn clamp_pins_to_edges() {
        let bounds = Bounds::new(IVec2::ZERO, IVec2::new(448, 448));
        assert_eq!(bounds.clamp(IVec2::new(452, -4)), IVec2::new(448, 0));
        assert_eq!(bounds.clamp(IVec2::new(200, 300)), IVec2::new(200, 300));
    }

    #[test]
    fn contains_is_inclusive() {
        let bounds = Bounds::new(IVec2::ZERO, IVec2::new(448, 448));
        assert!(bounds.contains(IVec2::new(448, 0)));
        assert!(!bounds.contains(IVec2::new(449, 0)));
        assert!(!bounds.contains(IVec2::new(0, -1)));
    }
}
