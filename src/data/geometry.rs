//! Integer rectangle shared by layout, hit testing and rendering.
//!
//! Coordinates are signed so centering math can go negative without
//! wrapping; frontends clip to their drawable area.

/// Axis-aligned rectangle in screen units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Inclusive on all four edges: `[x, x+w] × [y, y+h]`
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        self.x <= px && px <= self.x + self.w && self.y <= py && py <= self.y + self.h
    }

    /// Open-interval overlap on both axes; rects that only touch do not intersect
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Rect of size `(w, h)` centered inside `self` (integer division)
    pub const fn centered(&self, w: i32, h: i32) -> Rect {
        Rect {
            x: self.x + (self.w - w) / 2,
            y: self.y + (self.h - h) / 2,
            w,
            h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let r = Rect::new(10, 10, 5, 5);
        assert!(r.contains(10, 10));
        assert!(r.contains(15, 15));
        assert!(r.contains(12, 15));
        assert!(!r.contains(16, 12));
        assert!(!r.contains(9, 12));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let right = Rect::new(10, 0, 10, 10);
        let below = Rect::new(0, 10, 10, 10);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));

        let overlap = Rect::new(9, 9, 10, 10);
        assert!(a.intersects(&overlap));
        assert!(overlap.intersects(&a));
    }

    #[test]
    fn test_centered() {
        let outer = Rect::new(0, 0, 11, 7);
        assert_eq!(outer.centered(5, 3), Rect::new(3, 2, 5, 3));
    }
}
