//! Rectangle operations for partial windows on the panel
use core::cmp;

/// A rectangle
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Rect {
    /// Origin X
    pub x: u32,
    /// Origin Y
    pub y: u32,
    /// Width
    pub w: u32,
    /// Height
    pub h: u32,
}

impl Rect {
    /// Construct a new rectangle
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Rect {
        Rect { x, y, w, h }
    }
    /// Compute intersection with another rectangle
    pub fn intersect(&self, other: Rect) -> Rect {
        let x = cmp::max(self.x, other.x);
        let y = cmp::max(self.y, other.y);
        let w = cmp::min(self.x + self.w, other.x + other.w).saturating_sub(x);
        let h = cmp::min(self.y + self.h, other.y + other.h).saturating_sub(y);
        Rect { x, y, w, h }
    }
    /// Test whether `other` lies completely inside of this rectangle.
    pub fn contains(&self, other: Rect) -> bool {
        !other.is_empty() && self.intersect(other) == other
    }
    /// Test whether the rectangle is empty.
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
    /// Vertical position and extent fall on byte boundaries of a packed column
    pub fn is_byte_aligned(&self) -> bool {
        self.y % 8 == 0 && self.h % 8 == 0
    }
}

#[test]
fn test_intersect() {
    let r1 = Rect::new(0, 0, 10, 10);
    let r2 = Rect::new(6, 3, 10, 10);
    let r3 = r1.intersect(r2);
    assert!(matches!(
        r3,
        Rect {
            x: 6,
            y: 3,
            w: 4,
            h: 7
        }
    ));

    let r1 = Rect::new(0, 0, 10, 10);
    let r2 = Rect::new(20, 20, 10, 10);
    assert!(r1.intersect(r2).is_empty());
}

#[test]
fn test_contains() {
    let panel = Rect::new(0, 0, 264, 176);
    assert!(panel.contains(Rect::new(0, 0, 264, 176)));
    assert!(panel.contains(Rect::new(100, 16, 64, 32)));
    assert!(!panel.contains(Rect::new(250, 0, 20, 8)));
    assert!(!panel.contains(Rect::new(0, 0, 0, 8)));
}

#[test]
fn test_alignment() {
    assert!(Rect::new(3, 16, 5, 24).is_byte_aligned());
    assert!(!Rect::new(0, 4, 8, 8).is_byte_aligned());
    assert!(!Rect::new(0, 8, 8, 12).is_byte_aligned());
}
