//! Axis-aligned bounding boxes and the overlap test every interaction uses.

/// A rectangle in world pixels, `(x, y)` being the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Anything that occupies a box in the world.
pub trait Bounds {
    fn rect(&self) -> Rect;
}

impl Bounds for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}

/// True iff the two boxes intersect.  Touching edges do not count, and a
/// zero-area box never overlaps anything.
pub fn overlaps(a: &impl Bounds, b: &impl Bounds) -> bool {
    let a = a.rect();
    let b = b.rect();
    if a.is_degenerate() || b.is_degenerate() {
        return false;
    }
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}
