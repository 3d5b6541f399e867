//! Screen geometry: points, selection rectangles and the capture square used
//! by word mode.
//!
//! All coordinates are screen pixels with the origin at the top-left and `y`
//! growing downward.

/// A screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A rectangular selection `[x1, x2) × [y1, y2)`.
///
/// [`Rect::from_corners`] orders the coordinates; [`Rect::new`] keeps them
/// as given so a malformed rectangle can still reach the capture stage and be
/// rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a rectangle from two arbitrary corners.
    ///
    /// ```
    /// use screen_translate::geometry::{Point, Rect};
    ///
    /// let r = Rect::from_corners(Point::new(40, 5), Point::new(10, 30));
    /// assert_eq!(r, Rect::new(10, 5, 40, 30));
    /// ```
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// `true` when the rectangle encloses at least one pixel.
    pub fn is_valid(&self) -> bool {
        self.x2 > self.x1 && self.y2 > self.y1
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Overlap with `other`, or `None` when they share no pixel.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let r = Rect::new(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        );
        r.is_valid().then_some(r)
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}]-[{},{}]", self.x1, self.y1, self.x2, self.y2)
    }
}

/// The square of side `size` centred on `cursor`, with its top-left corner
/// clamped to the screen origin. The bottom/right edges are left unclamped.
///
/// ```
/// use screen_translate::geometry::{capture_square, Point, Rect};
///
/// assert_eq!(capture_square(Point::new(500, 500), 400), Rect::new(300, 300, 700, 700));
/// assert_eq!(capture_square(Point::new(50, 50), 400), Rect::new(0, 0, 400, 400));
/// ```
pub fn capture_square(cursor: Point, size: i32) -> Rect {
    let half = size / 2;
    let x1 = (cursor.x - half).max(0);
    let y1 = (cursor.y - half).max(0);
    Rect::new(x1, y1, x1 + size, y1 + size)
}
