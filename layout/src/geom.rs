use serde::Serialize;

pub const SQRT_2: f64 = 1.41421356237309514547462185874;
pub const SQRT_3: f64 = 1.73205080756887719317660412344;

/// A point in geometry space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rotation about the geometry-space origin, with the trig precomputed once.
#[derive(Clone, Copy, Debug)]
pub struct Rotation {
    sin: f64,
    cos: f64,
}

impl Rotation {
    pub fn new(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self { sin, cos }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            p.x * self.cos - p.y * self.sin,
            p.x * self.sin + p.y * self.cos,
        )
    }
}

/// Axis-aligned box enclosing every vertex of a geometry.
///
/// Invariant: `xmin <= xmax` and `ymin <= ymax`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl BoundingBox {
    pub fn at(p: Point) -> Self {
        Self {
            xmin: p.x,
            xmax: p.x,
            ymin: p.y,
            ymax: p.y,
        }
    }

    /// Grows the box so that it contains `p`.
    pub fn include(&mut self, p: Point) {
        self.xmin = self.xmin.min(p.x);
        self.xmax = self.xmax.max(p.x);
        self.ymin = self.ymin.min(p.y);
        self.ymax = self.ymax.max(p.y);
    }

    /// Minimal box over `points`, `None` when there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut it = points.into_iter();
        let mut bounds = Self::at(it.next()?);
        it.for_each(|p| bounds.include(p));
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.width() / self.height()
    }
}
