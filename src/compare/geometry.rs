//! Planar points, segments and segment intersection.

use serde::{Deserialize, Serialize};

/// A point on a curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

impl CurvePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn sub(self, other: CurvePoint) -> CurvePoint {
        CurvePoint::new(self.x - other.x, self.y - other.y)
    }

    fn cross(self, other: CurvePoint) -> f64 {
        self.x * other.y - self.y * other.x
    }
}

/// Closed line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: CurvePoint,
    pub end: CurvePoint,
}

impl Segment {
    pub fn new(start: CurvePoint, end: CurvePoint) -> Self {
        Self { start, end }
    }

    fn direction(&self) -> CurvePoint {
        self.end.sub(self.start)
    }

    fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Parameter of `p` along the segment, assuming `p` is collinear
    fn project(&self, p: CurvePoint) -> f64 {
        let d = self.direction();
        let length2 = d.x * d.x + d.y * d.y;
        if length2 == 0.0 {
            return 0.0;
        }
        let v = p.sub(self.start);
        (v.x * d.x + v.y * d.y) / length2
    }

    fn point_at(&self, t: f64) -> CurvePoint {
        let d = self.direction();
        CurvePoint::new(self.start.x + t * d.x, self.start.y + t * d.y)
    }
}

/// Result of intersecting two segments
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    NoIntersection,
    Point(CurvePoint),
    /// The segments overlap along a stretch of positive length
    Coincident,
}

/// Intersect two closed segments
pub fn intersect(a: &Segment, b: &Segment) -> Intersection {
    let r = a.direction();
    let s = b.direction();
    let offset = b.start.sub(a.start);
    let denom = r.cross(s);

    if denom != 0.0 {
        let t = offset.cross(s) / denom;
        let u = offset.cross(r) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            return Intersection::Point(a.point_at(t));
        }
        return Intersection::NoIntersection;
    }

    // Parallel: only collinear segments can meet
    if offset.cross(r) != 0.0 || offset.cross(s) != 0.0 {
        return Intersection::NoIntersection;
    }

    if a.is_point() && b.is_point() {
        return if a.start == b.start {
            Intersection::Point(a.start)
        } else {
            Intersection::NoIntersection
        };
    }

    // Collinear: project the shorter-or-degenerate one onto the other
    let (base, other) = if a.is_point() { (b, a) } else { (a, b) };
    let t0 = base.project(other.start);
    let t1 = base.project(other.end);
    let lo = t0.min(t1).max(0.0);
    let hi = t0.max(t1).min(1.0);

    if lo > hi {
        Intersection::NoIntersection
    } else if lo == hi {
        Intersection::Point(base.point_at(lo))
    } else {
        Intersection::Coincident
    }
}
