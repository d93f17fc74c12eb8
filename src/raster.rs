//! Line rasterization.
//!
//! Points use bottom-up coordinates: `(0, 0)` is the bottom-left pixel.

/// Pixel coordinate `(x, y)`, origin at the bottom-left.
pub type Point = (u32, u32);

/// Points of a line between two endpoints, one per step along the major axis.
///
/// The endpoints are ordered along the major axis and the minor coordinate
/// advances by `step * minor_delta / major_delta`, truncated. Lines with
/// `dx == dy` (including single points) are walked along x.
#[derive(Debug, Clone)]
pub struct LinePoints {
    origin: (i64, i64),
    major: i64,
    minor: i64,
    sign: i64,
    steep: bool,
    step: i64,
}

/// Rasterize the line from `from` to `to`, both endpoints included.
pub fn line_points(from: Point, to: Point) -> LinePoints {
    let (mut x1, mut y1) = (i64::from(from.0), i64::from(from.1));
    let (mut x2, mut y2) = (i64::from(to.0), i64::from(to.1));
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let steep = dx < dy;

    if (!steep && x1 > x2) || (steep && y1 > y2) {
        std::mem::swap(&mut x1, &mut x2);
        std::mem::swap(&mut y1, &mut y2);
    }

    let (major, minor, sign) = if steep {
        (dy, dx, (x2 - x1).signum())
    } else {
        (dx, dy, (y2 - y1).signum())
    };

    LinePoints {
        origin: (x1, y1),
        major,
        minor,
        sign,
        steep,
        step: 0,
    }
}

/// The two diagonals of the box spanned by `a` and `b`.
pub fn cross_lines(a: Point, b: Point) -> [(Point, Point); 2] {
    [(a, b), ((a.0, b.1), (b.0, a.1))]
}

impl Iterator for LinePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.step > self.major {
            return None;
        }
        let shift = if self.major == 0 {
            0
        } else {
            self.step * self.minor / self.major
        };
        let (x, y) = if self.steep {
            (self.origin.0 + self.sign * shift, self.origin.1 + self.step)
        } else {
            (self.origin.0 + self.step, self.origin.1 + self.sign * shift)
        };
        self.step += 1;
        // Every point lies between the two u32 endpoints.
        Some((x as u32, y as u32))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.major + 1 - self.step).max(0) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for LinePoints {}
