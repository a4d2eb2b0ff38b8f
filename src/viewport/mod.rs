use serde::{Serialize, Deserialize};

use crate::geometry::{EpipolarLine, Point2D, point::Point};
use crate::{EpipolarError, Float, Result, LINE_EPSILON};

/**
 * Rectangle of the drawing surface one camera is rendered into.
 */
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Viewport {
    pub x_start: Float,
    pub x_end: Float,
    pub y_start: Float,
    pub y_end: Float
}

impl Viewport {
    pub fn new(x_start: Float, x_end: Float, y_start: Float, y_end: Float) -> Viewport {
        Viewport{x_start, x_end, y_start, y_end}
    }

    /// Left and right halves of a surface of the given size.
    pub fn split_horizontally(width: Float, height: Float) -> (Viewport, Viewport) {
        let half = width/2.0;
        (Viewport::new(0.0, half, 0.0, height), Viewport::new(half, width, 0.0, height))
    }

    pub fn width(&self) -> Float {
        self.x_end - self.x_start
    }

    pub fn height(&self) -> Float {
        self.y_end - self.y_start
    }

    pub fn clamp_y(&self, y: Float) -> Float {
        self.y_start.max(self.y_end.min(y))
    }
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Segment {
    pub start: Point2D,
    pub end: Point2D
}

impl Segment {
    pub fn new(start: Point2D, end: Point2D) -> Segment {
        Segment{start, end}
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }
}

/**
 * Maps a line into the viewport by evaluating it at the viewport's left and right borders.
 * The resulting y values are clamped to the viewport instead of clipping the line, so steep lines
 * end up bent onto the top/bottom edge. Lines with b ~ 0 are drawn vertically over the whole height.
 */
pub fn project(line: &EpipolarLine, viewport: &Viewport) -> Result<Segment> {
    let EpipolarLine{a,b,c} = *line;

    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        return Err(EpipolarError::DegenerateLine{a,b,c});
    }

    if b.abs() < LINE_EPSILON {
        if a.abs() < LINE_EPSILON {
            return Err(EpipolarError::DegenerateLine{a,b,c});
        }
        let x = -c/a;
        return Ok(Segment::new(Point::new(x, viewport.y_start), Point::new(x, viewport.y_end)));
    }

    let y_start = -(a*viewport.x_start + c)/b;
    let y_end = -(a*viewport.x_end + c)/b;

    Ok(Segment::new(
        Point::new(viewport.x_start, viewport.clamp_y(y_start)),
        Point::new(viewport.x_end, viewport.clamp_y(y_end))))
}
