extern crate image as image_rs;

use image_rs::{Rgb, RgbImage};
use plotters::prelude::*;

use crate::features::KeyPoint;
use crate::matching::Match;
use crate::pipeline::ColoredSegment;
use crate::{EpipolarError, Float, Result};

const MATCH_SQUARE_HALF_SIDE: i32 = 3;

fn render_error<E: std::fmt::Debug>(error: E) -> EpipolarError {
    EpipolarError::Render(format!("{:?}", error))
}

fn to_pixel(x: Float, y: Float) -> (i32,i32) {
    (x.round() as i32, y.round() as i32)
}

/// RGB byte count of a width x height surface, computed in usize so large surfaces do not wrap.
fn surface_buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

fn style(r: u8, g: u8, b: u8, stroke_width: u32) -> ShapeStyle {
    ShapeStyle{color: RGBAColor(r, g, b, 1.0), filled: false, stroke_width}
}

/**
 * White surface with every segment drawn as a line of the given stroke width.
 */
pub fn render_segments(segments: &[ColoredSegment], width: u32, height: u32, stroke_width: u32) -> Result<RgbImage> {
    let mut buffer = vec![0u8; surface_buffer_len(width, height)];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;
        for colored in segments {
            let start = to_pixel(colored.segment.start.x, colored.segment.start.y);
            let end = to_pixel(colored.segment.end.x, colored.segment.end.y);
            let c = colored.color;
            root.draw(&PathElement::new(vec![start, end], style(c.r, c.g, c.b, stroke_width))).map_err(render_error)?;
        }
        root.present().map_err(render_error)?;
    }
    RgbImage::from_raw(width, height, buffer).ok_or_else(|| EpipolarError::Render("surface buffer has wrong size".to_string()))
}

/// Both frames next to each other, the shorter one padded with white.
pub fn side_by_side(image_a: &RgbImage, image_b: &RgbImage) -> RgbImage {
    let width = image_a.width() + image_b.width();
    let height = image_a.height().max(image_b.height());
    let mut target_image = RgbImage::from_pixel(width, height, Rgb([255,255,255]));

    for (x, y, pixel) in image_a.enumerate_pixels() {
        target_image.put_pixel(x, y, *pixel);
    }
    for (x, y, pixel) in image_b.enumerate_pixels() {
        target_image.put_pixel(x + image_a.width(), y, *pixel);
    }

    target_image
}

/**
 * Debug view of the matcher: squares on both keypoints of every match, joined by a line.
 * Panics if a match indexes outside features_a / features_b, so matches must come from these two keypoint sets.
 */
pub fn display_matches(image_a: &RgbImage, image_b: &RgbImage, features_a: &[KeyPoint], features_b: &[KeyPoint], matches: &[Match]) -> Result<RgbImage> {
    let target_image = side_by_side(image_a, image_b);
    let (width, height) = target_image.dimensions();
    let offset = image_a.width() as Float;
    let mut buffer = target_image.into_raw();
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        for m in matches {
            let feature_a = &features_a[m.left_index];
            let feature_b = &features_b[m.right_index];

            let a = to_pixel(feature_a.location.x, feature_a.location.y);
            let b = to_pixel(offset + feature_b.location.x, feature_b.location.y);

            for (x, y) in [a, b].iter() {
                root.draw(&Rectangle::new([(x - MATCH_SQUARE_HALF_SIDE, y - MATCH_SQUARE_HALF_SIDE), (x + MATCH_SQUARE_HALF_SIDE, y + MATCH_SQUARE_HALF_SIDE)], style(0, 255, 0, 1))).map_err(render_error)?;
            }
            root.draw(&PathElement::new(vec![a, b], style(255, 0, 0, 1))).map_err(render_error)?;
        }
        root.present().map_err(render_error)?;
    }
    RgbImage::from_raw(width, height, buffer).ok_or_else(|| EpipolarError::Render("match buffer has wrong size".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::features::bit_vector::BitVector;
    use crate::geometry::point::Point;
    use crate::pipeline::ImageSide;
    use crate::viewport::Segment;

    #[test]
    fn horizontal_segment_is_drawn() {
        let segment = ColoredSegment{
            segment: Segment::new(Point::new(10.0, 20.0), Point::new(90.0, 20.0)),
            color: Color::new(200, 10, 30),
            side: ImageSide::Left
        };
        let image = render_segments(&[segment], 100, 50, 3).unwrap();
        assert_eq!(image.dimensions(), (100, 50));
        assert_eq!(*image.get_pixel(50, 20), Rgb([200, 10, 30]));
        assert_eq!(*image.get_pixel(50, 40), Rgb([255, 255, 255]));
    }

    #[test]
    fn buffer_len_does_not_wrap() {
        assert_eq!(surface_buffer_len(800, 600), 1_440_000);
        assert_eq!(surface_buffer_len(70_000, 70_000), 14_700_000_000);
    }

    #[test]
    fn side_by_side_pads() {
        let a = RgbImage::from_pixel(3, 2, Rgb([1,1,1]));
        let b = RgbImage::from_pixel(4, 5, Rgb([2,2,2]));
        let composed = side_by_side(&a, &b);
        assert_eq!(composed.dimensions(), (7, 5));
        assert_eq!(*composed.get_pixel(0, 0), Rgb([1,1,1]));
        assert_eq!(*composed.get_pixel(0, 4), Rgb([255,255,255]));
        assert_eq!(*composed.get_pixel(3, 4), Rgb([2,2,2]));
    }

    #[test]
    fn matches_are_marked() {
        let a = RgbImage::from_pixel(40, 40, Rgb([0,0,0]));
        let b = RgbImage::from_pixel(40, 40, Rgb([0,0,0]));
        let kp = KeyPoint::new(Point::new(20.0, 20.0), BitVector::new(256));
        let matches = vec![Match{left_index: 0, right_index: 0, distance: 0}];
        let image = display_matches(&a, &b, &[kp.clone()], &[kp], &matches).unwrap();
        assert_eq!(image.dimensions(), (80, 40));
        assert_eq!(*image.get_pixel(40, 20), Rgb([255, 0, 0]));
    }
}
