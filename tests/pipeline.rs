extern crate nalgebra as na;

use approx::assert_relative_eq;
use na::Matrix3;
use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;

use epipolar_view::{EpipolarError, Float, RuntimeConfig};
use epipolar_view::color::ColorAllocator;
use epipolar_view::geometry::{EpipolarLine, FundamentalMatrix, point::Point};
use epipolar_view::pipeline::{Correspondence, FramePipeline, ImageSide};
use epipolar_view::viewport::{Viewport, project};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn reference_pipeline(seed: u64) -> FramePipeline<SmallRng> {
    let conf = RuntimeConfig::default();
    FramePipeline::new(conf.fundamental().unwrap(), conf.left_viewport, conf.right_viewport, ColorAllocator::seeded(seed))
}

#[test]
fn reference_point_end_to_end() {
    init_logging();
    let mut pipeline = reference_pipeline(1);
    let output = pipeline.process_frame(&[Correspondence::new(Point::new(100.0, 100.0), Point::new(100.0, 100.0))]);

    let right = output.segments.iter().find(|s| s.side == ImageSide::Right).unwrap();
    assert_eq!(right.segment.start.x, 400.0);
    assert_eq!(right.segment.end.x, 800.0);
    assert_relative_eq!(right.segment.start.y, 213.3333, epsilon = 1e-3);
    assert_relative_eq!(right.segment.end.y, 453.3333, epsilon = 1e-3);
}

#[test]
fn epipole_correspondence_is_skipped_without_affecting_others() {
    init_logging();
    let mut pipeline = reference_pipeline(2);
    // (50,5) in the right image maps to a = b = 0 under F^T
    let correspondences = vec![
        Correspondence::new(Point::new(100.0, 100.0), Point::new(120.0, 90.0)),
        Correspondence::new(Point::new(300.0, 200.0), Point::new(50.0, 5.0)),
        Correspondence::new(Point::new(200.0, 50.0), Point::new(210.0, 60.0))
    ];
    let output = pipeline.process_frame(&correspondences);

    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.skipped[0].index, 1);
    assert!(matches!(output.skipped[0].error, EpipolarError::DegenerateLine{..}));
    assert_eq!(output.segments.len(), 4);

    let mut reference = reference_pipeline(2);
    let without_bad = reference.process_frame(&[correspondences[0], correspondences[2]]);
    let segments = output.segments.iter().map(|s| s.segment).collect::<Vec<_>>();
    let expected = without_bad.segments.iter().map(|s| s.segment).collect::<Vec<_>>();
    assert_eq!(segments, expected);
}

#[test]
fn repeated_frames_give_identical_segments() {
    let correspondences = (0..50).map(|i| {
        let v = i as Float;
        Correspondence::new(Point::new(3.0*v, 2.0*v + 1.0), Point::new(3.0*v + 5.0, 2.0*v))
    }).collect::<Vec<Correspondence>>();

    let mut pipeline = reference_pipeline(3);
    let first = pipeline.process_frame(&correspondences);
    let second = pipeline.process_frame(&correspondences);
    let mut other_colors = reference_pipeline(99);
    let third = other_colors.process_frame(&correspondences);

    let endpoints = |o: &epipolar_view::pipeline::FrameOutput| o.segments.iter().map(|s| s.segment).collect::<Vec<_>>();
    assert_eq!(endpoints(&first), endpoints(&second));
    assert_eq!(endpoints(&first), endpoints(&third));
}

#[test]
fn projected_endpoints_lie_on_line_or_edge() {
    let mut rng = SmallRng::seed_from_u64(0x0DDB1A5ECBAD5EED);
    let viewport = Viewport::new(400.0, 800.0, 0.0, 600.0);

    for _ in 0..500 {
        let line = EpipolarLine::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-500.0..500.0));
        if line.b.abs() < epipolar_view::LINE_EPSILON {
            continue;
        }
        let segment = project(&line, &viewport).unwrap();
        for (x, y) in [(segment.start.x, segment.start.y), (segment.end.x, segment.end.y)].iter() {
            let unclamped = -(line.a*x + line.c)/line.b;
            if unclamped >= viewport.y_start && unclamped <= viewport.y_end {
                assert_relative_eq!(line.evaluate(*x, *y), 0.0, epsilon = 1e-9);
            } else {
                assert!(*y == viewport.y_start || *y == viewport.y_end);
            }
        }
        assert_eq!(segment.start.x, viewport.x_start);
        assert_eq!(segment.end.x, viewport.x_end);
    }
}

#[test]
fn vertical_lines_in_both_views() {
    // right line x = 700 - x_left, left line x = 700 - x_right
    let f = FundamentalMatrix::new(Matrix3::new(
        0.0, 0.0, 1.0,
        0.0, 0.0, 0.0,
        1.0, 0.0, -700.0));
    let (left, right) = Viewport::split_horizontally(800.0, 600.0);
    let mut pipeline = FramePipeline::with_seed(f, left, right, Some(5));

    let output = pipeline.process_frame(&[Correspondence::new(Point::new(10.0, 20.0), Point::new(400.0, 40.0))]);
    assert_eq!(output.segments.len(), 2);

    let left_segment = output.segments[0].segment;
    let right_segment = output.segments[1].segment;
    assert!(left_segment.is_vertical() && right_segment.is_vertical());
    assert_eq!(left_segment.start.x, 300.0);
    assert_eq!(right_segment.start.x, 690.0);
    assert_eq!((right_segment.start.y, right_segment.end.y), (0.0, 600.0));
    assert_eq!((left_segment.start.y, left_segment.end.y), (0.0, 600.0));
}

#[test]
fn non_finite_correspondence_is_skipped() {
    init_logging();
    let mut pipeline = reference_pipeline(4);
    let correspondences = vec![
        Correspondence::new(Point::new(Float::NAN, 1.0), Point::new(1.0, Float::INFINITY)),
        Correspondence::new(Point::new(100.0, 100.0), Point::new(120.0, 90.0))
    ];
    let output = pipeline.process_frame(&correspondences);

    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.skipped[0].index, 0);
    assert!(matches!(output.skipped[0].error, EpipolarError::DegenerateLine{..}));
    assert_eq!(output.segments.len(), 2);
    assert!(output.segments.iter().all(|s| s.segment.start.y.is_finite() && s.segment.end.y.is_finite()));
}
