use log::{debug, warn};
use rand::Rng;
use rand::rngs::SmallRng;
use serde::{Serialize, Deserialize};

use crate::color::{Color, ColorAllocator};
use crate::geometry::{FundamentalMatrix, Point2D, line_in_left_image, line_in_right_image};
use crate::viewport::{Segment, Viewport, project};
use crate::{EpipolarError, Result};

/// Pair of keypoint locations believed to observe the same scene point.
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Correspondence {
    pub left: Point2D,
    pub right: Point2D
}

impl Correspondence {
    pub fn new(left: Point2D, right: Point2D) -> Correspondence {
        Correspondence{left, right}
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum ImageSide {
    Left,
    Right
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct ColoredSegment {
    pub segment: Segment,
    pub color: Color,
    pub side: ImageSide
}

#[derive(Debug)]
pub struct SkippedCorrespondence {
    pub index: usize,
    pub error: EpipolarError
}

#[derive(Debug)]
pub struct FrameOutput {
    /// Left then right segment per drawn correspondence, in correspondence order.
    pub segments: Vec<ColoredSegment>,
    pub skipped: Vec<SkippedCorrespondence>
}

impl FrameOutput {
    pub fn drawn_correspondences(&self) -> usize {
        self.segments.len()/2
    }
}

pub struct FramePipeline<R: Rng> {
    fundamental: FundamentalMatrix,
    left_viewport: Viewport,
    right_viewport: Viewport,
    colors: ColorAllocator<R>
}

impl FramePipeline<SmallRng> {
    /// Seeded colors when a seed is given, entropy otherwise.
    pub fn with_seed(fundamental: FundamentalMatrix, left_viewport: Viewport, right_viewport: Viewport, seed: Option<u64>) -> FramePipeline<SmallRng> {
        let colors = match seed {
            Some(s) => ColorAllocator::seeded(s),
            None => ColorAllocator::from_entropy()
        };
        FramePipeline::new(fundamental, left_viewport, right_viewport, colors)
    }
}

impl<R: Rng> FramePipeline<R> {
    pub fn new(fundamental: FundamentalMatrix, left_viewport: Viewport, right_viewport: Viewport, colors: ColorAllocator<R>) -> FramePipeline<R> {
        FramePipeline{fundamental, left_viewport, right_viewport, colors}
    }

    pub fn fundamental(&self) -> &FundamentalMatrix {&self.fundamental}
    pub fn left_viewport(&self) -> &Viewport {&self.left_viewport}
    pub fn right_viewport(&self) -> &Viewport {&self.right_viewport}

    /**
     * Both segments of one correspondence: the line in the left image comes from the right point and vice versa.
     */
    pub fn segments_for(&self, correspondence: &Correspondence) -> Result<(Segment, Segment)> {
        let left_line = line_in_left_image(&self.fundamental, &correspondence.right);
        let right_line = line_in_right_image(&self.fundamental, &correspondence.left);
        let left_segment = project(&left_line, &self.left_viewport)?;
        let right_segment = project(&right_line, &self.right_viewport)?;
        Ok((left_segment, right_segment))
    }

    /**
     * Correspondences that fail are skipped and recorded, the rest of the frame is unaffected.
     */
    pub fn process_frame(&mut self, correspondences: &[Correspondence]) -> FrameOutput {
        let mut segments = Vec::<ColoredSegment>::with_capacity(2*correspondences.len());
        let mut skipped = Vec::<SkippedCorrespondence>::new();

        for (index, correspondence) in correspondences.iter().enumerate() {
            let color = self.colors.next_color();
            match self.segments_for(correspondence) {
                Ok((left_segment, right_segment)) => {
                    segments.push(ColoredSegment{segment: left_segment, color, side: ImageSide::Left});
                    segments.push(ColoredSegment{segment: right_segment, color, side: ImageSide::Right});
                },
                Err(error) => {
                    warn!("skipping correspondence {} ({:?} <-> {:?}): {}", index, correspondence.left, correspondence.right, error);
                    skipped.push(SkippedCorrespondence{index, error});
                }
            }
        }

        debug!("frame: {} correspondences, {} segments, {} skipped", correspondences.len(), segments.len(), skipped.len());
        FrameOutput{segments, skipped}
    }
}
