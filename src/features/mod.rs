use std::fs;
use std::path::Path;
use log::info;
use serde::{Serialize, Deserialize};

use crate::geometry::Point2D;
use crate::io::Frame;
use crate::{EpipolarError, Result};
use self::bit_vector::BitVector;

pub mod bit_vector;

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct KeyPoint {
    pub location: Point2D,
    pub descriptor: BitVector
}

impl KeyPoint {
    pub fn new(location: Point2D, descriptor: BitVector) -> KeyPoint {
        KeyPoint{location, descriptor}
    }
}

/**
 * Anything that turns a frame into keypoints with binary descriptors.
 */
pub trait FeatureDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<KeyPoint>>;
}

/**
 * Keypoints recorded offline, one list per frame index.
 */
#[derive(Debug,Clone)]
pub struct RecordedFeatures {
    frames: Vec<Vec<KeyPoint>>
}

impl RecordedFeatures {
    pub fn new(frames: Vec<Vec<KeyPoint>>) -> RecordedFeatures {
        RecordedFeatures{frames}
    }

    pub fn load(file_path: &Path) -> Result<RecordedFeatures> {
        let contents = fs::read_to_string(file_path)?;
        let frames: Vec<Vec<KeyPoint>> = serde_yaml::from_str(&contents)?;
        for (frame_index, keypoints) in frames.iter().enumerate() {
            for (keypoint_index, keypoint) in keypoints.iter().enumerate() {
                keypoint.descriptor.validate().map_err(|e| EpipolarError::InvalidInput(format!("frame {} keypoint {}: {}", frame_index, keypoint_index, e)))?;
            }
        }
        info!("loaded keypoints for {} frames from {}", frames.len(), file_path.display());
        Ok(RecordedFeatures::new(frames))
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl FeatureDetector for RecordedFeatures {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<KeyPoint>> {
        Ok(self.frames.get(frame.index).cloned().unwrap_or_default())
    }
}
