extern crate nalgebra as na;

use std::fs;
use std::path::{Path, PathBuf};
use log::warn;
use na::Matrix3;
use serde::{Serialize, Deserialize};

use crate::geometry::{FundamentalMatrix, matrix3_from_rows};
use crate::viewport::Viewport;
use crate::{EpipolarError, Float, Result};

/**
 * Everything the visualizer needs at startup. Missing keys fall back to the reference setup.
 */
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub fundamental_matrix: Vec<Vec<Float>>,
    pub intrinsic_matrix: Vec<Vec<Float>>,
    pub surface_width: u32,
    pub surface_height: u32,
    pub left_viewport: Viewport,
    pub right_viewport: Viewport,
    pub stroke_width: u32,
    pub frame_rate: Float,
    pub left_source: PathBuf,
    pub right_source: PathBuf,
    pub left_keypoints: PathBuf,
    pub right_keypoints: PathBuf,
    pub color_seed: Option<u64>,
    pub output_path: PathBuf,
    pub max_frames: Option<usize>
}

impl Default for RuntimeConfig {
    fn default() -> RuntimeConfig {
        let (left_viewport, right_viewport) = Viewport::split_horizontally(800.0, 600.0);
        RuntimeConfig {
            fundamental_matrix: vec![
                vec![0.0, -0.001, 0.01],
                vec![0.002, 0.0, -0.05],
                vec![-0.01, 0.05, 0.0]],
            intrinsic_matrix: vec![
                vec![700.0, 0.0, 320.0],
                vec![0.0, 700.0, 240.0],
                vec![0.0, 0.0, 1.0]],
            surface_width: 800,
            surface_height: 600,
            left_viewport,
            right_viewport,
            stroke_width: 2,
            frame_rate: 30.0,
            left_source: PathBuf::from("images/left"),
            right_source: PathBuf::from("images/right"),
            left_keypoints: PathBuf::from("images/left_keypoints.yaml"),
            right_keypoints: PathBuf::from("images/right_keypoints.yaml"),
            color_seed: None,
            output_path: PathBuf::from("output"),
            max_frames: None
        }
    }
}

impl RuntimeConfig {
    pub fn fundamental(&self) -> Result<FundamentalMatrix> {
        FundamentalMatrix::from_rows(&self.fundamental_matrix)
    }

    pub fn intrinsics(&self) -> Result<Matrix3<Float>> {
        matrix3_from_rows(&self.intrinsic_matrix)
    }

    pub fn validate(&self) -> Result<()> {
        self.fundamental()?;
        self.intrinsics()?;
        for (name, viewport) in [("left", &self.left_viewport), ("right", &self.right_viewport)].iter() {
            if !(viewport.x_start < viewport.x_end && viewport.y_start < viewport.y_end) {
                return Err(EpipolarError::InvalidInput(format!("{} viewport is empty: {:?}", name, viewport)));
            }
        }
        if !(self.frame_rate > 0.0) {
            return Err(EpipolarError::InvalidInput(format!("frame rate must be positive, got {}", self.frame_rate)));
        }
        if self.stroke_width == 0 || self.surface_width == 0 || self.surface_height == 0 {
            return Err(EpipolarError::InvalidInput("stroke width and surface size must be non zero".to_string()));
        }
        if self.left_source == self.right_source {
            warn!("left and right source are both {}, both views will show the same stream", self.left_source.display());
        }
        Ok(())
    }
}

pub fn load_runtime_config(file_path: &Path) -> Result<RuntimeConfig> {
    let contents = fs::read_to_string(file_path)?;
    let config: RuntimeConfig = serde_yaml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
