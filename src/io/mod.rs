extern crate image as image_rs;

use std::fs;
use std::path::{Path, PathBuf};
use image_rs::RgbImage;
use log::info;

use crate::{EpipolarError, Result};

pub mod runtime_config;

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

#[derive(Debug,Clone)]
pub struct Frame {
    pub index: usize,
    pub image: RgbImage
}

/**
 * One camera of the stereo rig. Returns None once the stream is exhausted.
 */
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/**
 * Directory of still images replayed in file name order.
 */
#[derive(Debug,Clone)]
pub struct ImageSequence {
    paths: Vec<PathBuf>,
    next_index: usize
}

impl ImageSequence {
    pub fn open(folder: &Path) -> Result<ImageSequence> {
        if !folder.is_dir() {
            return Err(EpipolarError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, format!("Unable to open camera source {}", folder.display()))));
        }

        let mut paths = fs::read_dir(folder)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::result::Result<Vec<PathBuf>, std::io::Error>>()?
            .into_iter()
            .filter(|p| is_image_file(p))
            .collect::<Vec<PathBuf>>();
        paths.sort();

        info!("opened {} with {} frames", folder.display(), paths.len());
        Ok(ImageSequence{paths, next_index: 0})
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for ImageSequence {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        match self.paths.get(self.next_index) {
            None => Ok(None),
            Some(path) => {
                let image = image_rs::open(path)?.to_rgb8();
                let frame = Frame{index: self.next_index, image};
                self.next_index += 1;
                Ok(Some(frame))
            }
        }
    }
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}
