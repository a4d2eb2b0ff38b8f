use std::env;
use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use color_eyre::eyre::Result;
use log::info;
use termion::input::TermRead;

use epipolar_view::{RuntimeConfig, load_runtime_config};
use epipolar_view::features::{FeatureDetector, RecordedFeatures};
use epipolar_view::io::{FrameSource, ImageSequence};
use epipolar_view::matching::{correspondences, match_cross_checked};
use epipolar_view::pipeline::FramePipeline;
use epipolar_view::visualize::{display_matches, render_segments};

fn spawn_quit_watcher() -> mpsc::Receiver<bool> {
    let (tx_abort, rx_abort) = mpsc::channel::<bool>();
    thread::spawn(move || {
        // Use asynchronous stdin
        let mut stdin = termion::async_stdin().keys();
        loop {
            match stdin.next() {
                Some(Ok(termion::event::Key::Char('q'))) => {
                    let _ = tx_abort.send(true);
                    break;
                },
                _ => thread::sleep(Duration::from_millis(10))
            }
        }
    });
    rx_abort
}

fn main() -> Result<()> {

    color_eyre::install()?;
    env_logger::init();

    let runtime_conf = match env::args().nth(1) {
        Some(path) => load_runtime_config(Path::new(&path))?,
        None => {
            let conf = RuntimeConfig::default();
            conf.validate()?;
            conf
        }
    };

    let fundamental = runtime_conf.fundamental()?;
    info!("F: {}", fundamental.matrix());
    info!("K: {}", runtime_conf.intrinsics()?);

    let mut left_camera = ImageSequence::open(&runtime_conf.left_source)?;
    let mut right_camera = ImageSequence::open(&runtime_conf.right_source)?;
    let mut left_detector = RecordedFeatures::load(&runtime_conf.left_keypoints)?;
    let mut right_detector = RecordedFeatures::load(&runtime_conf.right_keypoints)?;

    let mut pipeline = FramePipeline::with_seed(fundamental, runtime_conf.left_viewport, runtime_conf.right_viewport, runtime_conf.color_seed);

    fs::create_dir_all(&runtime_conf.output_path)?;
    let frame_budget = Duration::from_secs_f64(1.0/runtime_conf.frame_rate);
    let rx_abort = spawn_quit_watcher();
    info!("press q + enter to stop");

    let mut frame_count = 0;
    loop {
        if rx_abort.try_recv().is_ok() {
            info!("stopped after {} frames", frame_count);
            break;
        }
        if runtime_conf.max_frames.map_or(false, |max| frame_count >= max) {
            break;
        }

        let frame_start = Instant::now();
        let (left_frame, right_frame) = match (left_camera.next_frame()?, right_camera.next_frame()?) {
            (Some(left), Some(right)) => (left, right),
            _ => {
                info!("end of stream after {} frames", frame_count);
                break;
            }
        };

        let keypoints_left = left_detector.detect(&left_frame)?;
        let keypoints_right = right_detector.detect(&right_frame)?;
        let matches = match_cross_checked(&keypoints_left, &keypoints_right)?;

        let matches_image = display_matches(&left_frame.image, &right_frame.image, &keypoints_left, &keypoints_right, &matches)?;
        matches_image.save(runtime_conf.output_path.join(format!("matches_{:05}.png", left_frame.index)))?;

        let frame_output = pipeline.process_frame(&correspondences(&matches, &keypoints_left, &keypoints_right));
        let surface = render_segments(&frame_output.segments, runtime_conf.surface_width, runtime_conf.surface_height, runtime_conf.stroke_width)?;
        surface.save(runtime_conf.output_path.join(format!("epipolar_{:05}.png", left_frame.index)))?;

        info!("frame {}: {} matches, {} drawn, {} skipped", left_frame.index, matches.len(), frame_output.drawn_correspondences(), frame_output.skipped.len());
        frame_count += 1;

        if let Some(remaining) = frame_budget.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    Ok(())
}
