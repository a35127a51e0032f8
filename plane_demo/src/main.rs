//! Plane synchronization demo
//!
//! Runs a headless XR session against a synthetic plane detector (or a
//! recorded detector stream) and keeps the tracked planes mirrored in a
//! scene, sweeping a controller ray across them each frame.
//!
//! Usage: `plane_demo [config-path]`

mod config;
mod detector;

use std::path::Path;

use thiserror::Error;
use xr_planes::config::{Config, ConfigError};
use xr_planes::foundation::logging;
use xr_planes::foundation::math::{constants, Quat, Transform, Vec3};
use xr_planes::physics::Ray;
use xr_planes::planes::{PlaneEvent, PlaneTrackingSession};
use xr_planes::scene::Scene;
use xr_planes::xr::{FeatureManager, SimulatedXrSystem, XrSystem};

use config::DemoConfig;
use detector::SyntheticDetector;

/// Frames between progress summaries
const SUMMARY_INTERVAL: u64 = 120;

/// Controller height above the floor
const CONTROLLER_HEIGHT: f32 = 1.4;

/// Demo failures
#[derive(Error, Debug)]
pub enum DemoError {
    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Stream file could not be read or written
    #[error("Stream file error: {0}")]
    Io(#[from] std::io::Error),

    /// Recorded stream is malformed
    #[error("Stream parse error: {0}")]
    StreamParse(#[from] ron::error::SpannedError),

    /// Stream could not be serialized
    #[error("Stream serialization error: {0}")]
    StreamSerialize(#[from] ron::Error),
}

/// Where each frame's detector notifications come from
enum FrameSource {
    Synthetic(SyntheticDetector),
    Replay(std::vec::IntoIter<Vec<PlaneEvent>>),
}

impl FrameSource {
    fn next_frame(&mut self) -> Option<Vec<PlaneEvent>> {
        match self {
            Self::Synthetic(detector) => Some(detector.step()),
            Self::Replay(frames) => frames.next(),
        }
    }

    fn session_restarted(&mut self) {
        if let Self::Synthetic(detector) = self {
            detector.reset();
        }
    }
}

struct PlaneDemoApp {
    config: DemoConfig,
    scene: Scene,
    session: PlaneTrackingSession<SimulatedXrSystem>,
    source: FrameSource,
    recorded: Vec<Vec<PlaneEvent>>,
    hits: u64,
}

impl PlaneDemoApp {
    fn new(config: DemoConfig) -> Result<Self, DemoError> {
        let source = match &config.replay_path {
            Some(path) => {
                let frames = load_stream(path)?;
                log::info!("Replaying {} recorded frames from {}", frames.len(), path);
                FrameSource::Replay(frames.into_iter())
            }
            None => {
                log::info!(
                    "Generating detector frames (seed {}, up to {} planes)",
                    config.seed,
                    config.max_planes
                );
                FrameSource::Synthetic(SyntheticDetector::new(config.seed, config.max_planes))
            }
        };

        let mut system = SimulatedXrSystem::new(FeatureManager::with_all_features());
        system.start_session();
        let session = PlaneTrackingSession::new(system, &config.sync);

        Ok(Self {
            config,
            scene: Scene::new(),
            session,
            source,
            recorded: Vec::new(),
            hits: 0,
        })
    }

    fn run(&mut self) -> Result<(), DemoError> {
        for frame in 1..=self.config.frames {
            if self.config.restart_every > 0 && frame % self.config.restart_every == 0 {
                self.restart_session();
            }

            let Some(events) = self.source.next_frame() else {
                log::info!("Recorded stream exhausted after {} frames", frame - 1);
                break;
            };
            if self.config.record_path.is_some() {
                self.recorded.push(events.clone());
            }
            self.session.system_mut().queue_frame(events);

            self.session.update(&mut self.scene);
            self.sweep_controller(frame);

            if frame % SUMMARY_INTERVAL == 0 {
                log::info!(
                    "Frame {}: {} planes tracked, {} scene nodes",
                    frame,
                    self.session.synchronizer().registry().len(),
                    self.scene.len()
                );
            }
        }

        if let Some(path) = &self.config.record_path {
            save_stream(path, &self.recorded)?;
            log::info!("Recorded {} frames to {}", self.recorded.len(), path);
        }

        self.report();
        Ok(())
    }

    fn restart_session(&mut self) {
        log::info!("Restarting XR session");
        let system = self.session.system_mut();
        system.end_session();
        system.start_session();
        self.source.session_restarted();
    }

    /// Turn the controller a little each frame, pointing slightly down
    fn sweep_controller(&mut self, frame: u64) {
        let yaw = (frame % 360) as f32 * constants::TAU / 360.0;
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), yaw)
            * Quat::from_axis_angle(&Vec3::x_axis(), -0.4);
        let pose = Transform::from_position_rotation(Vec3::new(0.0, CONTROLLER_HEIGHT, 0.0), rotation);

        if let Some(hit) = self.session.pick(&Ray::from_pose(&pose), &self.scene) {
            self.hits += 1;
            log::debug!(
                "Controller points at plane {} ({:.2} m away)",
                hit.plane_id,
                hit.distance
            );
        }
    }

    fn report(&self) {
        let stats = self.session.synchronizer().stats();
        let scene_stats = self.scene.stats();

        log::info!("Plane demo finished");
        log::info!(
            "  events: {} installed, {} rebuilt, {} stale, {} dropped, {} ignored, {} removed, {} resets",
            stats.installed,
            stats.rebuilt,
            stats.skipped_stale,
            stats.dropped,
            stats.ignored,
            stats.removed,
            stats.resets
        );
        log::info!(
            "  scene: {} nodes live, {} added, {} geometries and {} materials released",
            self.scene.len(),
            scene_stats.nodes_added,
            scene_stats.geometries_released,
            scene_stats.materials_released
        );
        log::info!("  controller hits: {}", self.hits);
    }
}

fn load_stream(path: impl AsRef<Path>) -> Result<Vec<Vec<PlaneEvent>>, DemoError> {
    let content = std::fs::read_to_string(path)?;
    Ok(ron::from_str(&content)?)
}

fn save_stream(path: impl AsRef<Path>, frames: &[Vec<PlaneEvent>]) -> Result<(), DemoError> {
    let content = ron::ser::to_string_pretty(frames, ron::ser::PrettyConfig::default())?;
    std::fs::write(path, content)?;
    Ok(())
}

fn load_config() -> Result<DemoConfig, DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::load_from_file(&path)?,
        None => DemoConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    logging::init(&config.sync.log_level);

    log::info!("Starting plane demo ({} frames)", config.frames);

    let mut app = PlaneDemoApp::new(config)?;
    if let Err(e) = app.run() {
        log::error!("Plane demo error: {}", e);
        return Err(e.into());
    }
    Ok(())
}
