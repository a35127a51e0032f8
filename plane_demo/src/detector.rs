//! Synthetic plane detector
//!
//! Produces a plausible detector stream: planes appear on the floor, tables
//! and walls, grow as they are refined, occasionally report an incomplete
//! outline, and eventually get lost.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xr_planes::foundation::math::{constants, Mat4, Quat, Transform, Vec2, Vec3};
use xr_planes::planes::{DetectedPlane, PlaneEvent, PlaneId};

const SPAWN_CHANCE: f64 = 0.08;
const UPDATE_CHANCE: f64 = 0.5;
const STALE_CHANCE: f64 = 0.1;
const LOSS_CHANCE: f64 = 0.01;
const GROWTH_PER_UPDATE: f32 = 1.03;
const MAX_RADIUS: f32 = 2.5;

struct SyntheticPlane {
    /// Unit-radius corner directions, sorted by angle
    corners: Vec<Vec2>,
    radius: f32,
    placement: Mat4,
}

impl SyntheticPlane {
    fn record(&self, id: PlaneId) -> DetectedPlane {
        DetectedPlane::new(id, self.corners.iter().map(|c| c * self.radius), self.placement)
    }
}

/// Generates detector frames from a seeded RNG
pub struct SyntheticDetector {
    rng: StdRng,
    planes: BTreeMap<PlaneId, SyntheticPlane>,
    next_id: u32,
    max_planes: usize,
}

impl SyntheticDetector {
    /// Create a detector tracking at most `max_planes` at once
    pub fn new(seed: u64, max_planes: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            planes: BTreeMap::new(),
            next_id: 1,
            max_planes,
        }
    }

    /// Forget everything, as a real detector does when its session ends
    ///
    /// Ids keep counting up so a new session never sees an old id.
    pub fn reset(&mut self) {
        self.planes.clear();
    }

    /// Planes currently being reported
    pub fn live_planes(&self) -> usize {
        self.planes.len()
    }

    /// Notifications for the next frame
    pub fn step(&mut self) -> Vec<PlaneEvent> {
        let mut events = Vec::new();

        let lost: Vec<PlaneId> = self
            .planes
            .keys()
            .copied()
            .filter(|_| self.rng.gen_bool(LOSS_CHANCE))
            .collect();
        for id in lost {
            if let Some(plane) = self.planes.remove(&id) {
                events.push(PlaneEvent::Removed(plane.record(id)));
            }
        }

        for (&id, plane) in &mut self.planes {
            if !self.rng.gen_bool(UPDATE_CHANCE) {
                continue;
            }
            plane.radius = (plane.radius * GROWTH_PER_UPDATE).min(MAX_RADIUS);

            let mut record = plane.record(id);
            if self.rng.gen_bool(STALE_CHANCE) {
                let missing = self.rng.gen_range(0..record.outline.len());
                record = record.with_missing_point(missing);
            }
            events.push(PlaneEvent::Updated(record));
        }

        if self.planes.len() < self.max_planes && self.rng.gen_bool(SPAWN_CHANCE) {
            let id = PlaneId(self.next_id);
            self.next_id += 1;
            let plane = self.spawn();
            events.push(PlaneEvent::Added(plane.record(id)));
            self.planes.insert(id, plane);
        }

        events
    }

    fn spawn(&mut self) -> SyntheticPlane {
        let corner_count = self.rng.gen_range(4..=8);
        let mut angles: Vec<f32> = (0..corner_count)
            .map(|_| self.rng.gen_range(0.0..constants::TAU))
            .collect();
        angles.sort_by(f32::total_cmp);

        let corners = angles
            .into_iter()
            .map(|angle| Vec2::new(angle.cos(), angle.sin()) * self.rng.gen_range(0.6..1.0))
            .collect();

        let heading = Quat::from_axis_angle(&Vec3::y_axis(), self.rng.gen_range(0.0..constants::TAU));
        let (height, rotation) = match self.rng.gen_range(0..3) {
            0 => (0.0, heading),
            1 => (self.rng.gen_range(0.6..1.1), heading),
            // Walls stand the plane's local XZ up on its edge
            _ => (
                self.rng.gen_range(0.5..1.5),
                heading * Quat::from_axis_angle(&Vec3::x_axis(), constants::HALF_PI),
            ),
        };
        let position = Vec3::new(
            self.rng.gen_range(-3.0..3.0),
            height,
            self.rng.gen_range(-3.0..3.0),
        );

        SyntheticPlane {
            corners,
            radius: self.rng.gen_range(0.2..0.5),
            placement: Transform::from_position_rotation(position, rotation).to_matrix(),
        }
    }
}
