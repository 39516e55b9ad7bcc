//! One galaxy scene: layout, poster group, camera and rig.

use glam::Vec3;

use crate::camera::{Camera, CameraRig, ItemGroup, RigSettings, TargetSender};
use crate::layout::{RadiusPolicy, SphereLayoutEngine};

#[derive(Debug)]
pub struct GalaxyScene {
    engine: SphereLayoutEngine,
    positions: Vec<Vec3>,
    group: ItemGroup,
    camera: Camera,
    rig: CameraRig,
    frames: u64,
}

impl GalaxyScene {
    pub fn new(policy: RadiusPolicy, rig_settings: RigSettings) -> Self {
        Self {
            engine: SphereLayoutEngine::new(policy),
            positions: Vec::new(),
            group: ItemGroup::default(),
            camera: Camera::at(Vec3::new(
                0.0,
                0.0,
                rig_settings.default_distance,
            )),
            rig: CameraRig::new(rig_settings),
            frames: 0,
        }
    }

    /// Lay the posters out again for a list of `count` items.
    pub fn set_item_count(&mut self, count: usize) {
        if count == self.positions.len() {
            return;
        }
        self.positions = self.engine.layout(count);
        tracing::debug!(
            count,
            radius = self.engine.radius_for(count),
            "galaxy layout recomputed"
        );
    }

    /// Update half of the host's update-then-render frame.
    pub fn tick(&mut self, dt: f32) {
        self.rig.step(dt, &mut self.camera, &mut self.group);
        self.frames += 1;
    }

    pub fn item_count(&self) -> usize {
        self.positions.len()
    }

    pub fn radius(&self) -> f32 {
        self.engine.radius_for(self.positions.len())
    }

    /// Group-local poster positions, index-aligned with the item list.
    pub fn local_positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Where poster `index` currently is in the world, i.e. what a click on it reports.
    pub fn world_position(&self, index: usize) -> Option<Vec3> {
        self.positions.get(index).map(|p| self.group.to_world(*p))
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn group(&self) -> &ItemGroup {
        &self.group
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn sender(&self) -> TargetSender {
        self.rig.sender()
    }

    pub fn engine(&self) -> &SphereLayoutEngine {
        &self.engine
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
