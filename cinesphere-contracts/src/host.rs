//! Handles the rendering host passes to the per-frame rig step.

use glam::Vec3;

/// The live scene camera.
pub trait CameraHandle {
    fn position(&self) -> Vec3;

    fn set_position(&mut self, position: Vec3);

    /// Aim the camera at `target` from its current position.
    fn look_at(&mut self, target: Vec3);
}

/// Rotatable transform of the group that holds every poster.
pub trait GroupTransform {
    /// Rotation about the world Y axis, radians.
    fn rotation_y(&self) -> f32;

    fn set_rotation_y(&mut self, radians: f32);
}
