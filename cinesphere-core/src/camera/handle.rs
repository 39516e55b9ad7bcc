use cinesphere_contracts::{CameraHandle, GroupTransform};
use glam::{Mat4, Quat, Vec3};

/// Headless perspective camera: a position and a look direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::at(Vec3::new(0.0, 0.0, 30.0))
    }
}

impl Camera {
    /// Camera at `position` already aimed at the origin.
    pub fn at(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
        };
        camera.look_at(Vec3::ZERO);
        camera
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, self.up)
    }
}

impl CameraHandle for Camera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn look_at(&mut self, target: Vec3) {
        let Some(forward) = (target - self.position).try_normalize() else {
            // Sitting on the target: keep the last orientation.
            return;
        };
        // World up is useless when looking straight up or down the Y axis.
        self.up = if forward.dot(Vec3::Y).abs() > 0.999 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        self.forward = forward;
    }
}

/// The transform every poster hangs from. Only spins about Y.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ItemGroup {
    pub rotation_y: f32,
}

impl ItemGroup {
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.rotation_y)
    }

    /// World position of a point given in group-local coordinates.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.rotation() * local
    }
}

impl GroupTransform for ItemGroup {
    fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    fn set_rotation_y(&mut self, radians: f32) {
        self.rotation_y = radians;
    }
}
