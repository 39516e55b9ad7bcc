//! Camera-follow rig driven once per host frame.

use cinesphere_contracts::{CameraHandle, GroupTransform};
use cinesphere_model::MovieId;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use tokio::sync::mpsc;

use super::target::{CameraTarget, TargetCommand, TargetSender};

/// Frame rate at which `smoothing` is the literal per-frame lerp factor.
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigSettings {
    /// Per-frame lerp factor at 60 Hz. Larger is snappier.
    pub smoothing: f32,
    /// How far past a poster the camera stops when focusing it.
    pub focus_scale: f32,
    /// Parked camera distance along +Z.
    pub default_distance: f32,
    /// Parked distance multiplier used while a reload is in flight.
    pub warp_multiplier: f32,
    /// Idle spin of the poster group, radians per second.
    pub idle_angular_velocity: f32,
}

impl Default for RigSettings {
    fn default() -> Self {
        Self {
            smoothing: 0.08,
            focus_scale: 1.35,
            default_distance: 30.0,
            warp_multiplier: 5.0 / 3.0,
            idle_angular_velocity: 0.06,
        }
    }
}

/// Owns the single live [`CameraTarget`] of a scene.
///
/// Interaction handlers never touch the target directly; they hold a
/// [`TargetSender`] and the rig drains it at the top of every [`step`].
///
/// [`step`]: CameraRig::step
#[derive(Debug)]
pub struct CameraRig {
    settings: RigSettings,
    target: CameraTarget,
    focused: Option<MovieId>,
    commands: mpsc::UnboundedReceiver<TargetCommand>,
    sender: mpsc::UnboundedSender<TargetCommand>,
}

impl CameraRig {
    pub fn new(settings: RigSettings) -> Self {
        let (sender, commands) = mpsc::unbounded_channel();
        Self {
            target: CameraTarget::parked(settings.default_distance),
            settings,
            focused: None,
            commands,
            sender,
        }
    }

    pub fn settings(&self) -> &RigSettings {
        &self.settings
    }

    pub fn target(&self) -> CameraTarget {
        self.target
    }

    pub fn focused(&self) -> Option<MovieId> {
        self.focused
    }

    pub fn sender(&self) -> TargetSender {
        TargetSender::new(self.sender.clone())
    }

    /// Advance one frame: apply queued commands, glide the camera, aim it at
    /// the origin, and spin the group while parked.
    pub fn step<C, G>(&mut self, dt: f32, camera: &mut C, group: &mut G)
    where
        C: CameraHandle + ?Sized,
        G: GroupTransform + ?Sized,
    {
        self.drain_commands();

        let alpha = self.frame_alpha(dt);
        if alpha > 0.0 {
            let next = camera.position().lerp(self.target.position, alpha);
            camera.set_position(next);
        }

        camera.look_at(Vec3::ZERO);

        if !self.target.active && dt.is_finite() && dt > 0.0 {
            let spun = group.rotation_y()
                + self.settings.idle_angular_velocity * dt;
            group.set_rotation_y(spun.rem_euclid(TAU));
        }
    }

    /// Lerp factor for a frame of `dt` seconds: `1 - (1 - s)^(dt * 60)`.
    pub fn frame_alpha(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        let s = self.settings.smoothing.clamp(0.0, 1.0);
        if s >= 1.0 {
            return 1.0;
        }
        (1.0 - (1.0 - s).powf(dt * REFERENCE_FRAME_RATE)).clamp(0.0, 1.0)
    }

    pub fn apply(&mut self, command: TargetCommand) {
        match command {
            TargetCommand::Focus { item, position } => self.focus(item, position),
            TargetCommand::ToggleFocus { item, position } => {
                self.toggle_focus(item, position)
            }
            TargetCommand::ClearFocus => self.clear_focus(),
            TargetCommand::Reset { distance } => self.reset(distance),
            TargetCommand::Warp { multiplier } => self.warp(multiplier),
        }
    }

    /// Fly to just outside the poster at `position`.
    pub fn focus(&mut self, item: MovieId, position: Vec3) {
        self.target =
            CameraTarget::flying_to(position * self.settings.focus_scale);
        self.focused = Some(item);
    }

    pub fn toggle_focus(&mut self, item: MovieId, position: Vec3) {
        if self.focused == Some(item) {
            self.clear_focus();
        } else {
            self.focus(item, position);
        }
    }

    /// Drop the focus and return to the parked position.
    pub fn clear_focus(&mut self) {
        self.target = CameraTarget::parked(self.settings.default_distance);
        self.focused = None;
    }

    /// Park at `distance`; the idle spin resumes.
    pub fn reset(&mut self, distance: f32) {
        self.target = CameraTarget::parked(distance);
        self.focused = None;
    }

    /// Push the camera out while a reload is in flight.
    pub fn warp(&mut self, multiplier: f32) {
        let multiplier = if multiplier.is_finite() && multiplier > 0.0 {
            multiplier
        } else {
            1.0
        };
        self.target = CameraTarget::flying_to(Vec3::new(
            0.0,
            0.0,
            self.settings.default_distance * multiplier,
        ));
        self.focused = None;
    }

    fn drain_commands(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            tracing::trace!(?command, "camera target command");
            self.apply(command);
        }
    }
}
