use cinesphere_model::MovieId;
use glam::Vec3;
use tokio::sync::mpsc;

/// Where the camera is headed. `active` means it is gliding toward a focus
/// (idle spin suspended); inactive means parked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    pub position: Vec3,
    pub active: bool,
}

impl CameraTarget {
    /// Parked on the +Z axis looking back at the galaxy.
    pub fn parked(distance: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, distance),
            active: false,
        }
    }

    pub fn flying_to(position: Vec3) -> Self {
        Self {
            position,
            active: true,
        }
    }
}

/// Mutation requested by the interaction layer. Applied by the rig at the
/// start of the next frame, in send order.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetCommand {
    Focus { item: MovieId, position: Vec3 },
    ToggleFocus { item: MovieId, position: Vec3 },
    ClearFocus,
    Reset { distance: f32 },
    Warp { multiplier: f32 },
}

/// Cloneable writer half of the rig's command channel.
#[derive(Debug, Clone)]
pub struct TargetSender {
    tx: mpsc::UnboundedSender<TargetCommand>,
}

impl TargetSender {
    pub(crate) fn new(tx: mpsc::UnboundedSender<TargetCommand>) -> Self {
        Self { tx }
    }

    /// Returns `false` once the rig has been dropped.
    pub fn send(&self, command: TargetCommand) -> bool {
        match self.tx.send(command) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(command = ?err.0, "camera rig gone; command dropped");
                false
            }
        }
    }

    pub fn focus(&self, item: MovieId, position: Vec3) -> bool {
        self.send(TargetCommand::Focus { item, position })
    }

    pub fn toggle_focus(&self, item: MovieId, position: Vec3) -> bool {
        self.send(TargetCommand::ToggleFocus { item, position })
    }

    pub fn clear_focus(&self) -> bool {
        self.send(TargetCommand::ClearFocus)
    }

    pub fn reset(&self, distance: f32) -> bool {
        self.send(TargetCommand::Reset { distance })
    }

    pub fn warp(&self, multiplier: f32) -> bool {
        self.send(TargetCommand::Warp { multiplier })
    }
}
