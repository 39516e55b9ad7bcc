//! Camera rig, its target, and the headless host handles.

pub mod handle;
pub mod rig;
pub mod target;

pub use handle::{Camera, ItemGroup};
pub use rig::{CameraRig, REFERENCE_FRAME_RATE, RigSettings};
pub use target::{CameraTarget, TargetCommand, TargetSender};
