use std::path::Path;

use cinesphere_core::camera::{Camera, CameraRig, ItemGroup};
use cinesphere_model::MovieId;
use glam::Vec3;
use tracing::trace;

/// Distance at which the camera counts as arrived.
const ARRIVAL: f32 = 0.01;

pub fn run(
    config: Option<&Path>,
    poster: Vec3,
    max_frames: u32,
    fps: f32,
) -> anyhow::Result<()> {
    let dt = super::frame_dt(fps)?;
    let load = super::load_config(config)?;
    let settings = load.config.camera;

    let mut rig = CameraRig::new(settings);
    let mut camera = Camera::at(Vec3::new(0.0, 0.0, settings.default_distance));
    let mut group = ItemGroup::default();

    rig.focus(MovieId(0), poster);
    let target = rig.target().position;
    println!(
        "flying from {} to {} ({} fps)",
        fmt_vec(camera.position),
        fmt_vec(target),
        fps
    );

    for frame in 1..=max_frames {
        rig.step(dt, &mut camera, &mut group);
        let remaining = camera.position.distance(target);
        if frame % 30 == 0 {
            trace!(frame, remaining, "camera approaching");
        }
        if remaining < ARRIVAL {
            println!(
                "arrived after {frame} frames ({:.2}s) at {}",
                frame as f32 * dt,
                fmt_vec(camera.position)
            );
            return Ok(());
        }
    }

    println!(
        "still {:.3} away after {max_frames} frames",
        camera.position.distance(target)
    );
    Ok(())
}

fn fmt_vec(v: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}
