pub mod browse;
pub mod config;
pub mod fly;
pub mod genres;
pub mod layout;
pub mod trailer;

use std::path::Path;

use anyhow::ensure;
use cinesphere_config::{ConfigLoad, ConfigLoader};

/// Highest simulated frame rate; keeps the frame period above zero.
pub(crate) const MAX_FPS: f32 = 1000.0;

/// Frame duration in seconds for `--fps`.
pub(crate) fn frame_dt(fps: f32) -> anyhow::Result<f32> {
    ensure!(
        fps.is_finite() && fps > 0.0 && fps <= MAX_FPS,
        "--fps must be in (0, {MAX_FPS}], got {fps}"
    );
    Ok(1.0 / fps)
}

pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<ConfigLoad> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = path {
        loader = loader.with_path(path);
    }
    let load = loader.load()?;
    for warning in &load.warnings.items {
        match &warning.hint {
            Some(hint) => tracing::warn!(hint = %hint, "{}", warning.message),
            None => tracing::warn!("{}", warning.message),
        }
    }
    Ok(load)
}
