use thiserror::Error;
use url::Url;

use super::models::GalaxyConfig;

/// Observed range in which the 60 Hz lerp factor feels smooth without lagging.
const SMOOTHING_BAND: (f32, f32) = (0.05, 0.08);

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("camera.smoothing must be in (0, 1], got {value}")]
    SmoothingOutOfRange { value: f32 },
    #[error("camera.focus_scale must be greater than 1 so the camera stops outside the sphere, got {value}")]
    FocusInsideSphere { value: f32 },
    #[error("camera.{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("camera.warp_multiplier must be at least 1, got {value}")]
    WarpTooSmall { value: f32 },
    #[error("layout radius policy is invalid: scale {scale}, base {base}")]
    InvalidRadiusPolicy { scale: f32, base: f32 },
    #[error("invalid catalog URL '{url}'")]
    InvalidCatalogUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

pub fn apply_guard_rails(
    config: &GalaxyConfig,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    validate_camera(config, &mut warnings)?;

    let layout = &config.layout;
    if !layout.is_valid() {
        return Err(ConfigGuardRailError::InvalidRadiusPolicy {
            scale: layout.scale,
            base: layout.base,
        });
    }

    Url::parse(config.catalog.base_url.trim()).map_err(|source| {
        ConfigGuardRailError::InvalidCatalogUrl {
            url: config.catalog.base_url.clone(),
            source,
        }
    })?;

    if config.catalog.api_key.trim().is_empty() {
        warnings.push_with_hint(
            "TMDB API key not configured; every catalog request will fail",
            "Set TMDB_API_KEY or catalog.api_key",
        );
    }

    if config.session.warp_hold_ms == 0 {
        warnings.push("session.warp_hold_ms is 0; fast reloads will not show the warp");
    }

    Ok(warnings)
}

fn validate_camera(
    config: &GalaxyConfig,
    warnings: &mut ConfigWarnings,
) -> Result<(), ConfigGuardRailError> {
    let camera = &config.camera;

    if !(camera.smoothing > 0.0 && camera.smoothing <= 1.0) {
        return Err(ConfigGuardRailError::SmoothingOutOfRange {
            value: camera.smoothing,
        });
    }

    if !camera.focus_scale.is_finite() || camera.focus_scale <= 1.0 {
        return Err(ConfigGuardRailError::FocusInsideSphere {
            value: camera.focus_scale,
        });
    }

    if !camera.default_distance.is_finite() || camera.default_distance <= 0.0 {
        return Err(ConfigGuardRailError::NonPositive {
            field: "default_distance",
            value: camera.default_distance,
        });
    }

    if !camera.warp_multiplier.is_finite() || camera.warp_multiplier < 1.0 {
        return Err(ConfigGuardRailError::WarpTooSmall {
            value: camera.warp_multiplier,
        });
    }

    if !camera.idle_angular_velocity.is_finite() {
        return Err(ConfigGuardRailError::NonPositive {
            field: "idle_angular_velocity",
            value: camera.idle_angular_velocity,
        });
    }

    let (low, high) = SMOOTHING_BAND;
    if camera.smoothing < low || camera.smoothing > high {
        warnings.push_with_hint(
            format!(
                "camera.smoothing {} is outside the usual {low}-{high} band",
                camera.smoothing
            ),
            "Lower values lag behind clicks; higher values snap",
        );
    }

    let parked_radius = config.layout.radius(20);
    if camera.default_distance <= parked_radius {
        warnings.push(format!(
            "camera.default_distance {} sits inside a 20-poster sphere (radius {parked_radius:.1})",
            camera.default_distance
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_with_only_missing_key_warning() {
        let warnings = apply_guard_rails(&GalaxyConfig::default()).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings.items[0].message.contains("API key"));
    }

    #[test]
    fn rejects_smoothing_outside_unit_interval() {
        for value in [0.0, -0.1, 1.5, f32::NAN] {
            let mut config = GalaxyConfig::default();
            config.camera.smoothing = value;
            assert!(matches!(
                apply_guard_rails(&config),
                Err(ConfigGuardRailError::SmoothingOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn warns_on_smoothing_outside_band() {
        let mut config = GalaxyConfig::default();
        config.catalog.api_key = "key".into();
        config.camera.smoothing = 0.5;
        let warnings = apply_guard_rails(&config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings.items[0].hint.is_some());
    }

    #[test]
    fn rejects_focus_inside_sphere_and_short_warp() {
        let mut config = GalaxyConfig::default();
        config.camera.focus_scale = 0.9;
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::FocusInsideSphere { .. })
        ));

        let mut config = GalaxyConfig::default();
        config.camera.warp_multiplier = 0.5;
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::WarpTooSmall { .. })
        ));
    }

    #[test]
    fn rejects_bad_radius_policy_and_url() {
        let mut config = GalaxyConfig::default();
        config.layout.base = 0.0;
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::InvalidRadiusPolicy { .. })
        ));

        let mut config = GalaxyConfig::default();
        config.catalog.base_url = "not a url".into();
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::InvalidCatalogUrl { .. })
        ));
    }
}
