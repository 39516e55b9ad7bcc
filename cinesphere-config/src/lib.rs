//! Configuration for Cinesphere hosts.
//!
//! Settings come from an explicit file, `$CINESPHERE_CONFIG_PATH`,
//! `$CINESPHERE_CONFIG_JSON`, a default `cinesphere.toml`, or built-in
//! defaults, in that order. `TMDB_API_KEY` always overrides the catalog key.
//! The result is checked by guard rails that reject settings the camera
//! cannot work with and warn about ones that merely look off.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::{
    API_KEY_ENV, CONFIG_JSON_ENV, CONFIG_PATH_ENV, ConfigSource, GalaxyConfig,
};
pub use validation::{
    ConfigGuardRailError, ConfigWarning, ConfigWarnings, apply_guard_rails,
};
