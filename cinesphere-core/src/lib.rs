//! # Cinesphere Core
//!
//! Lays movie posters out on a sphere and flies a camera around them.
//!
//! ## Overview
//!
//! - **Layout**: [`layout::SphereLayoutEngine`] spreads `N` posters over a
//!   sphere with the golden-angle spiral; the radius grows with `sqrt(N)`.
//! - **Camera**: [`camera::CameraRig`] eases the camera toward its target
//!   once per host frame, keeps it aimed at the origin, and spins the poster
//!   group while parked.
//! - **Session**: [`session::GalaxySession`] owns the item list, sequences
//!   catalog fetches so stale responses never win, and warps the camera
//!   while a reload is in flight.
//! - **Providers**: TMDB over HTTP, in-memory favorites, a local identity.
//!
//! ## Frame loop
//!
//! ```no_run
//! use cinesphere_core::{
//!     camera::RigSettings, layout::RadiusPolicy,
//!     providers::{TmdbCatalog, TmdbSettings},
//!     session::{GalaxySession, SessionSettings},
//! };
//!
//! async fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = TmdbCatalog::new(&TmdbSettings::default())?;
//!     let mut session = GalaxySession::new(
//!         RadiusPolicy::default(),
//!         RigSettings::default(),
//!         SessionSettings::default(),
//!     );
//!
//!     if let Some(request) = session.request_load_more() {
//!         let response = request.execute(&catalog).await;
//!         session.apply(response);
//!     }
//!     session.select(0);
//!     for _ in 0..120 {
//!         session.tick(1.0 / 60.0);
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod camera;
pub mod error;
pub mod layout;
pub mod providers;
pub mod scene;
pub mod session;

pub use error::{GalaxyError, Result};

pub use cinesphere_contracts as contracts;
pub use cinesphere_model as model;
