use std::path::Path;
use std::time::Duration;

use anyhow::{bail, ensure};
use cinesphere_contracts::CatalogSource;
use cinesphere_core::providers::TmdbCatalog;
use cinesphere_core::session::{
    ApplyOutcome, GalaxySession, LoadRequest,
};
use cinesphere_model::Genre;
use tracing::{debug, info};

pub async fn run(
    config: Option<&Path>,
    search: Option<String>,
    genre: Option<Genre>,
    pages: u32,
    fps: f32,
) -> anyhow::Result<()> {
    let dt = super::frame_dt(fps)?;
    ensure!(pages > 0, "--pages must be at least 1");

    let load = super::load_config(config)?;
    let catalog = TmdbCatalog::new(&load.config.catalog)?;
    let mut session = GalaxySession::new(
        load.config.layout,
        load.config.camera,
        load.config.session,
    );

    let first = match (search, genre) {
        (Some(query), _) => match session.request_search(&query) {
            Some(request) => request,
            None => bail!("--search needs a non-blank query"),
        },
        (None, Some(genre)) => session.request_genre(genre),
        (None, None) => match session.request_load_more() {
            Some(request) => request,
            None => bail!("nothing to load"),
        },
    };
    drive(&mut session, &catalog, first, dt).await?;

    for _ in 1..pages {
        let Some(request) = session.request_load_more() else {
            info!("catalog has no more pages");
            break;
        };
        drive(&mut session, &catalog, request, dt).await?;
    }

    // Let the camera settle back into its parked orbit.
    for _ in 0..(fps.ceil() as u32) {
        session.tick(dt);
    }

    let scene = session.scene();
    println!(
        "{} movies ({:?}), sphere radius {:.2}, camera at {:.2} from origin",
        session.items().len(),
        session.mode(),
        scene.radius(),
        scene.camera().position.length()
    );
    for (index, movie) in session.items().iter().enumerate() {
        let position = scene.world_position(index).unwrap_or_default();
        println!(
            "{index:>4}  {:>4.1}  {:<48} ({:>7.2}, {:>7.2}, {:>7.2})",
            movie.rating, movie.title, position.x, position.y, position.z
        );
    }
    Ok(())
}

/// Run `request` on the catalog while the frame loop keeps ticking.
async fn drive(
    session: &mut GalaxySession,
    catalog: &dyn CatalogSource,
    request: LoadRequest,
    dt: f32,
) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(Duration::from_secs_f32(dt));
    let fetch = request.execute(catalog);
    tokio::pin!(fetch);

    let mut frames = 0u64;
    let response = loop {
        tokio::select! {
            response = &mut fetch => break response,
            _ = ticker.tick() => {
                session.tick(dt);
                frames += 1;
            }
        }
    };
    debug!(frames, "frames rendered while loading");

    match session.apply(response) {
        ApplyOutcome::Applied { count } => {
            info!(count, "page applied");
            Ok(())
        }
        ApplyOutcome::Discarded => Ok(()),
        ApplyOutcome::Failed(err) => Err(err.into()),
    }
}
