use std::path::Path;

use cinesphere_contracts::CatalogSource;
use cinesphere_core::providers::{TmdbCatalog, trailer_url};
use cinesphere_model::MovieId;

pub async fn run(config: Option<&Path>, movie: MovieId) -> anyhow::Result<()> {
    let load = super::load_config(config)?;
    let catalog = TmdbCatalog::new(&load.config.catalog)?;

    match catalog.fetch_trailer_key(movie).await? {
        Some(key) => println!("{}", trailer_url(&key)),
        None => println!("no trailer found for movie {movie}"),
    }
    Ok(())
}
