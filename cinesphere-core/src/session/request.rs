use std::time::Duration;

use cinesphere_contracts::{CatalogError, CatalogSource};
use cinesphere_model::{CatalogPage, Genre};
use tokio::time::Instant;

use super::sequencer::FetchTicket;

/// What to ask the catalog for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    Popular,
    Search(String),
    Genre(Genre),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// Swap the whole list (search, genre, reset).
    Replace,
    /// Add a page to the end ("load more").
    Append,
}

/// A fetch the session has started but not yet applied.
///
/// Executing it does not borrow the session, so the host keeps ticking
/// frames while the request is in flight.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub ticket: FetchTicket,
    pub kind: LoadKind,
    pub query: CatalogQuery,
    pub page: u32,
    /// Camera was warped out for this load and must be parked once it resolves.
    pub warped: bool,
    pub issued_at: Instant,
    pub warp_hold: Duration,
}

impl LoadRequest {
    pub async fn execute(self, catalog: &dyn CatalogSource) -> LoadResponse {
        tracing::debug!(
            ticket = self.ticket.seq(),
            query = ?self.query,
            page = self.page,
            "catalog fetch started"
        );
        let result = match &self.query {
            CatalogQuery::Popular => catalog.fetch_popular(self.page).await,
            CatalogQuery::Search(query) => catalog.search(query, self.page).await,
            CatalogQuery::Genre(genre) => {
                catalog.discover_by_genre(genre.tmdb_id(), self.page).await
            }
        };

        if self.warped {
            // Let the warp read on screen even when the catalog is fast.
            let elapsed = self.issued_at.elapsed();
            if elapsed < self.warp_hold {
                tokio::time::sleep(self.warp_hold - elapsed).await;
            }
        }

        LoadResponse {
            request: self,
            result,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadResponse {
    pub request: LoadRequest,
    pub result: Result<CatalogPage, CatalogError>,
}

/// What [`GalaxySession::apply`](super::GalaxySession::apply) did with a response.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// The list now holds `count` items.
    Applied { count: usize },
    /// A newer load superseded this one; nothing changed.
    Discarded,
    /// The fetch failed; the previous list is still shown.
    Failed(CatalogError),
}
