//! Browse session: the item list, its lifecycle, and the interaction
//! handlers that steer the camera.
//!
//! Loads run in three steps so the frame loop never waits on the network:
//!
//! 1. a `request_*` handler issues a [`LoadRequest`] (and warps the camera
//!    for wholesale reloads),
//! 2. the host runs [`LoadRequest::execute`] on its own task,
//! 3. [`GalaxySession::apply`] folds the response in, unless a newer load
//!    superseded it.

pub mod request;
pub mod sequencer;

use std::collections::HashSet;
use std::time::Duration;

use cinesphere_contracts::{FavoritesStore, IdentityProvider, StoreError};
use cinesphere_model::{Genre, Movie, MovieId, UserId};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::camera::{RigSettings, TargetSender};
use crate::error::{GalaxyError, Result};
use crate::layout::RadiusPolicy;
use crate::scene::GalaxyScene;

pub use request::{ApplyOutcome, CatalogQuery, LoadKind, LoadRequest, LoadResponse};
pub use sequencer::{FetchSequencer, FetchTicket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Minimum time the camera stays warped out during a reload.
    pub warp_hold_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self { warp_hold_ms: 500 }
    }
}

impl SessionSettings {
    pub fn warp_hold(&self) -> Duration {
        Duration::from_millis(self.warp_hold_ms)
    }
}

/// Which list the galaxy is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BrowseMode {
    #[default]
    Popular,
    Search(String),
    Genre(Genre),
    Favorites,
}

impl BrowseMode {
    fn query(&self) -> Option<CatalogQuery> {
        match self {
            BrowseMode::Popular => Some(CatalogQuery::Popular),
            BrowseMode::Search(q) => Some(CatalogQuery::Search(q.clone())),
            BrowseMode::Genre(g) => Some(CatalogQuery::Genre(*g)),
            BrowseMode::Favorites => None,
        }
    }
}

impl From<&CatalogQuery> for BrowseMode {
    fn from(query: &CatalogQuery) -> Self {
        match query {
            CatalogQuery::Popular => BrowseMode::Popular,
            CatalogQuery::Search(q) => BrowseMode::Search(q.clone()),
            CatalogQuery::Genre(g) => BrowseMode::Genre(*g),
        }
    }
}

/// The load the session is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingLoad {
    ticket: FetchTicket,
    warped: bool,
}

#[derive(Debug)]
pub struct GalaxySession {
    scene: GalaxyScene,
    targets: TargetSender,
    items: Vec<Movie>,
    mode: BrowseMode,
    next_page: u32,
    has_more: bool,
    selected: Option<MovieId>,
    favorites: HashSet<MovieId>,
    sequencer: FetchSequencer,
    pending: Option<PendingLoad>,
    rig_settings: RigSettings,
    settings: SessionSettings,
}

impl GalaxySession {
    pub fn new(
        policy: RadiusPolicy,
        rig_settings: RigSettings,
        settings: SessionSettings,
    ) -> Self {
        let scene = GalaxyScene::new(policy, rig_settings);
        let targets = scene.sender();
        Self {
            scene,
            targets,
            items: Vec::new(),
            mode: BrowseMode::Popular,
            next_page: 1,
            has_more: true,
            selected: None,
            favorites: HashSet::new(),
            sequencer: FetchSequencer::new(),
            pending: None,
            rig_settings,
            settings,
        }
    }

    pub fn items(&self) -> &[Movie] {
        &self.items
    }

    pub fn mode(&self) -> &BrowseMode {
        &self.mode
    }

    pub fn scene(&self) -> &GalaxyScene {
        &self.scene
    }

    /// Another writer for the camera target, for hosts with their own handlers.
    pub fn targets(&self) -> TargetSender {
        self.targets.clone()
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn selected(&self) -> Option<&Movie> {
        let id = self.selected?;
        self.items.iter().find(|m| m.id == id)
    }

    pub fn is_favorite(&self, id: MovieId) -> bool {
        self.favorites.contains(&id)
    }

    /// One host frame.
    pub fn tick(&mut self, dt: f32) {
        self.scene.tick(dt);
    }

    /// Next page of whatever is showing, appended. `None` while another load
    /// is in flight, when the catalog has no more pages, or in the favorites view.
    pub fn request_load_more(&mut self) -> Option<LoadRequest> {
        if self.pending.is_some() {
            debug!("load more ignored; a load is already in flight");
            return None;
        }
        if !self.has_more {
            debug!(mode = ?self.mode, "load more ignored; catalog exhausted");
            return None;
        }
        let query = self.mode.query()?;
        let ticket = self.sequencer.issue();
        Some(self.start(ticket, LoadKind::Append, query, self.next_page, false))
    }

    /// Back to page one of the popular list, parked camera, nothing selected.
    pub fn request_reset(&mut self) -> LoadRequest {
        self.selected = None;
        self.targets.reset(self.rig_settings.default_distance);
        let ticket = self.sequencer.issue_replacing();
        self.start(ticket, LoadKind::Replace, CatalogQuery::Popular, 1, false)
    }

    /// Warp out and replace the list with search results. Blank queries are ignored.
    pub fn request_search(&mut self, query: &str) -> Option<LoadRequest> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(self.start_warped(CatalogQuery::Search(query.to_string())))
    }

    pub fn request_genre(&mut self, genre: Genre) -> LoadRequest {
        self.start_warped(CatalogQuery::Genre(genre))
    }

    pub fn apply(&mut self, response: LoadResponse) -> ApplyOutcome {
        let LoadResponse { request, result } = response;
        let ticket = request.ticket;

        if !self.sequencer.accepts(ticket) {
            warn!(
                ticket = ticket.seq(),
                query = ?request.query,
                "discarding stale catalog response"
            );
            return ApplyOutcome::Discarded;
        }
        self.sequencer.resolve(ticket);
        if self.pending.is_some_and(|p| p.ticket == ticket) {
            self.pending = None;
        }

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                warn!(error = %err, query = ?request.query, "catalog fetch failed; keeping current list");
                if request.warped {
                    self.park();
                }
                return ApplyOutcome::Failed(err);
            }
        };

        self.has_more = page.has_more();
        self.next_page = page.page.max(request.page) + 1;
        match request.kind {
            LoadKind::Replace => {
                self.items = page.movies;
                self.selected = None;
                self.mode = BrowseMode::from(&request.query);
            }
            LoadKind::Append => self.items.extend(page.movies),
        }
        self.scene.set_item_count(self.items.len());
        if request.kind == LoadKind::Append {
            self.refocus_selected();
        }

        if request.warped {
            self.park();
        }

        info!(
            count = self.items.len(),
            mode = ?self.mode,
            page = request.page,
            "galaxy updated"
        );
        ApplyOutcome::Applied {
            count: self.items.len(),
        }
    }

    /// Give up on the load in flight, for hosts that drop a [`LoadRequest`]
    /// without applying it. Its response is discarded if it arrives later,
    /// and a warped camera is parked. Returns whether a load was pending.
    pub fn cancel_load(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        self.sequencer.supersede();
        if pending.warped {
            self.park();
        }
        debug!(ticket = pending.ticket.seq(), "pending load cancelled");
        true
    }

    /// Click on poster `index`: fly to it, or back out if it is already focused.
    pub fn select(&mut self, index: usize) -> Option<&Movie> {
        let id = self.items.get(index)?.id;
        let position = self.scene.world_position(index)?;
        self.targets.toggle_focus(id, position);
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
        self.selected()
    }

    /// Dismiss the detail panel. Always re-parks the camera.
    pub fn close_detail(&mut self) {
        self.selected = None;
        self.targets.clear_focus();
    }

    /// Swap the list to the signed-in user's favorites.
    pub fn show_favorites(
        &mut self,
        identity: &dyn IdentityProvider,
        favorites: Vec<Movie>,
    ) -> Result<usize> {
        if identity.current_user().is_none() {
            return Err(GalaxyError::NotSignedIn);
        }
        self.sequencer.supersede();
        self.pending = None;
        self.mode = BrowseMode::Favorites;
        self.has_more = false;
        self.set_favorites(favorites);
        self.selected = None;
        self.park();
        Ok(self.items.len())
    }

    /// Feed from a favorites subscription. Refreshes the list when the
    /// favorites view is showing.
    pub fn set_favorites(&mut self, favorites: Vec<Movie>) {
        self.favorites = favorites.iter().map(|m| m.id).collect();
        if self.mode == BrowseMode::Favorites {
            if let Some(id) = self.selected
                && !self.favorites.contains(&id)
            {
                self.close_detail();
            }
            self.items = favorites;
            self.scene.set_item_count(self.items.len());
        }
    }

    /// Add or remove `movie` from the user's favorites. Returns whether it is
    /// a favorite afterwards.
    pub async fn toggle_favorite(
        store: &dyn FavoritesStore,
        user: UserId,
        movie: &Movie,
        currently_favorite: bool,
    ) -> std::result::Result<bool, StoreError> {
        if currently_favorite {
            store.remove(user, movie.id).await?;
            Ok(false)
        } else {
            store.add(user, movie.clone()).await?;
            Ok(true)
        }
    }

    fn start_warped(&mut self, query: CatalogQuery) -> LoadRequest {
        self.selected = None;
        self.targets.warp(self.rig_settings.warp_multiplier);
        let ticket = self.sequencer.issue_replacing();
        self.start(ticket, LoadKind::Replace, query, 1, true)
    }

    fn start(
        &mut self,
        ticket: FetchTicket,
        kind: LoadKind,
        query: CatalogQuery,
        page: u32,
        warped: bool,
    ) -> LoadRequest {
        self.pending = Some(PendingLoad { ticket, warped });
        LoadRequest {
            ticket,
            kind,
            query,
            page,
            warped,
            issued_at: Instant::now(),
            warp_hold: self.settings.warp_hold(),
        }
    }

    fn park(&mut self) {
        self.targets.reset(self.rig_settings.default_distance);
    }

    /// The layout moved; keep the camera on the selected poster.
    fn refocus_selected(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        let Some(index) = self.items.iter().position(|m| m.id == id) else {
            return;
        };
        if let Some(position) = self.scene.world_position(index) {
            self.targets.focus(id, position);
        }
    }
}
