//! One-shot catalog loading into a shared session.

use crate::CatalogSource;
use skiphire_core::session::{LoadOutcome, LoadTicket, Session};
use skiphire_core::FetchFailure;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A session shared between the rendering layer and the loader task.
pub type SharedSession = Arc<Mutex<Session>>;

/// Create a fresh shared session.
pub fn shared_session() -> SharedSession {
    Arc::new(Mutex::new(Session::new()))
}

/// Drives the catalog fetch for a session.
///
/// The session lock is held only to take a ticket and to deliver the
/// result, never across the fetch itself.
pub struct CatalogLoader<S: ?Sized> {
    source: Arc<S>,
}

impl<S: ?Sized> Clone for CatalogLoader<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: CatalogSource> CatalogLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

impl<S: CatalogSource + ?Sized> CatalogLoader<S> {
    /// Loader over an already shared source, e.g. `Arc<dyn CatalogSource>`.
    pub fn from_shared(source: Arc<S>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the catalog if the session still needs it.
    ///
    /// Returns `None` when no request was issued (already requested, in
    /// flight, or torn down).
    pub async fn load(&self, session: &SharedSession) -> Option<LoadOutcome> {
        let ticket = session.lock().await.begin_load()?;
        Some(self.fetch_and_deliver(session, ticket).await)
    }

    /// Full reload: reset the session and fetch again.
    pub async fn reload(&self, session: &SharedSession) -> Option<LoadOutcome> {
        let ticket = session.lock().await.reload()?;
        Some(self.fetch_and_deliver(session, ticket).await)
    }

    async fn fetch_and_deliver(&self, session: &SharedSession, ticket: LoadTicket) -> LoadOutcome {
        debug!(source = %self.source.describe(), generation = ticket.generation(), "fetching catalog");
        let result = self.source.fetch_catalog().await.map_err(|e| {
            warn!(error = %e, "catalog fetch failed");
            FetchFailure::from(e)
        });

        session.lock().await.complete_load(ticket, result)
    }
}

impl<S: CatalogSource + ?Sized + 'static> CatalogLoader<S> {
    /// Run [`CatalogLoader::load`] on a background task.
    pub fn spawn(&self, session: SharedSession) -> JoinHandle<Option<LoadOutcome>> {
        let loader = self.clone();
        tokio::spawn(async move { loader.load(&session).await })
    }
}
