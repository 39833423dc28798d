use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    services::{
        authoring::{DraftBoard, Publisher},
        catalog::Catalog,
        results::ResultViewer,
        session::SessionManager,
    },
    storage::KeyValueStore,
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub publisher: Publisher,
    pub drafts: Arc<DraftBoard>,
    pub sessions: Arc<SessionManager>,
    pub results: ResultViewer,
}

impl AppState {
    /// Wires every service onto one shared store. The publisher writes
    /// through the same catalog handlers read from.
    pub fn new(store: Arc<dyn KeyValueStore>, config: &Config) -> Self {
        let catalog = Catalog::new(store.clone());
        Self {
            publisher: Publisher::new(catalog.clone()),
            catalog,
            drafts: Arc::new(DraftBoard::new()),
            sessions: Arc::new(SessionManager::new(
                store.clone(),
                config.timer_tick,
                config.session_retention,
            )),
            results: ResultViewer::new(store),
        }
    }
}

impl FromRef<AppState> for Catalog {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

impl FromRef<AppState> for Publisher {
    fn from_ref(state: &AppState) -> Self {
        state.publisher.clone()
    }
}

impl FromRef<AppState> for Arc<DraftBoard> {
    fn from_ref(state: &AppState) -> Self {
        state.drafts.clone()
    }
}

impl FromRef<AppState> for Arc<SessionManager> {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for ResultViewer {
    fn from_ref(state: &AppState) -> Self {
        state.results.clone()
    }
}
