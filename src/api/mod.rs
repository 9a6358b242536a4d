//! HTTP API over the project store and site settings.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router, middleware,
    routing::get,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::config::Config;
use crate::db::{self, Database};
use crate::models::{Project, SiteSettings};
use crate::store::Collection;

mod auth;
mod handlers;
mod response;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct ApiState {
    projects: Arc<RwLock<Collection<Project>>>,
    settings: Arc<RwLock<SiteSettings>>,
    db: Option<Database>,
    admin_token: Option<Arc<str>>,
}

impl ApiState {
    pub fn new(
        projects: Collection<Project>,
        settings: SiteSettings,
        db: Option<Database>,
        admin_token: Option<&str>,
    ) -> Self {
        Self {
            projects: Arc::new(RwLock::new(projects)),
            settings: Arc::new(RwLock::new(settings)),
            db,
            admin_token: admin_token.map(Arc::from),
        }
    }

    fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref()
    }
}

/// Creates the API router
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route(
            "/api/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        .route(
            "/api/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_admin))
        .with_state(state)
}

/// Run the API until Ctrl-C
pub async fn serve(config: &Config, bind: Option<String>) -> Result<()> {
    let db = db::init(config).await?;

    // The project store starts empty; it only survives restarts with a database.
    let projects = Collection::open(db.clone(), Vec::new()).await?;
    info!(
        persistent = projects.is_persistent(),
        "Project store ready with {} projects",
        projects.manager().len()
    );
    let settings = match &db {
        Some(db) => db.load_settings().await?.unwrap_or_default(),
        None => SiteSettings::default(),
    };

    let state = ApiState::new(projects, settings, db, config.admin_token());
    let app = create_router(state);

    let addr = bind.unwrap_or_else(|| config.bind_addr.clone());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
