use axum::{
    Json,
    extract::{Path, Query as QueryParams, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::info;

use super::ApiState;
use crate::models::{Project, ProjectDraft, SiteSettings};
use crate::store::{FilterValue, Query, StoreError};

/// Optional narrowing of `GET /api/projects`, same semantics as the admin list screen
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    search: Option<String>,
    category: Option<String>,
    status: Option<String>,
}

impl ListParams {
    fn query(&self) -> Query {
        let facet = |value: &Option<String>| FilterValue::parse(value.as_deref().unwrap_or("all"));
        Query::search(self.search.clone().unwrap_or_default())
            .with_filter("category", facet(&self.category))
            .with_filter("status", facet(&self.status))
    }
}

pub async fn health() -> &'static str {
    "ok"
}

/// List stored projects in insertion order; without parameters that is every project
pub async fn list_projects(
    State(state): State<ApiState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Json<Vec<Project>> {
    let projects = state.projects.read().await;
    Json(
        projects
            .manager()
            .query(&params.query())
            .into_iter()
            .cloned()
            .collect(),
    )
}

pub async fn get_project(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<Project>, StoreError> {
    let projects = state.projects.read().await;
    projects
        .manager()
        .get(id)
        .cloned()
        .map(Json)
        .ok_or(StoreError::NotFound(id))
}

/// Store a new project as sent, missing fields left empty; the server assigns its id
pub async fn create_project(
    State(state): State<ApiState>,
    Json(draft): Json<ProjectDraft>,
) -> Result<(StatusCode, Json<Project>), StoreError> {
    let project = state.projects.write().await.append(draft).await?;
    info!("Created project {}", project.id);
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update_project(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(draft): Json<ProjectDraft>,
) -> Result<Json<Project>, StoreError> {
    let project = state.projects.write().await.update(id, draft).await?;
    info!("Updated project {}", id);
    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StoreError> {
    match state.projects.write().await.delete(id).await? {
        Some(_) => {
            info!("Deleted project {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(StoreError::NotFound(id)),
    }
}

pub async fn get_settings(State(state): State<ApiState>) -> Json<SiteSettings> {
    Json(state.settings.read().await.clone())
}

pub async fn update_settings(
    State(state): State<ApiState>,
    Json(settings): Json<SiteSettings>,
) -> Result<Json<SiteSettings>, StoreError> {
    let mut current = state.settings.write().await;
    if let Some(db) = &state.db {
        db.save_settings(&settings).await?;
    }
    *current = settings.clone();
    info!("Site settings updated");
    Ok(Json(settings))
}
