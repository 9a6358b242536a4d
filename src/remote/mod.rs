//! Client for the agency's public REST service.
//!
//! List endpoints never fail from the caller's point of view: errors are
//! logged and an empty list comes back, which is what the public pages render.
//! Single-item lookups and the contact form report their errors.

mod types;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::ContactForm;

pub use types::{Category, PublicProject, PublicTeamMember, category_filters, filter_by_category};
use types::{RemoteProject, RemoteTeamMember};

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("project {0} not found")]
    NotFound(i64),
    #[error("service answered with status {0}")]
    Status(StatusCode),
}

#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }

        Ok(response.json::<T>().await?)
    }

    pub async fn fetch_projects(&self) -> Vec<PublicProject> {
        match self.get_json::<Vec<RemoteProject>>("/api/projects/").await {
            Ok(projects) => projects.into_iter().map(PublicProject::from).collect(),
            Err(e) => {
                warn!("Failed to load projects: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn fetch_project(&self, id: i64) -> Result<PublicProject, RemoteError> {
        match self
            .get_json::<RemoteProject>(&format!("/api/projects/{}/", id))
            .await
        {
            Ok(project) => Ok(project.into()),
            Err(RemoteError::Status(status)) if status == StatusCode::NOT_FOUND => {
                Err(RemoteError::NotFound(id))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn fetch_categories(&self) -> Vec<Category> {
        self.get_json::<Vec<Category>>("/api/categories/")
            .await
            .unwrap_or_else(|e| {
                warn!("Failed to load categories: {}", e);
                Vec::new()
            })
    }

    pub async fn fetch_team(&self) -> Vec<PublicTeamMember> {
        match self.get_json::<Vec<RemoteTeamMember>>("/api/team/").await {
            Ok(members) => members.into_iter().map(PublicTeamMember::from).collect(),
            Err(e) => {
                warn!("Failed to load team: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn submit_contact(&self, form: &ContactForm) -> Result<(), RemoteError> {
        let response = self
            .http
            .post(self.url("/api/contact/"))
            .json(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Contact form rejected with status {}", status);
            return Err(RemoteError::Status(status));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_projects_adapts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/projects/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "title": "CRM", "category": {"name": "CRM Systems"}, "staff_size": 4},
                {"id": 2, "title": "Shop"}
            ])))
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri());
        let projects = client.fetch_projects().await;

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].category_slug, "crm-systems");
        assert_eq!(projects[0].team_size, "4");
        assert_eq!(projects[1].category, "No category");
        assert_eq!(filter_by_category(&projects, "crm-systems").len(), 1);
        assert_eq!(filter_by_category(&projects, "all").len(), 2);
    }

    #[tokio::test]
    async fn null_fields_keep_the_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/projects/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "title": "A", "description": null, "category": null, "technology": null},
                {"id": 2, "title": "B"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/team/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 7, "full_name": "Sardor", "role": null, "technology": [{"name": null}]}
            ])))
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri());
        let projects = client.fetch_projects().await;

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].title, "A");
        assert_eq!(projects[0].description, "");
        assert_eq!(projects[0].category, "No category");
        assert_eq!(projects[1].title, "B");

        let team = client.fetch_team().await;
        assert_eq!(team.len(), 1);
        assert_eq!(team[0].role, "");
        assert_eq!(team[0].skills, vec![String::new()]);
    }

    #[tokio::test]
    async fn list_failures_become_empty_lists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/projects/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/team/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri());

        assert!(client.fetch_projects().await.is_empty());
        assert!(client.fetch_team().await.is_empty());
        assert!(client.fetch_categories().await.is_empty());
    }

    #[tokio::test]
    async fn fetch_project_maps_404_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/projects/7/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "title": "Bank"})))
            .mount(&server)
            .await;

        let client = RemoteClient::new(format!("{}/", server.uri()));

        let project = client.fetch_project(7).await.unwrap();
        assert_eq!(project.title, "Bank");
        assert!(matches!(client.fetch_project(8).await, Err(RemoteError::NotFound(8))));
    }

    #[tokio::test]
    async fn submit_contact_posts_form() {
        let server = MockServer::start().await;
        let form = ContactForm {
            name: "Akmal".into(),
            phone: "+998901234567".into(),
            email: "akmal@example.com".into(),
            message: "Salom".into(),
        };
        Mock::given(method("POST"))
            .and(path("/api/contact/"))
            .and(body_json(json!({
                "name": "Akmal",
                "phone": "+998901234567",
                "email": "akmal@example.com",
                "message": "Salom"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri());
        client.submit_contact(&form).await.unwrap();
    }

    #[tokio::test]
    async fn submit_contact_reports_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/contact/"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri());
        let result = client.submit_contact(&ContactForm::default()).await;
        assert!(matches!(result, Err(RemoteError::Status(s)) if s == StatusCode::BAD_REQUEST));
    }
}
