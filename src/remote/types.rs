//! Wire shapes of the agency REST service and their flat public counterparts.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

const DEFAULT_IMAGE: &str = "/placeholder.svg";
const NO_CATEGORY: &str = "No category";

/// A value the service sends either as a number or as a string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(value) => write!(f, "{}", value),
            Scalar::Float(value) => write!(f, "{}", value),
            Scalar::Text(value) => f.write_str(value),
        }
    }
}

/// Read an explicit `null` the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn scalar_text(value: &Option<Scalar>) -> String {
    value.as_ref().map(Scalar::to_string).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl Category {
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteTechnology {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteProject {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub year: Option<Scalar>,
    #[serde(default)]
    pub duration: Option<Scalar>,
    #[serde(default)]
    pub staff_size: Option<Scalar>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technology: Vec<RemoteTechnology>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub characteristics: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteTeamMember {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub experience: Option<Scalar>,
    #[serde(default)]
    pub projects_done: Option<Scalar>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technology: Vec<RemoteTechnology>,
}

/// A project as the public pages present it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProject {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub category_slug: String,
    pub client: String,
    pub year: String,
    pub duration: String,
    pub team_size: String,
    pub technologies: Vec<String>,
    pub characteristics: Vec<String>,
}

impl From<RemoteProject> for PublicProject {
    fn from(remote: RemoteProject) -> Self {
        let (category, category_slug) = match &remote.category {
            Some(category) => (category.name.clone(), category.slug()),
            None => (NO_CATEGORY.to_string(), String::new()),
        };
        Self {
            id: remote.id,
            title: remote.title,
            description: remote.description,
            image: remote
                .logo
                .filter(|logo| !logo.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            category,
            category_slug,
            client: remote.client.unwrap_or_default(),
            year: scalar_text(&remote.year),
            duration: scalar_text(&remote.duration),
            team_size: scalar_text(&remote.staff_size),
            technologies: remote.technology.into_iter().map(|t| t.name).collect(),
            characteristics: remote.characteristics,
        }
    }
}

/// A team member as the public team carousel presents it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicTeamMember {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub description: String,
    pub image: String,
    pub experience: String,
    pub projects: String,
    pub skills: Vec<String>,
}

impl From<RemoteTeamMember> for PublicTeamMember {
    fn from(remote: RemoteTeamMember) -> Self {
        Self {
            id: remote.id,
            name: remote.full_name,
            role: remote.role,
            description: remote.description,
            image: remote
                .image
                .filter(|image| !image.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            experience: format!("{}+ yil", scalar_text(&remote.experience)),
            projects: format!("{}+", scalar_text(&remote.projects_done)),
            skills: remote.technology.into_iter().map(|t| t.name).collect(),
        }
    }
}

/// Lowercase a category name and join its words with `-`
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Filter keys for the public listing: `all` followed by one per category
pub fn category_filters(categories: &[Category]) -> Vec<(String, String)> {
    std::iter::once(("all".to_string(), "All".to_string()))
        .chain(categories.iter().map(|c| (c.slug(), c.name.clone())))
        .collect()
}

pub fn filter_by_category<'a>(projects: &'a [PublicProject], key: &str) -> Vec<&'a PublicProject> {
    projects
        .iter()
        .filter(|project| key == "all" || project.category_slug == key)
        .collect()
}
