use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::validation::{not_blank, validate_technologies};
use crate::entities::{freelancer::FreelancerResponse, null_as_default};

pub const DEFAULT_PAGE: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A project joined with its technology tags and owning freelancer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub technologies_used: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub freelancer_id: i64,
    pub freelancer_name: String,
    pub freelancer_email: String,
    pub freelancer_specialization: String,
    pub freelancer_years_of_experience: Option<i32>,
    pub freelancer_hourly_rate: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ProjectInsert {
    pub freelancer_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub technologies_used: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub technologies_used: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub freelancer: FreelancerResponse,
}

impl From<ProjectRow> for ProjectResponse {
    fn from(row: ProjectRow) -> Self {
        ProjectResponse {
            id: row.id,
            title: row.title,
            description: row.description,
            technologies_used: row.technologies_used,
            created_at: row.created_at,
            freelancer: FreelancerResponse {
                id: row.freelancer_id,
                name: row.freelancer_name,
                email: row.freelancer_email,
                specialization: row.freelancer_specialization,
                years_of_experience: row.freelancer_years_of_experience,
                hourly_rate: row.freelancer_hourly_rate,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(
        length(min = 1, message = "At least one technology must be specified"),
        custom(function = "validate_technologies")
    )]
    pub technologies_used: Vec<String>,
}

impl NewProjectRequest {
    pub fn prepare_for_insert(&self, freelancer_id: i64) -> ProjectInsert {
        ProjectInsert {
            freelancer_id,
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            technologies_used: self
                .technologies_used
                .iter()
                .map(|t| t.trim().to_string())
                .collect(),
            created_at: Utc::now(),
        }
    }
}

/// `?freelancerId=` on the add-project endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProjectParams {
    pub freelancer_id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchParams {
    pub query: String,

    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default = "default_page_size")]
    pub size: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// A zero-based result window over a ranked search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

impl PageWindow {
    /// `None` when `page * size` does not fit in an `i64` offset.
    pub fn new(page: u32, size: u32) -> Option<Self> {
        let offset = i64::from(page).checked_mul(i64::from(size))?;

        Some(PageWindow {
            limit: i64::from(size),
            offset,
        })
    }
}
