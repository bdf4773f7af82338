use validator::Validate;

use crate::{
    entities::project::{NewProjectRequest, PageWindow, ProjectResponse, ProjectRow},
    errors::AppError,
    repositories::{freelancer::FreelancerRepository, project::ProjectRepository},
    use_cases::freelancer::freelancer_not_found,
};

fn into_responses(rows: Vec<ProjectRow>) -> Vec<ProjectResponse> {
    rows.into_iter().map(ProjectResponse::from).collect()
}

pub struct PortfolioHandler<P, F>
where
    P: ProjectRepository,
    F: FreelancerRepository,
{
    pub project_repo: P,
    pub freelancer_repo: F,
    pub max_page_size: u32,
}

impl<P, F> PortfolioHandler<P, F>
where
    P: ProjectRepository,
    F: FreelancerRepository,
{
    pub fn new(project_repo: P, freelancer_repo: F, max_page_size: u32) -> Self {
        PortfolioHandler {
            project_repo,
            freelancer_repo,
            max_page_size,
        }
    }

    /// Adds a project to an existing freelancer's portfolio
    pub async fn add_project(
        &self,
        freelancer_id: i64,
        request: NewProjectRequest,
    ) -> Result<ProjectResponse, AppError> {
        request.validate()?;

        if self.freelancer_repo.find_by_id(freelancer_id).await?.is_none() {
            return Err(freelancer_not_found(freelancer_id));
        }

        let insert = request.prepare_for_insert(freelancer_id);
        let row = self.project_repo.create_project(&insert).await?;

        tracing::info!(project_id = row.id, freelancer_id, "Project added to portfolio");
        Ok(row.into())
    }

    /// Full ranked result set for `query`, without a limit
    pub async fn search_projects(&self, query: &str) -> Result<Vec<ProjectResponse>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self.project_repo.search_by_title_or_technologies(query).await?;
        Ok(into_responses(rows))
    }

    /// One zero-based page of the ranked result set. `size` is capped at
    /// `max_page_size`.
    pub async fn search_projects_paginated(
        &self,
        query: &str,
        page: u32,
        size: u32,
    ) -> Result<Vec<ProjectResponse>, AppError> {
        if size == 0 {
            return Err(AppError::BadRequest("Page size must be at least 1".to_string()));
        }

        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let window = PageWindow::new(page, size.min(self.max_page_size))
            .ok_or_else(|| AppError::BadRequest("Page is out of range".to_string()))?;
        let rows = self
            .project_repo
            .search_by_title_or_technologies_paginated(query, window)
            .await?;

        Ok(into_responses(rows))
    }

    /// Lists every project owned by a freelancer
    pub async fn get_projects_by_freelancer(
        &self,
        freelancer_id: i64,
    ) -> Result<Vec<ProjectResponse>, AppError> {
        let rows = self.project_repo.find_by_freelancer_id(freelancer_id).await?;
        Ok(into_responses(rows))
    }
}
