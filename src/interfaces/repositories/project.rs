use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{self, PgPool, Postgres, QueryBuilder};

use crate::{
    entities::project::{PageWindow, ProjectInsert, ProjectRow},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

/// Projects joined with their ordered technology tags and owner.
const PROJECT_SELECT: &str = r#"
    SELECT
        p.id,
        p.title,
        p.description,
        ARRAY(
            SELECT t.technology
            FROM project_technologies t
            WHERE t.project_id = p.id
            ORDER BY t.ordinal
        ) AS technologies_used,
        p.created_at,
        f.id AS freelancer_id,
        u.name AS freelancer_name,
        u.email AS freelancer_email,
        f.specialization AS freelancer_specialization,
        f.years_of_experience AS freelancer_years_of_experience,
        f.hourly_rate AS freelancer_hourly_rate
    FROM projects p
    JOIN freelancers f ON f.id = p.freelancer_id
    JOIN users u ON u.id = f.id
"#;

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Writes the project, its technologies and its search vectors in one
    /// transaction and returns the joined row.
    async fn create_project(&self, project: &ProjectInsert) -> Result<ProjectRow, AppError>;

    /// Full ranked result set, no limit.
    async fn search_by_title_or_technologies(&self, query: &str) -> Result<Vec<ProjectRow>, AppError>;

    async fn search_by_title_or_technologies_paginated(
        &self,
        query: &str,
        window: PageWindow,
    ) -> Result<Vec<ProjectRow>, AppError>;

    async fn find_by_freelancer_id(&self, freelancer_id: i64) -> Result<Vec<ProjectRow>, AppError>;
}

#[async_trait]
impl<T: ProjectRepository + ?Sized> ProjectRepository for Arc<T> {
    async fn create_project(&self, project: &ProjectInsert) -> Result<ProjectRow, AppError> {
        (**self).create_project(project).await
    }

    async fn search_by_title_or_technologies(&self, query: &str) -> Result<Vec<ProjectRow>, AppError> {
        (**self).search_by_title_or_technologies(query).await
    }

    async fn search_by_title_or_technologies_paginated(
        &self,
        query: &str,
        window: PageWindow,
    ) -> Result<Vec<ProjectRow>, AppError> {
        (**self).search_by_title_or_technologies_paginated(query, window).await
    }

    async fn find_by_freelancer_id(&self, freelancer_id: i64) -> Result<Vec<ProjectRow>, AppError> {
        (**self).find_by_freelancer_id(freelancer_id).await
    }
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }

    async fn ranked_search(
        &self,
        query: &str,
        window: Option<PageWindow>,
    ) -> Result<Vec<ProjectRow>, AppError> {
        let mut builder = ranked_search_query(query);

        if let Some(window) = window {
            builder.push(" LIMIT ").push_bind(window.limit);
            builder.push(" OFFSET ").push_bind(window.offset);
        }

        let rows = builder
            .build_query_as::<ProjectRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

/// A row matches when either vector matches; the score is the sum of both
/// ranks. Equal scores fall back to id order so pages never overlap.
fn ranked_search_query(query: &str) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new(PROJECT_SELECT);

    builder.push(" CROSS JOIN plainto_tsquery('english', ").push_bind(query).push(") AS q");
    builder.push(" WHERE p.title_tsv @@ q OR p.technologies_tsv @@ q");
    builder.push(
        " ORDER BY COALESCE(ts_rank(p.title_tsv, q), 0) + COALESCE(ts_rank(p.technologies_tsv, q), 0) DESC, p.id ASC",
    );

    builder
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn create_project(&self, project: &ProjectInsert) -> Result<ProjectRow, AppError> {
        let mut tx = self.pool.begin().await?;

        let project_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO projects (title, description, created_at, freelancer_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.created_at)
        .bind(project.freelancer_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("projects_freelancer_id_fkey") {
                    return AppError::NotFound(format!(
                        "Freelancer not found with id: {}",
                        project.freelancer_id
                    ));
                }
            }
            AppError::from(e)
        })?;

        sqlx::query(
            r#"
            INSERT INTO project_technologies (project_id, ordinal, technology)
            SELECT $1, t.ordinal::INTEGER, t.technology
            FROM UNNEST($2::TEXT[]) WITH ORDINALITY AS t(technology, ordinal)
            "#
        )
        .bind(project_id)
        .bind(&project.technologies_used)
        .execute(&mut *tx)
        .await?;

        sqlx::query("SELECT refresh_project_search_vectors($1)")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        let mut builder = QueryBuilder::<Postgres>::new(PROJECT_SELECT);
        builder.push(" WHERE p.id = ").push_bind(project_id);

        let row = builder
            .build_query_as::<ProjectRow>()
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row)
    }

    async fn search_by_title_or_technologies(&self, query: &str) -> Result<Vec<ProjectRow>, AppError> {
        self.ranked_search(query, None).await
    }

    async fn search_by_title_or_technologies_paginated(
        &self,
        query: &str,
        window: PageWindow,
    ) -> Result<Vec<ProjectRow>, AppError> {
        self.ranked_search(query, Some(window)).await
    }

    async fn find_by_freelancer_id(&self, freelancer_id: i64) -> Result<Vec<ProjectRow>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(PROJECT_SELECT);
        builder.push(" WHERE p.freelancer_id = ").push_bind(freelancer_id);
        builder.push(" ORDER BY p.id ASC");

        let rows = builder
            .build_query_as::<ProjectRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
