use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::freelancer::{Account, Freelancer, FreelancerInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxFreelancerRepo,
};

pub const EMAIL_IN_USE: &str = "Email already in use";

#[async_trait]
pub trait FreelancerRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Freelancer>, AppError>;

    /// Inserts the account and its freelancer profile atomically.
    /// A duplicate email surfaces as `AppError::Conflict`.
    async fn create_freelancer(&self, freelancer: &FreelancerInsert) -> Result<Freelancer, AppError>;
}

#[async_trait]
impl<T: FreelancerRepository + ?Sized> FreelancerRepository for Arc<T> {
    async fn check_connection(&self) -> Result<(), AppError> {
        (**self).check_connection().await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        (**self).exists_by_email(email).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Freelancer>, AppError> {
        (**self).find_by_id(id).await
    }

    async fn create_freelancer(&self, freelancer: &FreelancerInsert) -> Result<Freelancer, AppError> {
        (**self).create_freelancer(freelancer).await
    }
}

impl SqlxFreelancerRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxFreelancerRepo { pool }
    }
}

#[async_trait]
impl FreelancerRepository for SqlxFreelancerRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)"
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Freelancer>, AppError> {
        let freelancer = sqlx::query_as::<_, Freelancer>(
            r#"
            SELECT
                u.id, u.name, u.email, u.password_hash,
                u.created_at, u.last_login, u.account_status,
                f.specialization, f.years_of_experience, f.hourly_rate
            FROM freelancers f
            JOIN users u ON u.id = f.id
            WHERE f.id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(freelancer)
    }

    async fn create_freelancer(&self, freelancer: &FreelancerInsert) -> Result<Freelancer, AppError> {
        let mut tx = self.pool.begin().await?;

        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO users (name, email, password_hash, created_at, account_status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, created_at, last_login, account_status
            "#
        )
        .bind(&freelancer.name)
        .bind(&freelancer.email)
        .bind(&freelancer.password_hash)
        .bind(freelancer.created_at)
        .bind(&freelancer.account_status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("users_email_key") {
                    return AppError::Conflict(EMAIL_IN_USE.into());
                }
            }
            AppError::from(e)
        })?;

        sqlx::query(
            r#"
            INSERT INTO freelancers (id, specialization, years_of_experience, hourly_rate)
            VALUES ($1, $2, $3, $4)
            "#
        )
        .bind(account.id)
        .bind(&freelancer.specialization)
        .bind(freelancer.years_of_experience)
        .bind(freelancer.hourly_rate)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Freelancer {
            account,
            specialization: freelancer.specialization.clone(),
            years_of_experience: freelancer.years_of_experience,
            hourly_rate: freelancer.hourly_rate,
        })
    }
}
