use validator::Validate;

use crate::{
    auth::password::hash_password,
    entities::freelancer::{FreelancerResponse, RegisterFreelancerRequest},
    errors::AppError,
    repositories::freelancer::{FreelancerRepository, EMAIL_IN_USE},
};

pub fn freelancer_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Freelancer not found with id: {}", id))
}

pub struct FreelancerHandler<R>
where
    R: FreelancerRepository,
{
    pub freelancer_repo: R,
}

impl<R> FreelancerHandler<R>
where
    R: FreelancerRepository,
{
    pub fn new(freelancer_repo: R) -> Self {
        FreelancerHandler { freelancer_repo }
    }

    /// Registers a new freelancer after validation and password hashing.
    ///
    /// The email pre-check only gives an early answer; the unique
    /// constraint on `users.email` is what rejects concurrent duplicates.
    pub async fn register(
        &self,
        request: RegisterFreelancerRequest,
    ) -> Result<FreelancerResponse, AppError> {
        request.validate()?;

        if self.freelancer_repo.exists_by_email(&request.email).await? {
            tracing::warn!("Registration rejected: email already in use");
            return Err(AppError::Conflict(EMAIL_IN_USE.to_string()));
        }

        let password_hash = hash_password(&request.password)?;
        let insert = request.prepare_for_insert(password_hash);

        let freelancer = self.freelancer_repo.create_freelancer(&insert).await?;

        tracing::info!(freelancer_id = freelancer.account.id, "Freelancer registered");
        Ok(freelancer.into())
    }

    /// Retrieves the public representation of a freelancer
    pub async fn get_freelancer(&self, id: i64) -> Result<FreelancerResponse, AppError> {
        self.freelancer_repo
            .find_by_id(id)
            .await?
            .map(FreelancerResponse::from)
            .ok_or_else(|| freelancer_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::freelancer::{Account, Freelancer, FreelancerInsert, ACCOUNT_STATUS_ACTIVE};
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub FreelancerRepo {}

        #[async_trait]
        impl FreelancerRepository for FreelancerRepo {
            async fn check_connection(&self) -> Result<(), AppError>;
            async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;
            async fn find_by_id(&self, id: i64) -> Result<Option<Freelancer>, AppError>;
            async fn create_freelancer(&self, freelancer: &FreelancerInsert) -> Result<Freelancer, AppError>;
        }
    }

    fn ana() -> RegisterFreelancerRequest {
        RegisterFreelancerRequest {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            password: "secret1".into(),
            specialization: "Backend".into(),
            years_of_experience: Some(5),
            hourly_rate: Some(80.0),
        }
    }

    fn stored(id: i64, insert: &FreelancerInsert) -> Freelancer {
        Freelancer {
            account: Account {
                id,
                name: insert.name.clone(),
                email: insert.email.clone(),
                password_hash: insert.password_hash.clone(),
                created_at: insert.created_at,
                last_login: None,
                account_status: insert.account_status.clone(),
            },
            specialization: insert.specialization.clone(),
            years_of_experience: insert.years_of_experience,
            hourly_rate: insert.hourly_rate,
        }
    }

    #[actix_rt::test]
    async fn register_hashes_password_and_activates_account() {
        let mut repo = MockFreelancerRepo::new();
        repo.expect_exists_by_email()
            .withf(|email| email == "ana@x.com")
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_create_freelancer()
            .withf(|insert| {
                insert.account_status == ACCOUNT_STATUS_ACTIVE
                    && insert.password_hash.starts_with("$argon2id$")
                    && insert.password_hash != "secret1"
            })
            .times(1)
            .returning(|insert| Ok(stored(1, insert)));

        let handler = FreelancerHandler::new(repo);
        let response = handler.register(ana()).await.unwrap();

        assert_eq!(
            response,
            FreelancerResponse {
                id: 1,
                name: "Ana".into(),
                email: "ana@x.com".into(),
                specialization: "Backend".into(),
                years_of_experience: Some(5),
                hourly_rate: Some(80.0),
            }
        );
    }

    #[actix_rt::test]
    async fn register_with_known_email_is_a_conflict() {
        let mut repo = MockFreelancerRepo::new();
        repo.expect_exists_by_email().returning(|_| Ok(true));
        repo.expect_create_freelancer().never();

        let handler = FreelancerHandler::new(repo);
        let err = handler.register(ana()).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(msg) if msg == "Email already in use"));
    }

    #[actix_rt::test]
    async fn register_surfaces_constraint_conflict_when_precheck_races() {
        let mut repo = MockFreelancerRepo::new();
        repo.expect_exists_by_email().returning(|_| Ok(false));
        repo.expect_create_freelancer()
            .returning(|_| Err(AppError::Conflict(EMAIL_IN_USE.into())));

        let handler = FreelancerHandler::new(repo);
        let err = handler.register(ana()).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[actix_rt::test]
    async fn invalid_request_never_reaches_the_repository() {
        let mut repo = MockFreelancerRepo::new();
        repo.expect_exists_by_email().never();
        repo.expect_create_freelancer().never();

        let mut request = ana();
        request.password = "123".into();
        request.email = "not-an-email".into();

        let handler = FreelancerHandler::new(repo);
        let err = handler.register(request).await.unwrap_err();

        match err {
            AppError::ValidationError(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["email", "password"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[actix_rt::test]
    async fn missing_freelancer_reports_the_id() {
        let mut repo = MockFreelancerRepo::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let handler = FreelancerHandler::new(repo);
        let err = handler.get_freelancer(42).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(msg) if msg == "Freelancer not found with id: 42"));
    }

    #[actix_rt::test]
    async fn lookup_maps_to_public_representation() {
        let mut repo = MockFreelancerRepo::new();
        repo.expect_find_by_id()
            .withf(|id| *id == 1)
            .returning(|id| {
                let insert = ana().prepare_for_insert("$argon2id$hash".into());
                Ok(Some(stored(id, &insert)))
            });

        let handler = FreelancerHandler::new(repo);
        let response = handler.get_freelancer(1).await.unwrap();

        assert_eq!(response.id, 1);
        assert_eq!(response.email, "ana@x.com");
        assert_eq!(response.specialization, "Backend");
    }
}
