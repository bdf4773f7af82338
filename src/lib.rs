use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases, validation};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{auth, db, web};

use repositories::{
    freelancer::FreelancerRepository,
    project::ProjectRepository,
    sqlx_repo::{SqlxFreelancerRepo, SqlxProjectRepo},
};
use use_cases::{freelancer::FreelancerHandler, portfolio::PortfolioHandler};

pub type DynFreelancerRepo = Arc<dyn FreelancerRepository>;
pub type DynProjectRepo = Arc<dyn ProjectRepository>;

pub type AppFreelancerHandler = FreelancerHandler<DynFreelancerRepo>;
pub type AppPortfolioHandler = PortfolioHandler<DynProjectRepo, DynFreelancerRepo>;

pub struct AppState {
    pub freelancer_handler: AppFreelancerHandler,
    pub portfolio_handler: AppPortfolioHandler,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let freelancer_repo: DynFreelancerRepo = Arc::new(SqlxFreelancerRepo::new(pool.clone()));
        let project_repo: DynProjectRepo = Arc::new(SqlxProjectRepo::new(pool));

        Self::from_repositories(freelancer_repo, project_repo, config.max_page_size)
    }

    /// Wires the use cases over any repository implementation.
    pub fn from_repositories(
        freelancer_repo: DynFreelancerRepo,
        project_repo: DynProjectRepo,
        max_page_size: u32,
    ) -> Self {
        AppState {
            freelancer_handler: FreelancerHandler::new(freelancer_repo.clone()),
            portfolio_handler: PortfolioHandler::new(project_repo, freelancer_repo, max_page_size),
        }
    }
}
