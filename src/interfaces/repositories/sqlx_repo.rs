use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxFreelancerRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
}
