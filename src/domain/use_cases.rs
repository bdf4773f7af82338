pub mod freelancer;
pub mod portfolio;
