pub mod freelancers;
pub mod home;
pub mod portfolio;
pub mod system;
