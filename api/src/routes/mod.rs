pub mod handle;
pub mod health_route;
pub mod roles_route;
