pub mod auth;
pub mod build;
pub mod halo;
