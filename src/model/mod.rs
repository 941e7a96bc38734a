//! API-facing data transfer objects shared by the request handlers.

pub mod api;
pub mod halo;
