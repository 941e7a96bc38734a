pub mod halo;
pub mod oauth;
