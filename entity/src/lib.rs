pub mod build;
pub mod clearance_token;
pub mod halo_xsts_token;
pub mod oauth_token;
pub mod prelude;
pub mod spartan_token;
pub mod user_token;
pub mod xsts_token;
