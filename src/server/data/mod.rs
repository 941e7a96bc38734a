//! Database operations for the token and build tables.
//!
//! The token chain manager exclusively owns the token tables: rows are only
//! ever inserted, never updated in place, and readers select the newest row by
//! the documented ordering column. Older rows are retained as a debug trail.

pub mod build;
pub mod clearance_token;
pub mod halo_xsts_token;
pub mod oauth_token;
pub mod spartan_token;
pub mod user_token;
pub mod xsts_token;

#[cfg(test)]
mod test;
