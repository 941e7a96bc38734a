//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating token and build rows with
//! sensible defaults, reducing boilerplate in tests. Each table has its own
//! factory module with both a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! Factories default to *fresh* (non-expired) rows; use the expiry setters to
//! seed stale rows when testing the freshness algorithm:
//!
//! ```rust,ignore
//! use chrono::{Duration, Utc};
//! use test_utils::factory;
//!
//! // A spartan token that expired a minute ago
//! let stale = factory::spartan_token::SpartanTokenFactory::new(&db)
//!     .expires_utc(Utc::now() - Duration::minutes(1))
//!     .build()
//!     .await?;
//! ```

pub mod build;
pub mod clearance_token;
pub mod halo_xsts_token;
pub mod helpers;
pub mod oauth_token;
pub mod spartan_token;
pub mod user_token;
pub mod xsts_token;

// Re-export commonly used factory functions for concise usage
pub use build::create_build;
pub use clearance_token::create_clearance_token;
pub use halo_xsts_token::create_halo_xsts_token;
pub use oauth_token::create_oauth_token;
pub use spartan_token::create_spartan_token;
pub use user_token::create_user_token;
pub use xsts_token::create_xsts_token;
