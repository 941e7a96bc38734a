//! Shared helper utilities for factory methods.

use sea_orm::DatabaseConnection;

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created row gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Seeds one fresh row of every kind the token chain depends on.
///
/// Creates, in chain order: an OAuth token, a user token, a generic XSTS
/// token, a Halo XSTS token, a spartan token, a clearance token, and a
/// build. Useful for tests that exercise data endpoints and must not
/// trigger any token issuance as a side effect.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(())` - All rows created
/// - `Err(DbErr)` - Database error during creation
pub async fn seed_fresh_chain(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    crate::factory::oauth_token::create_oauth_token(db).await?;
    crate::factory::user_token::create_user_token(db).await?;
    crate::factory::xsts_token::create_xsts_token(db).await?;
    crate::factory::halo_xsts_token::create_halo_xsts_token(db).await?;
    crate::factory::spartan_token::create_spartan_token(db).await?;
    crate::factory::clearance_token::create_clearance_token(db).await?;
    crate::factory::build::create_build(db).await?;

    Ok(())
}
