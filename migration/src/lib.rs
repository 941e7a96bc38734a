pub use sea_orm_migration::prelude::*;

mod m20260110_000001_create_oauth_token_table;
mod m20260110_000002_create_user_token_table;
mod m20260110_000003_create_xsts_token_table;
mod m20260110_000004_create_halo_xsts_token_table;
mod m20260110_000005_create_spartan_token_table;
mod m20260110_000006_create_clearance_token_table;
mod m20260110_000007_create_build_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_create_oauth_token_table::Migration),
            Box::new(m20260110_000002_create_user_token_table::Migration),
            Box::new(m20260110_000003_create_xsts_token_table::Migration),
            Box::new(m20260110_000004_create_halo_xsts_token_table::Migration),
            Box::new(m20260110_000005_create_spartan_token_table::Migration),
            Box::new(m20260110_000006_create_clearance_token_table::Migration),
            Box::new(m20260110_000007_create_build_table::Migration),
        ]
    }
}
