//! Per-build flight clearance token.
//!
//! The upstream response carries no TTL; expiry is derived from
//! `created_at`, which makes that column the source of truth for freshness.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clearance_token")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub flight_configuration_id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub created_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
