use sea_orm::DbErr;
use serde_json::json;
use test_utils::{builder::TestBuilder, factory::helpers::seed_fresh_chain};

use crate::server::service::halo::envelope::ApiEnvelope;

use super::support::*;

/// Tests that a bearer-only request carries the spartan header and never the
/// clearance header, even though a fresh clearance row exists.
///
/// Expected: spartan header present, clearance header absent
#[tokio::test]
async fn bearer_only_request_omits_clearance_header() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    seed_fresh_chain(db).await?;

    let transport = FakeTransport::new();
    transport.queue(200, json!({ "ok": true }));

    let settings = chain_settings();
    let envelope = ApiEnvelope::new(db, &transport, &settings);

    let body = envelope
        .get("https://halostats.svc.halowaypoint.com/hi/test", true, false)
        .await
        .unwrap();

    assert_eq!(body, json!({ "ok": true }));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .header_value("x-343-authorization-spartan")
        .is_some());
    assert!(requests[0].header_value("343-clearance").is_none());
    assert_eq!(
        requests[0].header_value("User-Agent"),
        Some("HaloWaypoint/2021112313511900 CFNetwork/1327.0.4 Darwin/21.2.0")
    );

    Ok(())
}

/// Tests that requesting both credentials attaches both headers.
///
/// Expected: spartan and clearance headers present
#[tokio::test]
async fn bearer_and_clearance_request_carries_both_headers() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    seed_fresh_chain(db).await?;

    let transport = FakeTransport::new();
    transport.queue(200, json!({}));

    let settings = chain_settings();
    let envelope = ApiEnvelope::new(db, &transport, &settings);

    envelope
        .get("https://skill.svc.halowaypoint.com/hi/test", true, true)
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .header_value("x-343-authorization-spartan")
        .is_some());
    assert!(requests[0].header_value("343-clearance").is_some());

    Ok(())
}

/// Tests the soft-fail contract: a non-200 data response collapses to an
/// empty JSON object instead of raising.
///
/// Expected: Ok({})
#[tokio::test]
async fn non_200_collapses_to_empty_object() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    seed_fresh_chain(db).await?;

    let transport = FakeTransport::new();
    transport.queue(404, json!({ "error": "not found" }));

    let settings = chain_settings();
    let envelope = ApiEnvelope::new(db, &transport, &settings);

    let body = envelope
        .get(
            "https://halostats.svc.halowaypoint.com/hi/matches/missing/stats",
            true,
            false,
        )
        .await
        .unwrap();

    assert_eq!(body, json!({}));

    Ok(())
}
