use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory, factory::helpers::seed_fresh_chain};

use crate::server::{
    error::{
        token::{TokenError, TokenKind},
        AppError,
    },
    service::halo::{
        chain::TokenChainService,
        transport::RequestBody,
    },
};

use super::support::*;

/// Tests that a fully fresh stored chain is reused as-is.
///
/// Expected: Ok with zero HTTP calls
#[tokio::test]
async fn fresh_chain_reuses_stored_rows_without_http() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    seed_fresh_chain(db).await?;

    let transport = FakeTransport::new();
    let settings = chain_settings();
    let chain = TokenChainService::new(db, &transport, &settings);

    let spartan = chain.get_spartan_token().await.unwrap();
    let clearance = chain.get_clearance().await.unwrap();

    assert_eq!(transport.request_count(), 0);
    assert!(!spartan.token.is_empty());
    assert!(!clearance.flight_configuration_id.is_empty());

    Ok(())
}

/// Tests the full reissue path from an expired OAuth token: refresh, user
/// identity, Halo XSTS, then spartan issuance, strictly in that order.
///
/// Expected: Ok with exactly four HTTP calls in chain order
#[tokio::test]
async fn expired_oauth_reissues_every_link_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::oauth_token::OAuthTokenFactory::new(db)
        .created_at(Utc::now() - Duration::hours(2))
        .expires_in(3600)
        .build()
        .await?;

    let transport = FakeTransport::new();
    transport.queue(200, oauth_refresh_body());
    transport.queue(200, identity_body("user-identity-token"));
    transport.queue(200, identity_body("halo-xsts-token"));
    transport.queue(201, spartan_body());

    let settings = chain_settings();
    let chain = TokenChainService::new(db, &transport, &settings);

    let spartan = chain.get_spartan_token().await.unwrap();

    assert_eq!(spartan.token, "spartan-token-value");

    let requests = transport.requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[0].url, "https://login.live.com/oauth20_token.srf");
    assert_eq!(
        requests[1].url,
        "https://user.auth.xboxlive.com/user/authenticate"
    );
    assert_eq!(
        requests[2].url,
        "https://xsts.auth.xboxlive.com/xsts/authorize"
    );
    assert_eq!(
        requests[3].url,
        "https://settings.svc.halowaypoint.com/spartan-token"
    );

    // The identity request must carry the refreshed access token, not the
    // stale one.
    let RequestBody::Json(body) = &requests[1].body else {
        panic!("identity request body was not JSON");
    };
    assert_eq!(
        body["Properties"]["RpsTicket"].as_str(),
        Some("d=fresh-access")
    );
    assert_eq!(requests[1].header_value("x-xbl-contract-version"), Some("1"));

    Ok(())
}

/// Tests that an expired stored row is treated exactly like an absent one.
///
/// Expected: Ok with one issuance call
#[tokio::test]
async fn expired_row_is_treated_like_absent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::oauth_token::create_oauth_token(db).await?;
    factory::user_token::UserTokenFactory::new(db)
        .not_after(Utc::now() - Duration::minutes(1))
        .build()
        .await?;

    let transport = FakeTransport::new();
    transport.queue(200, identity_body("new-user-token"));

    let settings = chain_settings();
    let chain = TokenChainService::new(db, &transport, &settings);

    let user_token = chain.get_user_token().await.unwrap();

    assert_eq!(transport.request_count(), 1);
    assert_eq!(user_token.token, "new-user-token");

    Ok(())
}

/// Tests that upstream timestamps with 7-digit fractional seconds are
/// truncated to second precision when persisted.
///
/// Expected: Ok with not_after at second precision
#[tokio::test]
async fn persists_truncated_upstream_timestamps() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::oauth_token::create_oauth_token(db).await?;

    let transport = FakeTransport::new();
    transport.queue(200, identity_body("user-token"));

    let settings = chain_settings();
    let chain = TokenChainService::new(db, &transport, &settings);

    let user_token = chain.get_user_token().await.unwrap();

    assert_eq!(user_token.not_after.timestamp_subsec_nanos(), 0);
    assert!(user_token.not_after > Utc::now());

    Ok(())
}

/// Tests that a clearance row just inside the 870 second window is reused.
/// Expiry derives from created_at; the token value itself is immaterial.
///
/// Expected: reuse with zero HTTP calls
#[tokio::test]
async fn clearance_just_inside_window_is_reused() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::spartan_token::create_spartan_token(db).await?;
    factory::build::create_build(db).await?;
    factory::clearance_token::ClearanceTokenFactory::new(db)
        .flight_configuration_id("inside-window")
        .created_at(Utc::now() - Duration::seconds(860))
        .build()
        .await?;

    let transport = FakeTransport::new();
    let settings = chain_settings();
    let chain = TokenChainService::new(db, &transport, &settings);

    let clearance = chain.get_clearance().await.unwrap();

    assert_eq!(clearance.flight_configuration_id, "inside-window");
    assert_eq!(transport.request_count(), 0);

    Ok(())
}

/// Tests that a clearance row just past the 870 second window is replaced.
///
/// Expected: one issuance call returning the fresh flight id
#[tokio::test]
async fn clearance_past_window_reissues() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::spartan_token::create_spartan_token(db).await?;
    factory::build::create_build(db).await?;
    factory::clearance_token::ClearanceTokenFactory::new(db)
        .flight_configuration_id("past-window")
        .created_at(Utc::now() - Duration::seconds(880))
        .build()
        .await?;

    let transport = FakeTransport::new();
    transport.queue(200, clearance_body());

    let settings = chain_settings();
    let chain = TokenChainService::new(db, &transport, &settings);

    let clearance = chain.get_clearance().await.unwrap();

    assert_eq!(clearance.flight_configuration_id, "flight-xyz");
    assert_eq!(transport.request_count(), 1);

    Ok(())
}

/// Tests that two clearance requests inside the freshness window make exactly
/// one HTTP call.
///
/// Expected: one issuance, second call served from storage
#[tokio::test]
async fn clearance_requested_twice_issues_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::spartan_token::create_spartan_token(db).await?;
    factory::build::create_build(db).await?;

    let transport = FakeTransport::new();
    transport.queue(200, clearance_body());

    let settings = chain_settings();
    let chain = TokenChainService::new(db, &transport, &settings);

    let first = chain.get_clearance().await.unwrap();
    let second = chain.get_clearance().await.unwrap();

    assert_eq!(transport.request_count(), 1);
    assert_eq!(first.flight_configuration_id, "flight-xyz");
    assert_eq!(
        second.flight_configuration_id,
        first.flight_configuration_id
    );

    Ok(())
}

/// Tests that a missing build row fails clearance before any HTTP call is
/// attempted.
///
/// Expected: Err(Unavailable(Clearance)) with zero HTTP calls
#[tokio::test]
async fn missing_build_fails_clearance_without_http() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::spartan_token::create_spartan_token(db).await?;

    let transport = FakeTransport::new();
    let settings = chain_settings();
    let chain = TokenChainService::new(db, &transport, &settings);

    let result = chain.get_clearance().await;

    assert!(matches!(
        result,
        Err(AppError::TokenErr(TokenError::Unavailable(
            TokenKind::Clearance
        )))
    ));
    assert_eq!(transport.request_count(), 0);

    Ok(())
}

/// Tests that a failed link persists nothing: a rejected OAuth refresh leaves
/// the stale row as the only row and no downstream rows appear.
///
/// Expected: Err(Unavailable(OAuth)), tables unchanged
#[tokio::test]
async fn failed_refresh_persists_nothing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::oauth_token::OAuthTokenFactory::new(db)
        .created_at(Utc::now() - Duration::hours(2))
        .build()
        .await?;

    let transport = FakeTransport::new();
    transport.queue(400, serde_json::json!({ "error": "invalid_grant" }));

    let settings = chain_settings();
    let chain = TokenChainService::new(db, &transport, &settings);

    let result = chain.get_spartan_token().await;

    assert!(matches!(
        result,
        Err(AppError::TokenErr(TokenError::Unavailable(TokenKind::OAuth)))
    ));
    assert_eq!(entity::prelude::OAuthToken::find().count(db).await?, 1);
    assert_eq!(entity::prelude::UserToken::find().count(db).await?, 0);
    assert_eq!(entity::prelude::SpartanToken::find().count(db).await?, 0);

    Ok(())
}

/// Tests that a non-200 from the identity provider surfaces as the user token
/// kind and persists nothing.
///
/// Expected: Err(Unavailable(UserToken))
#[tokio::test]
async fn identity_rejection_surfaces_user_token_kind() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::oauth_token::create_oauth_token(db).await?;

    let transport = FakeTransport::new();
    transport.queue(401, serde_json::json!({}));

    let settings = chain_settings();
    let chain = TokenChainService::new(db, &transport, &settings);

    let result = chain.get_user_token().await;

    assert!(matches!(
        result,
        Err(AppError::TokenErr(TokenError::Unavailable(
            TokenKind::UserToken
        )))
    ));
    assert_eq!(entity::prelude::UserToken::find().count(db).await?, 0);

    Ok(())
}

/// Tests that the generic and Halo XSTS requests differ only in relying
/// party.
///
/// Expected: matching bodies except RelyingParty
#[tokio::test]
async fn xsts_requests_differ_only_in_relying_party() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::oauth_token::create_oauth_token(db).await?;
    factory::user_token::create_user_token(db).await?;

    let transport = FakeTransport::new();
    transport.queue(200, identity_body("generic-xsts"));
    transport.queue(200, identity_body("halo-xsts"));

    let settings = chain_settings();
    let chain = TokenChainService::new(db, &transport, &settings);

    chain.get_xsts_token().await.unwrap();
    chain.get_halo_xsts_token().await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);

    let RequestBody::Json(generic) = &requests[0].body else {
        panic!("generic xsts body was not JSON");
    };
    let RequestBody::Json(halo) = &requests[1].body else {
        panic!("halo xsts body was not JSON");
    };

    assert_eq!(generic["RelyingParty"].as_str(), Some("http://xboxlive.com"));
    assert_eq!(
        halo["RelyingParty"].as_str(),
        Some("https://prod.xsts.halowaypoint.com/")
    );
    assert_eq!(generic["Properties"], halo["Properties"]);

    Ok(())
}
