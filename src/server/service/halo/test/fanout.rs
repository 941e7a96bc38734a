use chrono::{DateTime, Duration, Utc};
use sea_orm::DbErr;
use serde_json::{json, Value};
use test_utils::{builder::TestBuilder, factory::helpers::seed_fresh_chain};

use crate::server::service::halo::client::{HaloClient, MatchType, PRINCIPALS_PER_CALL};

use super::support::*;

fn csr_entry(xuid: u64) -> Value {
    json!({
        "Id": format!("xuid({})", xuid),
        "Result": {
            "Current": { "Value": 1200, "Tier": "Gold", "SubTier": 2 },
            "SeasonMax": { "Value": 1250, "Tier": "Gold", "SubTier": 4 },
            "AllTimeMax": { "Value": 1300, "Tier": "Platinum", "SubTier": 0 },
        },
    })
}

fn csr_page(xuids: &[u64]) -> Value {
    json!({ "Value": xuids.iter().map(|x| csr_entry(*x)).collect::<Vec<_>>() })
}

fn career_entry(xuid: u64, rank: i64) -> Value {
    json!({
        "Id": format!("xuid({})", xuid),
        "Result": { "CurrentProgress": { "Rank": rank, "PartialProgress": 0 } },
    })
}

fn match_entry(start_time: DateTime<Utc>) -> Value {
    json!({ "MatchInfo": { "StartTime": upstream_timestamp(start_time) } })
}

/// Tests that multi-principal CSR lookups issue ceil(n/30) calls and shape
/// every returned entry, across the chunking boundaries.
///
/// Expected: call count matches ceil(n/30), one key per id
#[tokio::test]
async fn csr_chunking_issues_one_call_per_thirty_ids() -> Result<(), DbErr> {
    for n in [0usize, 1, 29, 30, 31, 60, 61] {
        let test = TestBuilder::new()
            .with_token_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        seed_fresh_chain(db).await?;

        let xuids: Vec<u64> = (1..=n as u64).collect();
        let expected_calls = n.div_ceil(PRINCIPALS_PER_CALL);

        let transport = FakeTransport::new();
        for chunk in xuids.chunks(PRINCIPALS_PER_CALL) {
            transport.queue(200, csr_page(chunk));
        }

        let settings = chain_settings();
        let client = HaloClient::new(db, &transport, &settings);

        let shaped = client.get_csrs(&xuids, "playlist-1").await.unwrap();

        assert_eq!(transport.request_count(), expected_calls, "n = {}", n);
        assert_eq!(shaped.len(), n, "n = {}", n);
    }

    Ok(())
}

/// Tests that chunk boundaries land where expected: 31 ids issue two calls,
/// the first carrying ids 1-30 and the second carrying id 31.
///
/// Expected: two calls, 31 shaped keys
#[tokio::test]
async fn csr_chunks_split_at_thirty_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    seed_fresh_chain(db).await?;

    let xuids: Vec<u64> = (1..=31).collect();

    let transport = FakeTransport::new();
    transport.queue(200, csr_page(&xuids[..30]));
    transport.queue(200, csr_page(&xuids[30..]));

    let settings = chain_settings();
    let client = HaloClient::new(db, &transport, &settings);

    let shaped = client.get_csrs(&xuids, "playlist-1").await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].url.contains("xuid(1),"));
    assert!(requests[0].url.contains("xuid(30)"));
    assert!(!requests[0].url.contains("xuid(31)"));
    assert!(requests[1].url.ends_with("players=xuid(31)"));
    assert_eq!(shaped.len(), 31);

    Ok(())
}

/// Tests the soft-fail contract across a batch: a 404 on the second chunk
/// drops that chunk's entries and keeps the first chunk's.
///
/// Expected: 30 shaped keys, no error
#[tokio::test]
async fn csr_batch_keeps_successful_chunks_on_soft_fail() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    seed_fresh_chain(db).await?;

    let xuids: Vec<u64> = (1..=31).collect();

    let transport = FakeTransport::new();
    transport.queue(200, csr_page(&xuids[..30]));
    transport.queue(404, json!({}));

    let settings = chain_settings();
    let client = HaloClient::new(db, &transport, &settings);

    let shaped = client.get_csrs(&xuids, "playlist-1").await.unwrap();

    assert_eq!(transport.request_count(), 2);
    assert_eq!(shaped.len(), 30);
    assert!(!shaped.contains_key(&31));

    Ok(())
}

/// Tests that career rank fan-out concatenates RewardTracks in chunk order
/// and decorates each entry with its ladder label.
///
/// Expected: results in input order with labels
#[tokio::test]
async fn career_ranks_concatenate_in_input_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    seed_fresh_chain(db).await?;

    let xuids: Vec<u64> = (1..=31).collect();

    let transport = FakeTransport::new();
    transport.queue(
        200,
        json!({
            "RewardTracks": xuids[..30]
                .iter()
                .map(|x| career_entry(*x, *x as i64))
                .collect::<Vec<_>>(),
        }),
    );
    transport.queue(
        200,
        json!({ "RewardTracks": [career_entry(31, 272)] }),
    );

    let settings = chain_settings();
    let client = HaloClient::new(db, &transport, &settings);

    let ranks = client.get_career_ranks(&xuids).await.unwrap();

    assert_eq!(transport.request_count(), 2);
    assert_eq!(ranks.len(), 31);
    let returned: Vec<u64> = ranks.iter().map(|dto| dto.xuid).collect();
    assert_eq!(returned, xuids);
    assert_eq!(ranks[0].label, "Recruit");
    assert_eq!(ranks[30].label, "Hero");

    Ok(())
}

/// Tests UGC pagination termination: 25 + 5 results against an estimated
/// total of 30 stop after exactly two calls.
///
/// Expected: 30 results, two calls
#[tokio::test]
async fn ugc_search_paginates_until_estimated_total() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    seed_fresh_chain(db).await?;

    let transport = FakeTransport::new();
    transport.queue(
        200,
        json!({
            "Count": 25,
            "EstimatedTotal": 30,
            "Results": (0..25).map(|i| json!({ "AssetId": i })).collect::<Vec<_>>(),
        }),
    );
    transport.queue(
        200,
        json!({
            "Count": 5,
            "EstimatedTotal": 30,
            "Results": (25..30).map(|i| json!({ "AssetId": i })).collect::<Vec<_>>(),
        }),
    );

    let settings = chain_settings();
    let client = HaloClient::new(db, &transport, &settings);

    let results = client.search_ugc_by_author(42, 25).await.unwrap();

    assert_eq!(results.len(), 30);
    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].url.contains("start=0"));
    assert!(requests[1].url.contains("start=25"));

    Ok(())
}

/// Tests that a soft-failed UGC page terminates the walk with the results
/// accumulated so far.
///
/// Expected: first page's results only
#[tokio::test]
async fn ugc_search_stops_on_failed_page() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    seed_fresh_chain(db).await?;

    let transport = FakeTransport::new();
    transport.queue(
        200,
        json!({
            "Count": 25,
            "EstimatedTotal": 100,
            "Results": (0..25).map(|i| json!({ "AssetId": i })).collect::<Vec<_>>(),
        }),
    );
    transport.queue(503, json!({}));

    let settings = chain_settings();
    let client = HaloClient::new(db, &transport, &settings);

    let results = client.search_ugc_by_author(42, 25).await.unwrap();

    assert_eq!(results.len(), 25);
    assert_eq!(transport.request_count(), 2);

    Ok(())
}

/// Tests date-windowed match enumeration: pages are walked until a match
/// older than the window start appears, then the accumulated list is
/// filtered to the window.
///
/// Expected: only in-window matches, enumeration stopped on first page
#[tokio::test]
async fn matches_between_filters_to_window() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    seed_fresh_chain(db).await?;

    let now = Utc::now();
    let window_start = now - Duration::days(1);
    let window_end = now;

    let transport = FakeTransport::new();
    transport.queue(
        200,
        json!({
            "Results": [
                match_entry(now - Duration::hours(1)),
                match_entry(now - Duration::hours(6)),
                match_entry(now - Duration::days(2)),
            ],
        }),
    );

    let settings = chain_settings();
    let client = HaloClient::new(db, &transport, &settings);

    let matches = client
        .get_matches_between(42, window_start, window_end, MatchType::Matchmaking)
        .await
        .unwrap();

    assert_eq!(matches.len(), 2);
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.contains("type=Matchmaking"));

    Ok(())
}

/// Tests that an empty page terminates match enumeration.
///
/// Expected: two calls, all first-page matches returned
#[tokio::test]
async fn matches_between_stops_on_empty_page() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    seed_fresh_chain(db).await?;

    let now = Utc::now();

    let transport = FakeTransport::new();
    transport.queue(
        200,
        json!({
            "Results": (1..=25)
                .map(|i| match_entry(now - Duration::minutes(i)))
                .collect::<Vec<_>>(),
        }),
    );
    transport.queue(200, json!({ "Results": [] }));

    let settings = chain_settings();
    let client = HaloClient::new(db, &transport, &settings);

    let matches = client
        .get_matches_between(42, now - Duration::days(1), now, MatchType::All)
        .await
        .unwrap();

    assert_eq!(matches.len(), 25);
    assert_eq!(transport.request_count(), 2);

    Ok(())
}
