use super::*;

use crate::server::data::build::BuildRepository;

/// Tests that an empty builds table yields no build.
///
/// Expected: Ok(None)
#[tokio::test]
async fn newest_returns_none_when_no_builds() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BuildRepository::new(db);
    let newest = repo.newest().await?;

    assert!(newest.is_none());

    Ok(())
}

/// Tests that the build with the highest build_date wins, not the latest
/// insert.
///
/// Expected: Ok with the newer build id
#[tokio::test]
async fn newest_orders_by_build_date_not_insertion() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::build::BuildFactory::new(db)
        .build_id("6.10025.13343")
        .build_date(Utc::now())
        .build()
        .await?;
    factory::build::BuildFactory::new(db)
        .build_id("6.10022.10499")
        .build_date(Utc::now() - Duration::days(30))
        .build()
        .await?;

    let repo = BuildRepository::new(db);
    let newest = repo.newest().await?;

    assert_eq!(newest.unwrap().build_id, "6.10025.13343");

    Ok(())
}

/// Tests that get_all lists builds newest first.
///
/// Expected: Ok with descending build_date order
#[tokio::test]
async fn get_all_lists_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_token_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::build::BuildFactory::new(db)
        .build_id("old")
        .build_date(Utc::now() - Duration::days(60))
        .build()
        .await?;
    factory::build::BuildFactory::new(db)
        .build_id("new")
        .build_date(Utc::now())
        .build()
        .await?;

    let repo = BuildRepository::new(db);
    let all = repo.get_all().await?;

    assert_eq!(all.len(), 2);
    assert_eq!(all[0].build_id, "new");
    assert_eq!(all[1].build_id, "old");

    Ok(())
}
