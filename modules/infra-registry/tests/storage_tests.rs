#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Storage tests against an in-memory `SQLite` database.

use chrono::NaiveDate;
use infra_registry::DatabaseConfig;
use infra_registry::domain::bridge::{
    Bridge, BridgeChanges, BridgeCondition, BridgeDraft, BridgePatch,
};
use infra_registry::domain::patch::FieldPatch;
use infra_registry::domain::repo::ResourceRepository;
use infra_registry::domain::resource::{ListQuery, Resource};
use infra_registry::domain::service::ResourceService;
use infra_registry::domain::water_quality::{
    Readings, SampleDraft, WaterQualitySample, WaterQualityStatus,
};
use infra_registry::infra::storage::sea_orm_repo::SeaOrmRepository;
use infra_registry::module::migrate;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

async fn setup_db() -> DatabaseConnection {
    let db = DatabaseConfig::in_memory().connect().await.unwrap();
    migrate(&db).await.unwrap();
    db
}

fn draft(name: &str, condition: &str) -> BridgeDraft {
    BridgeDraft {
        name: Some(name.to_owned()),
        location: Some("Ring road".to_owned()),
        length_meters: Some(80.0),
        width_meters: Some(9.5),
        max_load_rating_tons: Some(30.0),
        condition: Some(condition.to_owned()),
        ..BridgeDraft::default()
    }
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = setup_db().await;
    migrate(&db).await.unwrap();
}

#[tokio::test]
async fn absent_rows_are_not_errors() {
    let repo = SeaOrmRepository::<Bridge>::new(setup_db().await);

    assert!(repo.get(42).await.unwrap().is_none());
    assert!(repo.update(42, BridgePatch::default()).await.unwrap().is_none());
    assert!(!repo.delete(42).await.unwrap());
}

#[tokio::test]
async fn ids_are_never_reused() {
    let repo = SeaOrmRepository::<Bridge>::new(setup_db().await);
    let first = repo
        .create(Bridge::validate_new(draft("A", "good")).unwrap())
        .await
        .unwrap();
    assert!(repo.delete(first.id).await.unwrap());

    let second = repo
        .create(Bridge::validate_new(draft("B", "good")).unwrap())
        .await
        .unwrap();

    assert!(second.id > first.id);
}

#[tokio::test]
async fn timestamps_track_creation_and_updates() {
    let db = setup_db().await;
    let svc = ResourceService::<Bridge>::new(Arc::new(SeaOrmRepository::new(db)));

    let created = svc.create(draft("Elm Street Bridge", "good")).await.unwrap();
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.condition, BridgeCondition::Good);

    let updated = svc
        .update(
            created.id,
            BridgeChanges {
                condition: FieldPatch::Set("critical".to_owned()),
                material: FieldPatch::Set("timber".to_owned()),
                ..BridgeChanges::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.condition, BridgeCondition::Critical);
    assert_eq!(updated.material.as_deref(), Some("timber"));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let fetched = svc.get(created.id).await.unwrap();
    assert_eq!(fetched.updated_at, updated.updated_at);
}

#[tokio::test]
async fn list_total_counts_filtered_rows_before_paging() {
    let db = setup_db().await;
    let svc = ResourceService::<Bridge>::new(Arc::new(SeaOrmRepository::new(db)));
    for i in 0..7 {
        let condition = if i < 4 { "poor" } else { "excellent" };
        svc.create(draft(&format!("Span {i}"), condition)).await.unwrap();
    }

    let page = svc
        .list(
            ListQuery::new()
                .with_category(BridgeCondition::Poor)
                .with_page(1, 2),
        )
        .await
        .unwrap();

    assert_eq!(page.total, 4);
    let names: Vec<_> = page.items.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Span 1", "Span 2"]);
}

#[tokio::test]
async fn sample_readings_roundtrip_through_storage() {
    let db = setup_db().await;
    let svc = ResourceService::<WaterQualitySample>::new(Arc::new(SeaOrmRepository::new(db)));

    let created = svc
        .create(SampleDraft {
            site_name: Some("Mill Pond".to_owned()),
            location: Some("Weir".to_owned()),
            sample_date: NaiveDate::from_ymd_opt(2024, 8, 12),
            readings: Readings {
                ph: Some(6.8),
                e_coli_count: Some(410),
                ..Readings::default()
            },
            status: Some("poor".to_owned()),
            notes: None,
        })
        .await
        .unwrap();

    let fetched = svc.get(created.id).await.unwrap();
    assert_eq!(fetched.readings.ph, Some(6.8));
    assert_eq!(fetched.readings.e_coli_count, Some(410));
    assert_eq!(fetched.readings.nitrates_mg_l, None);
    assert_eq!(fetched.status, WaterQualityStatus::Poor);

    let in_august = svc
        .list(ListQuery::new().with_dates(
            NaiveDate::from_ymd_opt(2024, 8, 1),
            NaiveDate::from_ymd_opt(2024, 8, 31),
        ))
        .await
        .unwrap();
    assert_eq!(in_august.total, 1);
}
