//! Store integration tests. They need a live PostgreSQL pointed to by
//! `DATABASE_URL` and are ignored by default:
//!
//! ```sh
//! cargo test -p database -- --ignored
//! ```
//!
//! Every test creates its own rows (tagged with a nonce so runs don't
//! interfere) and deletes them before finishing.

use chrono::{TimeZone, Utc};
use core_types::{BulkStatusUpdate, NewConference, NewParticipation, NewScientist};
use database::{
    ConferenceFilter, ConferenceSort, DbError, DbRepository, ParticipationSort, ScientistFilter,
    ScientistSort,
};
use query::{ListQuery, SortOrder};
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

async fn repo() -> DbRepository {
    let pool = database::connect().await.expect("DATABASE_URL must point to a test database");
    database::run_migrations(&pool).await.expect("migrations failed");
    DbRepository::new(pool)
}

fn nonce() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("test-{nanos}")
}

fn scientist(tag: &str, name: &str) -> NewScientist {
    NewScientist {
        full_name: name.to_string(),
        country: "Norway".to_string(),
        degree: "PhD".to_string(),
        specialization: "Databases".to_string(),
        organization: tag.to_string(),
        email: None,
        orcid: None,
        h_index: None,
    }
}

fn conference(tag: &str) -> NewConference {
    NewConference {
        topic: tag.to_string(),
        name: "Symposium on Query Shaping".to_string(),
        country: "Norway".to_string(),
        location: "Oslo".to_string(),
        date: Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap(),
        capacity: None,
    }
}

fn participation(scientist_id: i32, conference_id: i32) -> NewParticipation {
    NewParticipation {
        talk_title: "Bounded pagination in practice".to_string(),
        participation_type: "talk".to_string(),
        duration_minutes: 30,
        scientist_id,
        conference_id,
        status: None,
        metadata: None,
    }
}

fn page<S>(sort: S, order: SortOrder, limit: i64) -> ListQuery<S> {
    ListQuery {
        page: 1,
        limit,
        sort,
        order,
    }
}

#[tokio::test]
#[ignore = "requires a live DATABASE_URL"]
async fn create_then_fetch_round_trip_applies_defaults() {
    let repo = repo().await;
    let tag = nonce();

    let s = repo.create_scientist(&scientist(&tag, "Grace Hopper")).await.unwrap();
    assert!(s.id > 0);
    assert_eq!(s.h_index, 0, "omitted hIndex defaults to 0");

    let c = repo.create_conference(&conference(&tag)).await.unwrap();
    assert_eq!(c.capacity, 0, "omitted capacity defaults to 0");

    let p = repo.create_participation(&participation(s.id, c.id)).await.unwrap();
    assert_eq!(p.status, "confirmed", "omitted status defaults to confirmed");
    assert_eq!(p.metadata, None);

    let fetched = repo.find_scientist(s.id).await.unwrap();
    assert_eq!(fetched, s);
    let fetched = repo.find_conference(c.id).await.unwrap();
    assert_eq!(fetched, c);
    let fetched = repo.find_participation(p.id).await.unwrap();
    assert_eq!(fetched, p);

    repo.delete_participation(p.id).await.unwrap();
    repo.delete_scientist(s.id).await.unwrap();
    repo.delete_conference(c.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a live DATABASE_URL"]
async fn referenced_rows_cannot_be_deleted() {
    let repo = repo().await;
    let tag = nonce();

    let s = repo.create_scientist(&scientist(&tag, "Barbara Liskov")).await.unwrap();
    let c = repo.create_conference(&conference(&tag)).await.unwrap();
    let p = repo.create_participation(&participation(s.id, c.id)).await.unwrap();

    assert!(matches!(
        repo.delete_scientist(s.id).await,
        Err(DbError::ForeignKeyViolation(_))
    ));
    assert!(matches!(
        repo.delete_conference(c.id).await,
        Err(DbError::ForeignKeyViolation(_))
    ));

    repo.delete_participation(p.id).await.unwrap();
    repo.delete_scientist(s.id).await.unwrap();
    assert!(matches!(
        repo.find_scientist(s.id).await,
        Err(DbError::NotFound)
    ));
    repo.delete_conference(c.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a live DATABASE_URL"]
async fn participation_with_missing_references_is_rejected() {
    let repo = repo().await;
    let result = repo
        .create_participation(&participation(2_000_000_000, 2_000_000_000))
        .await;
    assert!(matches!(result, Err(DbError::ForeignKeyViolation(_))));
}

#[tokio::test]
#[ignore = "requires a live DATABASE_URL"]
async fn ascending_and_descending_sorts_are_reversed() {
    let repo = repo().await;
    let tag = nonce();

    let mut ids = Vec::new();
    for name in ["Alan Kay", "Niklaus Wirth", "Tony Hoare"] {
        ids.push(repo.create_scientist(&scientist(&tag, name)).await.unwrap().id);
    }

    let filter = ScientistFilter {
        organization: Some(tag.clone()),
        ..Default::default()
    };
    let (asc, total) = repo
        .list_scientists(&page(ScientistSort::FullName, SortOrder::Asc, 10), &filter)
        .await
        .unwrap();
    assert_eq!(total, 3);
    let (desc, _) = repo
        .list_scientists(&page(ScientistSort::FullName, SortOrder::Desc, 10), &filter)
        .await
        .unwrap();

    let mut reversed = desc.clone();
    reversed.reverse();
    assert_eq!(asc, reversed);

    for id in ids {
        repo.delete_scientist(id).await.unwrap();
    }
}

#[tokio::test]
#[ignore = "requires a live DATABASE_URL"]
async fn zero_match_filter_returns_empty_page_and_zero_total() {
    let repo = repo().await;
    let filter = ConferenceFilter {
        topic: Some(nonce()),
        ..Default::default()
    };
    let (rows, total) = repo
        .list_conferences(&page(ConferenceSort::Id, SortOrder::Asc, 10), &filter)
        .await
        .unwrap();
    assert!(rows.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
#[ignore = "requires a live DATABASE_URL"]
async fn bulk_status_update_touches_only_matching_rows() {
    let repo = repo().await;
    let tag = nonce();

    let s = repo.create_scientist(&scientist(&tag, "Edsger Dijkstra")).await.unwrap();
    let c = repo.create_conference(&conference(&tag)).await.unwrap();

    let mut pending = participation(s.id, c.id);
    pending.status = Some("pending".to_string());
    let p1 = repo.create_participation(&pending).await.unwrap();
    let p2 = repo.create_participation(&pending).await.unwrap();
    let p3 = repo.create_participation(&participation(s.id, c.id)).await.unwrap();

    let updated = repo
        .bulk_update_participation_status(&BulkStatusUpdate {
            conference_id: c.id,
            old_status: "pending".to_string(),
            new_status: "confirmed".to_string(),
            before_date: None,
        })
        .await
        .unwrap();
    assert_eq!(updated, 2, "exactly the two pending rows move");

    for id in [p1.id, p2.id, p3.id] {
        let row = repo.find_participation(id).await.unwrap();
        assert_eq!(row.status, "confirmed");
        repo.delete_participation(id).await.unwrap();
    }

    // A cutoff before the conference date matches nothing.
    let p4 = repo.create_participation(&pending).await.unwrap();
    let updated = repo
        .bulk_update_participation_status(&BulkStatusUpdate {
            conference_id: c.id,
            old_status: "pending".to_string(),
            new_status: "confirmed".to_string(),
            before_date: Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
        })
        .await
        .unwrap();
    assert_eq!(updated, 0);

    repo.delete_participation(p4.id).await.unwrap();
    repo.delete_scientist(s.id).await.unwrap();
    repo.delete_conference(c.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a live DATABASE_URL"]
async fn with_details_joins_the_owning_rows() {
    let repo = repo().await;
    let tag = nonce();

    let s = repo.create_scientist(&scientist(&tag, "Frances Allen")).await.unwrap();
    let c = repo.create_conference(&conference(&tag)).await.unwrap();
    let p = repo.create_participation(&participation(s.id, c.id)).await.unwrap();

    let (rows, total) = repo
        .list_participations_with_details(&page(ParticipationSort::Id, SortOrder::Desc, 100))
        .await
        .unwrap();
    assert!(total >= 1);
    let row = rows
        .iter()
        .find(|r| r.id == p.id)
        .expect("the seeded participation appears on the newest page");
    assert_eq!(row.scientist_id, s.id);
    assert_eq!(row.scientist_full_name, "Frances Allen");
    assert_eq!(row.conference_id, c.id);
    assert_eq!(row.conference_date, c.date);

    repo.delete_participation(p.id).await.unwrap();
    repo.delete_scientist(s.id).await.unwrap();
    repo.delete_conference(c.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a live DATABASE_URL"]
async fn metadata_regex_search_matches_case_insensitively() {
    let repo = repo().await;
    let tag = nonce();

    let s = repo.create_scientist(&scientist(&tag, "Margaret Hamilton")).await.unwrap();
    let c = repo.create_conference(&conference(&tag)).await.unwrap();
    let mut new = participation(s.id, c.id);
    new.metadata = Some(json!({ "keywords": [tag.to_uppercase()] }));
    let p = repo.create_participation(&new).await.unwrap();

    let hits = repo
        .search_participation_metadata(&tag, 10, 0)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, p.id);
    assert_eq!(hits[0].scientist_name, "Margaret Hamilton");
    assert_eq!(hits[0].conference_name, c.name);

    repo.delete_participation(p.id).await.unwrap();
    repo.delete_scientist(s.id).await.unwrap();
    repo.delete_conference(c.id).await.unwrap();
}
