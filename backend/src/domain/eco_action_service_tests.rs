//! Tests for the EcoAction domain service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockable::MockClock;

use super::*;
use crate::domain::ports::{EcoActionRepositoryError, MockEcoActionRepository};
use crate::domain::{ActionType, EcoActionId, ErrorCode, GeoPoint, UserId};

fn request() -> LogActionRequest {
    LogActionRequest {
        user_id: UserId::new("U1").expect("uid"),
        action_type: ActionType::TreePlanted,
        notes: None,
        location: GeoPoint::new(23.0225, 72.5714).expect("valid point"),
    }
}

fn fixed_clock() -> Arc<dyn mockable::Clock> {
    let mut clock = MockClock::new();
    clock
        .expect_utc()
        .return_const(Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).single().expect("timestamp"));
    Arc::new(clock)
}

#[tokio::test]
async fn stamps_record_with_clock_time_and_unverified_flag() {
    let expected_at = Utc
        .with_ymd_and_hms(2026, 8, 26, 12, 0, 0)
        .single()
        .expect("timestamp");

    let mut repository = MockEcoActionRepository::new();
    repository
        .expect_insert()
        .withf(move |record| {
            record.user_id().as_ref() == "U1"
                && record.recorded_at() == expected_at
                && !record.verified()
                && record.notes().is_empty()
        })
        .times(1)
        .returning(|_| Ok(EcoActionId::new("doc-1").expect("id")));

    let service = EcoActionService::new(Arc::new(repository), fixed_clock());
    let response = service.log_action(request()).await.expect("insert succeeds");
    assert_eq!(response.action_id.as_ref(), "doc-1");
}

#[tokio::test]
async fn preserves_submitted_notes() {
    let mut repository = MockEcoActionRepository::new();
    repository
        .expect_insert()
        .withf(|record| record.notes() == "sapling by the river")
        .times(1)
        .returning(|_| Ok(EcoActionId::new("doc-2").expect("id")));

    let service = EcoActionService::new(Arc::new(repository), fixed_clock());
    let mut logged = request();
    logged.notes = Some("sapling by the river".to_owned());
    service.log_action(logged).await.expect("insert succeeds");
}

#[tokio::test]
async fn maps_store_failures_to_internal_errors() {
    let mut repository = MockEcoActionRepository::new();
    repository
        .expect_insert()
        .times(1)
        .returning(|_| Err(EcoActionRepositoryError::transport("connection refused")));

    let service = EcoActionService::new(Arc::new(repository), fixed_clock());
    let error = service.log_action(request()).await.expect_err("store down");
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert!(error.message().contains("connection refused"));
}

#[tokio::test]
async fn no_insert_survives_a_failed_call() {
    // times(1) on the mock above already pins exactly one insert per call;
    // this covers the failure path performing exactly one attempt too.
    let mut repository = MockEcoActionRepository::new();
    repository
        .expect_insert()
        .times(1)
        .returning(|_| Err(EcoActionRepositoryError::timeout("deadline exceeded")));

    let service = EcoActionService::new(Arc::new(repository), fixed_clock());
    let error = service.log_action(request()).await.expect_err("timeout");
    assert_eq!(error.code(), ErrorCode::InternalError);
}
