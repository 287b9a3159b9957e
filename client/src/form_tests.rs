//! Tests for the submission form lifecycle.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockable::MockClock;

use super::*;
use crate::api::{ApiError, MockEcoActionApi, SubmissionOutcome};

fn fixed_clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock
        .expect_utc()
        .return_const(Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).single().expect("timestamp"));
    Arc::new(clock)
}

fn signed_in_form() -> SubmissionForm {
    let mut form = SubmissionForm::new(fixed_clock());
    form.sign_in(Session::new("Asha", "token-abc"));
    form
}

fn accepting_api(expected_calls: usize) -> MockEcoActionApi {
    let mut api = MockEcoActionApi::new();
    api.expect_submit()
        .times(expected_calls)
        .returning(|_, _| {
            Ok(SubmissionOutcome {
                action_id: "doc-1".to_owned(),
            })
        });
    api
}

#[tokio::test]
async fn blocked_without_a_session() {
    let mut form = SubmissionForm::new(fixed_clock());
    form.set_manual_latitude("23.0225");
    form.set_manual_longitude("72.5714");

    // An un-programmed mock panics if called, pinning "no network call".
    form.submit(&MockEcoActionApi::new()).await;

    let notice = form.active_notice().expect("notice shown");
    assert_eq!(notice.kind(), NoticeKind::Failure);
    assert!(notice.message().contains("sign in"));
    assert_eq!(form.phase(), Phase::Idle);
}

#[tokio::test]
async fn blocked_without_usable_coordinates() {
    let mut form = signed_in_form();

    form.submit(&MockEcoActionApi::new()).await;

    let notice = form.active_notice().expect("notice shown");
    assert_eq!(notice.kind(), NoticeKind::Failure);
    assert!(notice.message().contains("no usable location"));
}

#[tokio::test]
async fn malformed_manual_input_blocks_locally() {
    let mut form = signed_in_form();
    form.set_manual_latitude("north-ish");
    form.set_manual_longitude("72.5714");

    form.submit(&MockEcoActionApi::new()).await;

    let notice = form.active_notice().expect("notice shown");
    assert!(notice.message().contains("latitude is not a number"));
}

#[tokio::test]
async fn zero_coordinates_are_submitted() {
    let mut form = signed_in_form();
    form.set_manual_latitude("0");
    form.set_manual_longitude("0");

    let mut api = MockEcoActionApi::new();
    api.expect_submit()
        .withf(|token, request| {
            token == "token-abc"
                && request.location.latitude() == 0.0
                && request.location.longitude() == 0.0
        })
        .times(1)
        .returning(|_, _| {
            Ok(SubmissionOutcome {
                action_id: "doc-7".to_owned(),
            })
        });

    form.submit(&api).await;

    let notice = form.active_notice().expect("notice shown");
    assert_eq!(notice.kind(), NoticeKind::Success);
    assert!(notice.message().contains("doc-7"));
}

#[tokio::test]
async fn manual_override_beats_captured_location() {
    let mut form = signed_in_form();
    form.record_device_location(Coordinates::new(23.0225, 72.5714).expect("valid"));
    form.set_manual_latitude("10.5");

    let mut api = MockEcoActionApi::new();
    api.expect_submit()
        .withf(|_, request| {
            request.location.latitude() == 10.5 && request.location.longitude() == 72.5714
        })
        .times(1)
        .returning(|_, _| {
            Ok(SubmissionOutcome {
                action_id: "doc-1".to_owned(),
            })
        });

    form.submit(&api).await;
    assert_eq!(form.active_notice().expect("notice").kind(), NoticeKind::Success);
}

#[tokio::test]
async fn success_clears_fields_but_keeps_location() {
    let mut form = signed_in_form();
    form.set_action_type("plastic_avoided");
    form.set_notes("refused a bag");
    form.set_manual_latitude("23.0225");
    form.set_manual_longitude("72.5714");

    form.submit(&accepting_api(1)).await;

    // Ready for the next entry from the same spot.
    let retained = form.captured_location().expect("location retained");
    assert_eq!(retained.latitude(), 23.0225);
    assert_eq!(retained.longitude(), 72.5714);

    let mut api = MockEcoActionApi::new();
    api.expect_submit()
        .withf(|_, request| {
            request.action_type == "tree_planted"
                && request.notes.is_none()
                && request.location.latitude() == 23.0225
        })
        .times(1)
        .returning(|_, _| {
            Ok(SubmissionOutcome {
                action_id: "doc-2".to_owned(),
            })
        });
    form.submit(&api).await;
}

#[tokio::test]
async fn failure_notice_carries_endpoint_detail() {
    let mut form = signed_in_form();
    form.set_manual_latitude("23.0225");
    form.set_manual_longitude("72.5714");

    let mut api = MockEcoActionApi::new();
    api.expect_submit().times(1).returning(|_, _| {
        Err(ApiError::Endpoint {
            status: 401,
            message: "invalid token: token expired".to_owned(),
        })
    });

    form.submit(&api).await;

    let notice = form.active_notice().expect("notice shown");
    assert_eq!(notice.kind(), NoticeKind::Failure);
    assert!(notice.message().contains("invalid token: token expired"));
}

#[tokio::test]
async fn new_submission_clears_the_pending_notice() {
    let mut form = signed_in_form();
    form.set_manual_latitude("23.0225");
    form.set_manual_longitude("72.5714");
    form.submit(&accepting_api(1)).await;
    assert_eq!(form.active_notice().expect("notice").kind(), NoticeKind::Success);

    // The next attempt replaces the notice outright; the earlier expiry
    // cannot erase the newer message.
    form.sign_out();
    form.submit(&MockEcoActionApi::new()).await;
    let notice = form.active_notice().expect("notice shown");
    assert_eq!(notice.kind(), NoticeKind::Failure);
    assert!(notice.message().contains("sign in"));
}

#[tokio::test]
async fn notice_auto_clears_after_the_ttl() {
    let t0 = Utc
        .with_ymd_and_hms(2026, 8, 26, 12, 0, 0)
        .single()
        .expect("timestamp");
    let mut clock = MockClock::new();
    // One reading when the notice is stamped, a later one when displayed.
    clock.expect_utc().times(2).return_const(t0);
    clock
        .expect_utc()
        .return_const(t0 + chrono::Duration::seconds(6));

    let mut form = SubmissionForm::new(Arc::new(clock));
    form.submit(&MockEcoActionApi::new()).await;

    assert!(form.active_notice().is_some());
    assert!(form.active_notice().is_none());
}

#[test]
fn device_location_requested_once_per_session() {
    let mut form = SubmissionForm::new(fixed_clock());
    assert!(!form.wants_device_location());

    form.sign_in(Session::new("Asha", "token-abc"));
    assert!(form.wants_device_location());

    form.device_location_unavailable();
    assert!(!form.wants_device_location());

    // A fresh sign-in re-arms the capture.
    form.sign_in(Session::new("Asha", "token-def"));
    assert!(form.wants_device_location());
}
