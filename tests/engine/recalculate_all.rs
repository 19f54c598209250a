use test_context::test_context;
use volunteer_rota::{
    domain::{ShiftStatus, ShiftStore, VolunteerId, VolunteerStats, VolunteerStore},
    services::shifts::{recalculate_all, RecalculationSummary},
};

use crate::helpers::TestApp;

#[test_context(TestApp)]
#[tokio::test]
async fn should_recalculate_every_volunteer(app: &mut TestApp) {
    let alice = app.add_volunteer().await;
    let bob = app.add_volunteer().await;
    app.worked(alice.id, "2024-06-01", ShiftStatus::Completed).await;
    app.worked(bob.id, "2024-06-01", ShiftStatus::Missed).await;

    // Simulate aggregates left stale by an earlier outage.
    for id in [alice.id, bob.id] {
        app.volunteer_store
            .write()
            .await
            .update_stats(&id, VolunteerStats::default())
            .await
            .unwrap();
    }

    let summary = recalculate_all(&app.state, &[]).await.unwrap();

    assert_eq!(
        summary,
        RecalculationSummary {
            recalculated: 2,
            failed: vec![],
        }
    );
    assert_eq!(app.stored_stats(alice.id).await.reliability_score, 20);
    assert_eq!(app.stored_stats(bob.id).await.reliability_score, -50);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_only_touch_requested_volunteers(app: &mut TestApp) {
    let alice = app.add_volunteer().await;
    let bob = app.add_volunteer().await;
    let shift = app.worked(bob.id, "2024-06-01", ShiftStatus::Completed).await;

    // Change bob's history behind the engine's back.
    let mut edited = shift.clone();
    edited.status = ShiftStatus::Late;
    app.shift_store
        .write()
        .await
        .update_shift(&edited)
        .await
        .unwrap();

    let summary = recalculate_all(&app.state, &[alice.id]).await.unwrap();

    assert_eq!(summary.recalculated, 1);
    assert!(summary.failed.is_empty());
    assert_eq!(app.stored_stats(bob.id).await.reliability_score, 20);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_report_unknown_volunteers_without_stopping(app: &mut TestApp) {
    let alice = app.add_volunteer().await;
    app.worked(alice.id, "2024-06-01", ShiftStatus::Completed).await;
    let ghost = VolunteerId::parse(4242).unwrap();

    let summary = recalculate_all(&app.state, &[ghost, alice.id]).await.unwrap();

    assert_eq!(
        summary,
        RecalculationSummary {
            recalculated: 1,
            failed: vec![ghost],
        }
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_succeed_with_no_volunteers(app: &mut TestApp) {
    let summary = recalculate_all(&app.state, &[]).await.unwrap();

    assert_eq!(summary, RecalculationSummary::default());
}
