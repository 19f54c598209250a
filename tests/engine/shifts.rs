use test_context::test_context;
use volunteer_rota::{
    domain::{
        NewShift, RotaError, ShiftId, ShiftStatus, ShiftStore, ShiftUpdate, VolunteerId,
        VolunteerStats,
    },
    services::shifts::{create_shift, delete_shift, list_volunteer_shifts, update_shift},
};

use crate::helpers::TestApp;

#[test_context(TestApp)]
#[tokio::test]
async fn should_create_scheduled_shift(app: &mut TestApp) {
    let volunteer = app.add_volunteer().await;

    let shift = app
        .schedule(volunteer.id, "2024-06-01", "9:00 AM", "5:00 PM")
        .await;

    assert_eq!(shift.status, ShiftStatus::Scheduled);
    assert_eq!(shift.version, 1);
    assert_eq!(shift.volunteer_id, volunteer.id);
    // Scheduled shifts take no part in the aggregate.
    assert_eq!(app.stored_stats(volunteer.id).await, VolunteerStats::default());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_not_found_for_unknown_volunteer(app: &mut TestApp) {
    let new_shift = NewShift::new(77, "2024-06-01", "09:00", "12:00", "front desk").unwrap();

    let result = create_shift(&app.state, new_shift).await;

    assert!(matches!(
        result,
        Err(RotaError::VolunteerNotFound(id)) if id.value_of() == 77
    ));
    let listed = list_volunteer_shifts(&app.state, VolunteerId::parse(77).unwrap())
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_recalculate_after_update(app: &mut TestApp) {
    let volunteer = app.add_volunteer().await;
    let shift = app
        .schedule(volunteer.id, "2024-06-01", "9:00 AM", "5:00 PM")
        .await;

    let updated = app.resolve(&shift, ShiftStatus::Completed).await;

    assert_eq!(updated.version, 2);
    assert_eq!(
        app.stored_stats(volunteer.id).await,
        VolunteerStats {
            reliability_score: 20,
            total_hours: 8,
            streak: 1,
        }
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_apply_partial_updates(app: &mut TestApp) {
    let volunteer = app.add_volunteer().await;
    let shift = app
        .schedule(volunteer.id, "2024-06-01", "09:00", "12:00")
        .await;

    let updated = update_shift(
        &app.state,
        shift.id,
        ShiftUpdate::at_version(1)
            .status(ShiftStatus::Late)
            .times("22:00", "02:00")
            .notes("Covering for Sam, <24h notice"),
    )
    .await
    .unwrap();

    assert_eq!(updated.role, "cat care");
    assert_eq!(updated.date, shift.date);
    assert_eq!(updated.start_time, "22:00");
    assert_eq!(
        app.stored_stats(volunteer.id).await,
        VolunteerStats {
            reliability_score: 30,
            total_hours: 4,
            streak: 0,
        }
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_stale_version(app: &mut TestApp) {
    let volunteer = app.add_volunteer().await;
    let shift = app
        .schedule(volunteer.id, "2024-06-01", "09:00", "12:00")
        .await;

    app.resolve(&shift, ShiftStatus::Completed).await;
    let stats_before = app.stored_stats(volunteer.id).await;

    let result = update_shift(
        &app.state,
        shift.id,
        ShiftUpdate::at_version(shift.version).status(ShiftStatus::Missed),
    )
    .await;

    assert!(matches!(result, Err(RotaError::EditConflict(id)) if id == shift.id));
    let stored = app.shift_store.read().await.get_shift(&shift.id).await.unwrap();
    assert_eq!(stored.status, ShiftStatus::Completed);
    assert_eq!(stored.version, 2);
    assert_eq!(app.stored_stats(volunteer.id).await, stats_before);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_impossible_version(app: &mut TestApp) {
    let volunteer = app.add_volunteer().await;
    let shift = app
        .schedule(volunteer.id, "2024-06-01", "09:00", "12:00")
        .await;

    let result = update_shift(
        &app.state,
        shift.id,
        ShiftUpdate::at_version(0).status(ShiftStatus::Completed),
    )
    .await;

    match result {
        Err(RotaError::ValidationError(e)) => {
            assert_eq!(e.as_ref(), "Invalid shift version: 0")
        }
        other => panic!("Expected a validation error, got {other:?}"),
    }
    let stored = app.shift_store.read().await.get_shift(&shift.id).await.unwrap();
    assert_eq!(stored, shift);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_not_found_for_unknown_shift(app: &mut TestApp) {
    let missing = ShiftId::parse(9999).unwrap();

    let update = update_shift(&app.state, missing, ShiftUpdate::at_version(1)).await;
    assert!(matches!(update, Err(RotaError::ShiftNotFound(id)) if id == missing));

    let delete = delete_shift(&app.state, missing).await;
    assert!(matches!(delete, Err(RotaError::ShiftNotFound(id)) if id == missing));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_recalculate_after_delete(app: &mut TestApp) {
    let volunteer = app.add_volunteer().await;
    app.worked(volunteer.id, "2024-06-01", ShiftStatus::Completed).await;
    let missed = app.worked(volunteer.id, "2024-06-08", ShiftStatus::Missed).await;
    assert_eq!(app.stored_stats(volunteer.id).await.streak, 0);

    let deleted = delete_shift(&app.state, missed.id).await.unwrap();

    assert_eq!(deleted.id, missed.id);
    assert_eq!(
        app.stored_stats(volunteer.id).await,
        VolunteerStats {
            reliability_score: 20,
            total_hours: 4,
            streak: 1,
        }
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_most_recent_first(app: &mut TestApp) {
    let volunteer = app.add_volunteer().await;
    let other = app.add_volunteer().await;
    app.schedule(volunteer.id, "2024-06-01", "09:00", "12:00").await;
    app.schedule(volunteer.id, "2024-06-15", "1:00 PM", "4:00 PM").await;
    app.schedule(other.id, "2024-06-20", "09:00", "12:00").await;
    app.schedule(volunteer.id, "2024-06-15", "8:00", "11:00").await;

    let listed: Vec<(String, String)> = list_volunteer_shifts(&app.state, volunteer.id)
        .await
        .unwrap()
        .into_iter()
        .map(|shift| (shift.date.to_string(), shift.start_time))
        .collect();

    assert_eq!(
        listed,
        vec![
            ("2024-06-15".to_string(), "8:00".to_string()),
            ("2024-06-15".to_string(), "1:00 PM".to_string()),
            ("2024-06-01".to_string(), "09:00".to_string()),
        ]
    );
}
