//! Seed the database with a demo user and exercise history.
//!
//! Goes through the tracker service, so seeded data obeys the same
//! validation as API writes.

use chrono::Days;
use tracing::info;

use exercise_tracker_core::ExerciseDate;
use exercise_tracker_server::models::User;
use exercise_tracker_server::services::{ExerciseInput, TrackerError, TrackerService};

use super::{CommandError, connect_state};

/// Rotating demo activities: description and minutes.
const DEMO_ACTIVITIES: [(&str, u32); 5] = [
    ("Morning run", 30),
    ("Swimming laps", 45),
    ("Cycling", 60),
    ("Yoga", 20),
    ("Strength training", 40),
];

/// Outcome of a seed run.
#[derive(Debug)]
pub struct SeedSummary {
    pub user: User,
    pub created_user: bool,
    pub exercises_logged: usize,
}

/// Seed a user and `count` exercises against the configured database.
///
/// # Errors
///
/// Returns an error if configuration is missing or any write fails.
pub async fn run(username: &str, count: usize) -> Result<(), CommandError> {
    let state = connect_state()?;
    let summary = seed(state.tracker(), username, count, ExerciseDate::today()).await?;

    info!(
        user_id = %summary.user.id,
        username = %summary.user.username,
        created_user = summary.created_user,
        exercises = summary.exercises_logged,
        "Seeding complete"
    );
    Ok(())
}

/// Create `username` (or reuse it if taken) and log `count` exercises on
/// consecutive days, the last one dated `until`.
///
/// # Errors
///
/// Returns `TrackerError` if the username is invalid or a write fails.
pub async fn seed(
    tracker: &TrackerService,
    username: &str,
    count: usize,
    until: ExerciseDate,
) -> Result<SeedSummary, TrackerError> {
    let (user, created_user) = match tracker.register_user(Some(username)).await {
        Ok(user) => (user, true),
        Err(TrackerError::UsernameTaken) => (find_user(tracker, username).await?, false),
        Err(e) => return Err(e),
    };

    let user_id = user.id.to_string();
    let dates = demo_dates(until, count);
    let logged = dates.len();
    for (&(description, minutes), date) in DEMO_ACTIVITIES.iter().cycle().zip(dates) {
        let duration = minutes.to_string();
        let date = date.to_string();
        tracker
            .log_exercise(
                &user_id,
                ExerciseInput {
                    description: Some(description),
                    duration: Some(&duration),
                    date: Some(&date),
                },
            )
            .await?;
    }

    Ok(SeedSummary {
        user,
        created_user,
        exercises_logged: logged,
    })
}

async fn find_user(tracker: &TrackerService, username: &str) -> Result<User, TrackerError> {
    tracker
        .list_users()
        .await?
        .into_iter()
        .find(|u| u.username.as_str() == username.trim())
        .ok_or(TrackerError::UserNotFound)
}

/// `count` consecutive dates ending at `until`, oldest first.
fn demo_dates(until: ExerciseDate, count: usize) -> Vec<ExerciseDate> {
    let last = until.as_naive();
    (0..count)
        .rev()
        .filter_map(|back| {
            let back = u64::try_from(back).ok()?;
            last.checked_sub_days(Days::new(back))
        })
        .map(ExerciseDate::from_naive)
        .collect()
}
