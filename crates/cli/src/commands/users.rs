//! List registered users.
//!
//! Prints one JSON object per line, in registration order:
//!
//! ```text
//! {"_id":"6f1c...","username":"alice"}
//! ```

use std::io::Write;

use serde::Serialize;

use exercise_tracker_core::UserId;
use exercise_tracker_server::models::User;

use super::{CommandError, connect_state};

#[derive(Serialize)]
struct UserLine<'a> {
    #[serde(rename = "_id")]
    id: UserId,
    username: &'a str,
}

/// Print all users as JSON lines.
///
/// # Errors
///
/// Returns an error if configuration is missing or the store fails.
pub async fn run() -> Result<(), CommandError> {
    let state = connect_state()?;
    let users = state.tracker().list_users().await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_lines(&mut out, &users)?;
    Ok(())
}

fn write_lines(out: &mut impl Write, users: &[User]) -> Result<(), CommandError> {
    for user in users {
        serde_json::to_writer(
            &mut *out,
            &UserLine {
                id: user.id,
                username: user.username.as_str(),
            },
        )?;
        writeln!(out).map_err(serde_json::Error::io)?;
    }
    Ok(())
}
