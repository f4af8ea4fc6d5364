use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "sqlx")]
use sqlx::{prelude::*, sqlite::SqliteRow};

use crate::user::UserId;

/// A user-owned named record holding an opaque serialized payload.
/// The payload schema belongs to the caller; the store never parses it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Trip {
    pub id: i64,
    pub trip_name: String,
    pub trip_json: String,
    pub user_id: UserId,
    /// Refreshed on every write, so this is "last written at".
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "sqlx")]
impl FromRow<'_, SqliteRow> for Trip {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            trip_name: row.try_get("trip_name")?,
            trip_json: row.try_get("trip_json")?,
            user_id: UserId(row.try_get("user_id")?),
            created_at: row.try_get("created_at")?,
        })
    }
}
