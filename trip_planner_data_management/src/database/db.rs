use chrono::{DateTime, Utc};
use const_format::concatcp;
use sqlx::{
    Executor, Pool, Sqlite, SqlitePool, query, query_as,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use trip_planner_lib::{
    trip::Trip,
    user::{User, UserEmail, UserId},
};

use crate::{
    TripStoreError,
    config::{DatabaseLocation, StoreConfig},
};

use super::constants::*;

#[derive(Clone)]
pub struct TripDatabase {
    pool: Pool<Sqlite>,
}

impl TripDatabase {
    pub async fn connect(config: &StoreConfig) -> Result<Self, TripStoreError> {
        let pool = match &config.database {
            DatabaseLocation::File(path) => {
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .foreign_keys(true)
                    .create_if_missing(true);

                SqlitePool::connect_with(options).await
            }
            DatabaseLocation::InMemory => {
                let options = SqliteConnectOptions::new().in_memory(true).foreign_keys(true);

                // An in-memory database lives and dies with its connection,
                // so the pool must hold exactly one that is never reaped.
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await
            }
        }
        .map_err(|err| TripStoreError::Database(format!("failed to connect to database: {err}")))?;

        let db = Self { pool };

        db.init().await?;

        Ok(db)
    }

    pub async fn init(&self) -> Result<(), TripStoreError> {
        self.pool.execute(concatcp!("
            CREATE TABLE IF NOT EXISTS ", USERS_TABLE_NAME, "(",
                USER_ID,    " INTEGER PRIMARY KEY AUTOINCREMENT,",
                EMAIL,      " TEXT UNIQUE NOT NULL,",
                CREATED_AT, " DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS ", TRIPS_TABLE_NAME, "(",
                TRIP_ID,      " INTEGER PRIMARY KEY AUTOINCREMENT,",
                TRIP_NAME,    " TEXT NOT NULL,",
                TRIP_JSON,    " TEXT NOT NULL,",
                TRIP_USER_ID, " INTEGER NOT NULL,",
                CREATED_AT,   " DATETIME NOT NULL,
                FOREIGN KEY(", TRIP_USER_ID, ") REFERENCES ", USERS_TABLE_NAME, "(", USER_ID, "),
                UNIQUE(", TRIP_USER_ID, ", ", TRIP_NAME, ")
            )")).await
            .map_err(|err| TripStoreError::Database(format!("failed to create schema: {err}")))
            .map(|_| ())
    }

    pub async fn get_user_by_email(&self, email: &UserEmail) -> Result<Option<User>, TripStoreError> {
        query_as::<_, User>(concatcp!("SELECT * FROM ", USERS_TABLE_NAME, " WHERE ", EMAIL, " = ?1"))
            .bind(email.as_str())
            .fetch_optional(&self.pool).await
            .map_err(|err| TripStoreError::Database(format!("failed to look up user: {err}")))
    }

    pub async fn insert_user(&self, email: &UserEmail) -> Result<User, TripStoreError> {
        query_as::<_, User>(concatcp!("
            INSERT INTO ", USERS_TABLE_NAME, "(", EMAIL, ")
            VALUES (?1) RETURNING *"))
            .bind(email.as_str())
            .fetch_one(&self.pool).await
            .map_err(|err| TripStoreError::Database(format!("failed to insert user: {err}")))
    }

    pub async fn get_trip_json(&self, user_id: UserId, trip_name: &str) -> Result<Option<String>, TripStoreError> {
        query_as::<_, (String,)>(concatcp!("
            SELECT ", TRIP_JSON, " FROM ", TRIPS_TABLE_NAME, "
            WHERE ", TRIP_USER_ID, " = ?1 AND ", TRIP_NAME, " = ?2"))
            .bind(user_id.0)
            .bind(trip_name)
            .fetch_optional(&self.pool).await
            .map_err(|err| TripStoreError::Database(format!("failed to get trip: {err}")))
            .map(|row| row.map(|(trip_json,)| trip_json))
    }

    pub async fn get_trips_for_user_id(&self, user_id: UserId) -> Result<Vec<Trip>, TripStoreError> {
        query_as::<_, Trip>(concatcp!("
            SELECT * FROM ", TRIPS_TABLE_NAME, "
            WHERE ", TRIP_USER_ID, " = ?1 ORDER BY ", CREATED_AT, " DESC"))
            .bind(user_id.0)
            .fetch_all(&self.pool).await
            .map_err(|err| TripStoreError::Database(format!("failed to list trips: {err}")))
    }

    /// Single-statement upsert on the (user_id, trip_name) unique constraint.
    /// `written_at` is bound from application code so the update path
    /// refreshes it too.
    pub async fn upsert_trip(&self, user_id: UserId, trip_name: &str, trip_json: &str, written_at: DateTime<Utc>) -> Result<i64, TripStoreError> {
        query_as::<_, (i64,)>(concatcp!("
            INSERT INTO ", TRIPS_TABLE_NAME, "(", TRIP_NAME, ", ", TRIP_JSON, ", ", TRIP_USER_ID, ", ", CREATED_AT, ")
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(", TRIP_USER_ID, ", ", TRIP_NAME, ") DO UPDATE SET ",
                TRIP_JSON, " = excluded.", TRIP_JSON, ", ",
                CREATED_AT, " = excluded.", CREATED_AT, "
            RETURNING ", TRIP_ID))
            .bind(trip_name)
            .bind(trip_json)
            .bind(user_id.0)
            .bind(written_at)
            .fetch_one(&self.pool).await
            .map_err(|err| TripStoreError::Database(format!("failed to upsert trip: {err}")))
            .map(|row| row.0)
    }

    pub async fn delete_trip(&self, user_id: UserId, trip_name: &str) -> Result<u64, TripStoreError> {
        query(concatcp!("DELETE FROM ", TRIPS_TABLE_NAME, " WHERE ", TRIP_USER_ID, " = ?1 AND ", TRIP_NAME, " = ?2"))
            .bind(user_id.0)
            .bind(trip_name)
            .execute(&self.pool).await
            .map_err(|err| TripStoreError::Database(format!("failed to delete trip: {err}")))
            .map(|result| result.rows_affected())
    }

    pub async fn trip_exists(&self, user_id: UserId, trip_name: &str) -> Result<bool, TripStoreError> {
        query_as::<_, (bool,)>(concatcp!("
            SELECT EXISTS(SELECT 1 FROM ", TRIPS_TABLE_NAME, "
            WHERE ", TRIP_USER_ID, " = ?1 AND ", TRIP_NAME, " = ?2)"))
            .bind(user_id.0)
            .bind(trip_name)
            .fetch_one(&self.pool).await
            .map_err(|err| TripStoreError::Database(format!("failed to check trip: {err}")))
            .map(|row| row.0)
    }

    pub async fn count_trips(&self, user_id: UserId) -> Result<i64, TripStoreError> {
        query_as::<_, (i64,)>(concatcp!("SELECT COUNT(*) FROM ", TRIPS_TABLE_NAME, " WHERE ", TRIP_USER_ID, " = ?1"))
            .bind(user_id.0)
            .fetch_one(&self.pool).await
            .map_err(|err| TripStoreError::Database(format!("failed to count trips: {err}")))
            .map(|row| row.0)
    }
}
