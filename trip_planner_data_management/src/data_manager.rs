use chrono::Utc;
use trip_planner_lib::{
    trip::Trip,
    user::{User, UserEmail, UserId},
};

use crate::{TripStoreError, config::StoreConfig, database::db::TripDatabase};

#[derive(Clone)]
pub struct TripStore {
    pub(crate) database: TripDatabase,
}

/// The public interface for all trip persistence. Storage faults surface as
/// `Err`; "not found" conditions are values (`None`, `false`, empty list,
/// status string), never errors.
impl TripStore {
    /// Opens the store, creating the database file and schema if missing.
    pub async fn connect(config: StoreConfig) -> Result<Self, TripStoreError> {
        let database = TripDatabase::connect(&config).await?;

        Ok(TripStore { database })
    }

    /// Looks the user up by email, inserting a row if none exists.
    /// Both paths return the full row.
    pub async fn get_or_create_user(&self, email: &UserEmail) -> Result<User, TripStoreError> {
        if let Some(user) = self.database.get_user_by_email(email).await? {
            tracing::info!(user_id = user.id.0, email = %user.email, "user exists");
            return Ok(user);
        }

        let user = self.database.insert_user(email).await?;
        tracing::info!(user_id = user.id.0, email = %user.email, "user created");
        Ok(user)
    }

    /// Stored payload for the (user, trip name) pair, or `None`.
    pub async fn get_trip(&self, user_id: UserId, trip_name: &str) -> Result<Option<String>, TripStoreError> {
        self.database.get_trip_json(user_id, trip_name).await
    }

    /// All trips for the user behind `email`, newest first. An unknown email
    /// is a soft case: logged and answered with an empty list.
    pub async fn get_trips_for_user(&self, email: &UserEmail) -> Result<Vec<Trip>, TripStoreError> {
        let Some(user) = self.database.get_user_by_email(email).await? else {
            tracing::warn!(email = %email, "no such user in local users table");
            return Ok(Vec::new());
        };

        self.database.get_trips_for_user_id(user.id).await
    }

    /// Upsert keyed on (user, trip name): inserts on first save, otherwise
    /// replaces the payload in place and refreshes its timestamp, keeping
    /// the row id. Returns the row id either way.
    pub async fn create_or_update_trip(&self, user_id: UserId, trip_name: &str, trip_json: &str) -> Result<i64, TripStoreError> {
        self.database.upsert_trip(user_id, trip_name, trip_json, Utc::now()).await
    }

    /// Deletes the matching trip if present. Reports the outcome as a
    /// human-readable status; repeated calls report "not found" harmlessly.
    pub async fn delete_trip(&self, user_id: UserId, trip_name: &str) -> Result<String, TripStoreError> {
        let deleted = self.database.delete_trip(user_id, trip_name).await?;

        if deleted > 0 {
            Ok(format!("Successfully deleted trip: {trip_name} from user: {user_id}"))
        } else {
            Ok(format!("No trip with name: {trip_name} exists for user: {user_id}"))
        }
    }

    pub async fn check_trip_exists(&self, user_id: UserId, trip_name: &str) -> Result<bool, TripStoreError> {
        self.database.trip_exists(user_id, trip_name).await
    }

    pub async fn get_total_trips(&self, user_id: UserId) -> Result<i64, TripStoreError> {
        self.database.count_trips(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> TripStore {
        TripStore::connect(StoreConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn get_or_create_user_is_idempotent() {
        let store = store().await;
        let email = UserEmail::from("a@x.com");

        let first = store.get_or_create_user(&email).await.unwrap();
        let second = store.get_or_create_user(&email).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.get_trips_for_user(&email).await.unwrap(), Vec::new());
    }

    #[tokio::test]
    async fn unknown_email_lists_empty_without_fault() {
        let store = store().await;
        let trips = store.get_trips_for_user(&UserEmail::from("nobody@x.com")).await.unwrap();
        assert!(trips.is_empty());
    }

    #[tokio::test]
    async fn delete_reports_not_found_and_leaves_storage_unchanged() {
        let store = store().await;
        let user = store.get_or_create_user(&UserEmail::from("a@x.com")).await.unwrap();
        store.create_or_update_trip(user.id, "Oslo", "{}").await.unwrap();

        let status = store.delete_trip(user.id, "Paris").await.unwrap();
        assert!(status.contains("No trip with name: Paris"));
        assert_eq!(store.get_total_trips(user.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn total_trips_tracks_row_count() {
        let store = store().await;
        let user = store.get_or_create_user(&UserEmail::from("a@x.com")).await.unwrap();

        assert_eq!(store.get_total_trips(user.id).await.unwrap(), 0);
        for (i, name) in ["Paris", "Oslo", "Rome"].iter().enumerate() {
            store.create_or_update_trip(user.id, name, "{}").await.unwrap();
            assert_eq!(store.get_total_trips(user.id).await.unwrap(), i as i64 + 1);
        }
    }

    #[tokio::test]
    async fn isolated_stores_do_not_share_state() {
        let a = store().await;
        let b = store().await;

        a.get_or_create_user(&UserEmail::from("a@x.com")).await.unwrap();
        let trips = b.get_trips_for_user(&UserEmail::from("a@x.com")).await.unwrap();
        assert!(trips.is_empty());
    }

    #[tokio::test]
    async fn full_trip_lifecycle() {
        let store = store().await;
        let email = UserEmail::from("a@x.com");

        let user = store.get_or_create_user(&email).await.unwrap();

        let trip_id = store.create_or_update_trip(user.id, "Paris", "{\"days\":3}").await.unwrap();
        assert!(store.check_trip_exists(user.id, "Paris").await.unwrap());
        assert_eq!(
            store.get_trip(user.id, "Paris").await.unwrap(),
            Some("{\"days\":3}".to_string())
        );

        let first_written = store.get_trips_for_user(&email).await.unwrap()[0].created_at;

        let same_id = store.create_or_update_trip(user.id, "Paris", "{\"days\":5}").await.unwrap();
        assert_eq!(trip_id, same_id);

        let trips = store.get_trips_for_user(&email).await.unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].id, trip_id);
        assert_eq!(trips[0].trip_name, "Paris");
        assert_eq!(trips[0].trip_json, "{\"days\":5}");
        assert_eq!(trips[0].user_id, user.id);
        assert!(trips[0].created_at >= first_written);

        let status = store.delete_trip(user.id, "Paris").await.unwrap();
        assert!(status.contains("Successfully deleted trip: Paris"));

        assert_eq!(store.get_trip(user.id, "Paris").await.unwrap(), None);
        assert!(!store.check_trip_exists(user.id, "Paris").await.unwrap());
        assert_eq!(store.get_total_trips(user.id).await.unwrap(), 0);
    }
}
