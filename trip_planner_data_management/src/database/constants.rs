#![allow(dead_code)]

pub const USERS_TABLE_NAME: &str = "users";
pub const USER_ID: &str = "id";
pub const EMAIL: &str = "email";
pub const CREATED_AT: &str = "created_at";

pub const TRIPS_TABLE_NAME: &str = "trips";
pub const TRIP_ID: &str = "id";
pub const TRIP_NAME: &str = "trip_name";
pub const TRIP_JSON: &str = "trip_json";
pub const TRIP_USER_ID: &str = "user_id";
// created_at shared with users
