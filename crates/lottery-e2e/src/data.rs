//! Runtime-generated fixture data.
//!
//! Registration scenarios need accounts that do not exist yet, so
//! usernames, emails and phone numbers are derived from the current
//! timestamp plus UUID entropy.

use chrono::Utc;
use uuid::Uuid;

fn timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A username unlikely to exist in the target deployment
pub fn unique_username() -> String {
    format!("testuser{}", timestamp_millis())
}

/// An email unlikely to exist in the target deployment
pub fn unique_email() -> String {
    format!("test{}@example.com", timestamp_millis())
}

/// A syntactically valid, unlikely-to-exist Chinese mobile number
pub fn unique_phone() -> String {
    let entropy = Uuid::new_v4().as_u128() % 100_000_000;
    format!("138{entropy:08}")
}
