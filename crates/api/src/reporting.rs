//! Error reporting for conditions worth a look but not worth failing a request

use serde_json::Value;
use uuid::Uuid;

use crate::config::AppEnvironment;

/// Event id returned while running the test suite
pub const TEST_EVENT_ID: &str = "123456789";

/// Report a message with extra context; returns the event id to show the user
pub fn report_error(environment: AppEnvironment, message: &str, extras: &[Value]) -> String {
    if environment == AppEnvironment::Testing {
        return TEST_EVENT_ID.to_string();
    }

    let event_id = Uuid::new_v4().simple().to_string();
    let extras = Value::Array(extras.to_vec());

    tracing::error!(
        event_id = %event_id,
        extras = %extras,
        "{}",
        message
    );

    event_id
}
