//! Test fixtures
//!
//! Reusable identities and payload builders for gateway tests.

use huddle_core::{Identity, Snowflake};
use serde_json::{json, Value};

/// Seeded test identity: ada (id 1)
pub fn ada() -> Identity {
    Identity::new(Snowflake::new(1), "ada").with_color("#7c3aed")
}

/// Seeded test identity: lin (id 2)
pub fn lin() -> Identity {
    Identity::new(Snowflake::new(2), "lin").with_color("#0ea5e9")
}

/// Seeded test identity: omar (id 3)
pub fn omar() -> Identity {
    Identity::new(Snowflake::new(3), "omar")
}

/// Build a `join` client frame
pub fn join_frame(room_id: Snowflake) -> Value {
    json!({"event": "join", "data": {"roomId": room_id.to_string()}})
}

/// Build a `send` client frame
pub fn send_frame(content: &str) -> Value {
    json!({"event": "send", "data": {"content": content}})
}

/// Build a `react` client frame
pub fn react_frame(message_id: &Value, emoji: &str) -> Value {
    json!({"event": "react", "data": {"messageId": message_id, "emoji": emoji}})
}

/// Build a payload-less client frame (`typing-start`, `typing-stop`,
/// `profile-refresh`)
pub fn bare_frame(event: &str) -> Value {
    json!({"event": event})
}
