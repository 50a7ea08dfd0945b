//! Identity entity - a chat participant as seen by the gateway

use crate::value_objects::Snowflake;

/// Identity of an authenticated participant
///
/// Owned by the external identity store; the gateway caches a copy per
/// connection and refreshes it only on an explicit profile-changed signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Snowflake,
    pub display_name: String,
    pub display_color: Option<String>,
}

impl Identity {
    /// Create a new Identity
    pub fn new(id: Snowflake, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            display_color: None,
        }
    }

    /// Attach a display color (CSS color string)
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.display_color = Some(color.into());
        self
    }
}
