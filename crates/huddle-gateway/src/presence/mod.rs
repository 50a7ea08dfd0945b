//! Ephemeral typing presence

mod tracker;

pub use tracker::TypingTracker;
