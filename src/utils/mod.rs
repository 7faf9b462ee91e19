//! Utility functions

pub mod time;

pub use time::{now_unix, now_utc};
