//! Domain models

pub mod result_message;
pub mod submission;

pub use result_message::*;
pub use submission::*;
