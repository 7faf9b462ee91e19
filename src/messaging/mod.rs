//! Redis-backed messaging: the judge queue and the result bus

pub mod bus;
pub mod queue;

pub use bus::{RedisResultBus, ResultBus};
pub use queue::{JobQueue, RedisJobQueue};
