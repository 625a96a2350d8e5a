pub mod models;
pub mod repository;
pub mod reset_task;

mod errors;

pub use errors::StatsError;
pub use models::*;
pub use repository::{InMemoryStatsRepository, StatsRepository};
pub use reset_task::{next_reset_delay, start_reset_task, ResetConfig};
