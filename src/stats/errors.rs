use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Repository error: {0}")]
    #[allow(dead_code)] // Error variant for non-in-memory backends
    Repository(String),
}
