use super::simulator::Scenario;

/// Storage for saved simulator scenarios so the service can be tested in isolation.
pub trait ScenarioRepository: Send + Sync {
    fn record(&self, scenario: Scenario) -> Result<Scenario, RepositoryError>;
    /// Newest first, at most `limit` entries.
    fn recent(&self, limit: usize) -> Result<Vec<Scenario>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("scenario already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
