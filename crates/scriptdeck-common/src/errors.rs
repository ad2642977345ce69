#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("failed to spawn process: {0}")]
    SpawnFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("job was already started")]
    AlreadyStarted,
}
