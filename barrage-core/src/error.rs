pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("`host` must not be empty")]
    InvalidHost,

    #[error("`connections` must be a positive integer")]
    InvalidConnections,

    #[error("`duration` must be a positive number of seconds")]
    InvalidDuration,

    #[error("`interval` must be a finite, non-negative number of seconds")]
    InvalidInterval,

    #[error("`request_timeout` must be a positive duration")]
    InvalidTimeout,

    #[error("run finished in zero elapsed time; requests/second is undefined")]
    ZeroElapsed,
}
