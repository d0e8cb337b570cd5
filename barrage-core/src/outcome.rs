use std::time::Duration;

pub use barrage_http::HttpTransportErrorKind as FailureKind;

/// Status code that counts as a successful request.
pub const SUCCESS_STATUS: u16 = 200;

/// Recorded result of one request attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The target answered, with any status.
    Response { status: u16, latency: Duration },
    /// No response was received.
    Failure { kind: FailureKind },
}

impl Outcome {
    #[must_use]
    pub fn response(status: u16, latency: Duration) -> Self {
        Self::Response { status, latency }
    }

    #[must_use]
    pub fn failure(kind: FailureKind) -> Self {
        Self::Failure { kind }
    }

    /// HTTP status, or 0 when no response was received.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Response { status, .. } => *status,
            Self::Failure { .. } => 0,
        }
    }

    /// Measured latency in seconds, or 0 when no response was received.
    #[must_use]
    pub fn latency_secs(&self) -> f64 {
        match self {
            Self::Response { latency, .. } => latency.as_secs_f64(),
            Self::Failure { .. } => 0.0,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code() == SUCCESS_STATUS
    }

    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Response { .. } => None,
            Self::Failure { kind } => Some(*kind),
        }
    }
}
