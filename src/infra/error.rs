use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

impl InfraError {
    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}

/// Failures while handing commands to an external terminal session.
/// Reported to the user without taking the process down mid-flight.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no commands to launch")]
    Empty,
    #[error("failed to spawn terminal: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("no supported terminal launcher for platform `{os}`")]
    UnsupportedPlatform { os: String },
}
