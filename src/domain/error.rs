use std::fmt;

use thiserror::Error;

/// Which flavor of named target a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Scene,
    Camera,
}

impl TargetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::Scene => "scene",
            TargetKind::Camera => "camera",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejections produced by command synthesis. All are recoverable by
/// correcting the request and synthesizing again; none are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing {field} path")]
    MissingPath { field: &'static str },
    #[error("invalid frame value: {message}")]
    InvalidFrame { message: String },
    #[error("output file name is required for video formats")]
    MissingName,
    #[error("target list is empty")]
    EmptyTargetList,
    #[error("invalid {kind} target `{name}`: {message}")]
    InvalidTarget {
        kind: TargetKind,
        name: String,
        message: String,
    },
}

impl ValidationError {
    pub fn missing_path(field: &'static str) -> Self {
        Self::MissingPath { field }
    }

    pub fn invalid_frame(message: impl Into<String>) -> Self {
        Self::InvalidFrame {
            message: message.into(),
        }
    }

    pub fn invalid_target(
        kind: TargetKind,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidTarget {
            kind,
            name: name.into(),
            message: message.into(),
        }
    }
}
