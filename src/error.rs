use std::io;
use thiserror::Error;

/// Fault taxonomy for the monitoring and alerting engine.
///
/// Fetch/Parse/Range faults are resource-local: they are logged and leave
/// the resource's last-known fullness sample untouched. Auth faults end the
/// current dialogue. Delivery faults are isolated per recipient. None of
/// these abort the monitoring cycle or the chat loop.
#[derive(Error, Debug)]
pub enum BinwatchError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Telemetry fetch failed for {resource}: {reason}")]
    Fetch { resource: String, reason: String },

    #[error("Malformed telemetry payload for {resource}: {reason}")]
    Parse { resource: String, reason: String },

    #[error("Reading out of range for {resource}: {distance:.2} exceeds {limit:.2}")]
    Range {
        resource: String,
        distance: f64,
        limit: f64,
    },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Delivery to chat {chat_id} failed: {reason}")]
    Delivery { chat_id: i64, reason: String },

    #[error("Model error: {0}")]
    Model(String),

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the binwatch engine
pub type Result<T> = std::result::Result<T, BinwatchError>;

impl BinwatchError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        BinwatchError::Config(msg.into())
    }

    /// Create a fetch fault for a resource
    pub fn fetch<S: Into<String>, R: Into<String>>(resource: S, reason: R) -> Self {
        BinwatchError::Fetch {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Create a parse fault for a resource
    pub fn parse<S: Into<String>, R: Into<String>>(resource: S, reason: R) -> Self {
        BinwatchError::Parse {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Create a range fault for an implausible sensor reading
    pub fn range<S: Into<String>>(resource: S, distance: f64, limit: f64) -> Self {
        BinwatchError::Range {
            resource: resource.into(),
            distance,
            limit,
        }
    }

    /// Create an auth fault
    pub fn auth<S: Into<String>>(msg: S) -> Self {
        BinwatchError::Auth(msg.into())
    }

    /// Create a per-recipient delivery fault
    pub fn delivery<R: Into<String>>(chat_id: i64, reason: R) -> Self {
        BinwatchError::Delivery {
            chat_id,
            reason: reason.into(),
        }
    }

    /// Create a model error
    pub fn model<S: Into<String>>(msg: S) -> Self {
        BinwatchError::Model(msg.into())
    }

    /// Create a chart rendering error
    pub fn chart<S: Into<String>>(msg: S) -> Self {
        BinwatchError::Chart(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        BinwatchError::Other(msg.into())
    }
}

impl BinwatchError {
    /// True for faults that are local to one resource's telemetry and must
    /// not abort the cycle for other resources.
    pub fn is_resource_local(&self) -> bool {
        matches!(
            self,
            BinwatchError::Fetch { .. } | BinwatchError::Parse { .. } | BinwatchError::Range { .. }
        )
    }
}
