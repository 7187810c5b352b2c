//! The periodic monitoring pipeline: telemetry collection, fullness
//! analysis, depletion prediction, alerting, and artifact publishing.

pub mod alerts;
pub mod analyser;
pub mod chart;
pub mod collector;
pub mod predictor;
pub mod publisher;
pub mod report;
pub mod scheduler;

pub use alerts::AlertConfig;
pub use analyser::{fullness, FullnessAnalyser};
pub use collector::{Reading, TelemetryCollector};
pub use publisher::{ArtifactPaths, Publisher};
pub use report::{Report, ResourceStatus};
pub use scheduler::{monitor_task, MonitorContext};
