pub mod chat;
pub mod config;
pub mod model;
pub mod monitor;
pub mod registry;
pub mod runtime;

pub use config::Config;
pub use registry::{Resource, ResourceRegistry};
pub use runtime::MonitorRuntime;
