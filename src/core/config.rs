use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::registry::{Resource, ResourceRegistry};

/// Runtime configuration, loaded once at startup from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Seconds between monitoring cycles
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Alerts are evaluated every `alert_frequency` cycles
    #[serde(default = "default_alert_frequency")]
    pub alert_frequency: u64,
    /// Fullness percentage at or above which a resource alerts
    #[serde(default = "default_fullness_threshold")]
    pub fullness_alert_threshold: f64,
    /// Depletion estimates below this many minutes alert
    #[serde(default = "default_depletion_minutes")]
    pub depletion_alert_minutes: u64,
    /// Maximum simulated horizon for the depletion predictor
    #[serde(default = "default_horizon_days")]
    pub max_horizon_days: u32,
    /// Directory receiving the report and chart artifacts
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,
    /// Live-dashboard link offered to authenticated chat users
    #[serde(default)]
    pub dashboard_url: Option<String>,
    /// Optional combined-update telemetry sink
    #[serde(default)]
    pub publish: Option<PublishConfig>,
    pub resources: Vec<ResourceConfig>,
}

/// Telemetry sink receiving one combined update per cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    pub url: String,
    pub api_key: String,
}

/// One monitored resource as declared in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub label: String,
    pub depth: f64,
    pub source_url: String,
    #[serde(default = "default_field")]
    pub field: String,
    pub model_path: PathBuf,
}

fn default_interval_secs() -> u64 {
    15
}

fn default_alert_frequency() -> u64 {
    4
}

fn default_fullness_threshold() -> f64 {
    80.0
}

fn default_depletion_minutes() -> u64 {
    24 * 60
}

fn default_horizon_days() -> u32 {
    30
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_field() -> String {
    "field1".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, data).with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            bail!("interval_secs must be positive");
        }
        if self.alert_frequency == 0 {
            bail!("alert_frequency must be positive");
        }
        if self.resources.is_empty() {
            bail!("at least one resource must be configured");
        }
        for resource in &self.resources {
            if resource.depth <= 0.0 {
                bail!(
                    "resource {} has non-positive depth {}",
                    resource.label,
                    resource.depth
                );
            }
        }
        Ok(())
    }

    /// Materialize the immutable resource registry, ids assigned in
    /// declaration order.
    pub fn build_registry(&self) -> crate::Result<ResourceRegistry> {
        let resources = self
            .resources
            .iter()
            .enumerate()
            .map(|(id, rc)| Resource {
                id,
                label: rc.label.clone(),
                depth: rc.depth,
                source_url: rc.source_url.clone(),
                field: rc.field.clone(),
                model_path: rc.model_path.clone(),
            })
            .collect();
        ResourceRegistry::new(resources)
    }

    /// A starter config written by `binwatch init-config`.
    pub fn sample() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            alert_frequency: default_alert_frequency(),
            fullness_alert_threshold: default_fullness_threshold(),
            depletion_alert_minutes: default_depletion_minutes(),
            max_horizon_days: default_horizon_days(),
            artifacts_dir: default_artifacts_dir(),
            dashboard_url: Some("https://thingspeak.com/channels/2622766".to_string()),
            publish: Some(PublishConfig {
                url: "https://api.thingspeak.com/update".to_string(),
                api_key: "CHANGE-ME".to_string(),
            }),
            resources: vec![ResourceConfig {
                label: "A".to_string(),
                depth: 100.0,
                source_url:
                    "https://api.thingspeak.com/channels/0/fields/1/last.json?api_key=CHANGE-ME"
                        .to_string(),
                field: default_field(),
                model_path: PathBuf::from("models/a.json"),
            }],
        }
    }
}
