//! Registry of monitored resources.
//!
//! Resources are created once at startup from configuration and never
//! mutated. Registry order is config order and is the tie-break order for
//! report rankings and alert composition.

use std::path::PathBuf;

use crate::error::{BinwatchError, Result};

/// A monitored container (bin/tank) with a known maximum sensed depth.
///
/// `depth` is the sensor's reading for an empty container; a reading equal
/// to `depth` means 0% full, a reading of 0 means 100% full.
#[derive(Debug, Clone)]
pub struct Resource {
    pub id: usize,
    pub label: String,
    pub depth: f64,
    pub source_url: String,
    /// JSON field carrying the distance value in the telemetry payload
    pub field: String,
    pub model_path: PathBuf,
}

impl Resource {
    /// Upper bound above which a distance reading is treated as a sensor
    /// fault rather than an empty container.
    pub fn range_limit(&self) -> f64 {
        self.depth * 1.05
    }
}

/// Ordered, immutable set of monitored resources.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    resources: Vec<Resource>,
}

impl ResourceRegistry {
    pub fn new(resources: Vec<Resource>) -> Result<Self> {
        if resources.is_empty() {
            return Err(BinwatchError::config("no resources configured"));
        }
        for resource in &resources {
            if resource.depth <= 0.0 {
                return Err(BinwatchError::config(format!(
                    "resource {} has non-positive depth {}",
                    resource.label, resource.depth
                )));
            }
        }
        Ok(Self { resources })
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Resource> {
        self.resources.get(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.resources.iter()
    }
}
