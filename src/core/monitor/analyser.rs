//! Fullness computation and the per-resource sample store.

use crate::core::monitor::collector::Reading;
use crate::core::monitor::report::{Report, ResourceStatus};
use crate::core::registry::ResourceRegistry;

/// Percentage occupancy derived from a distance reading.
///
/// Pure and total: any finite distance maps into [0, 100]. Filtering of
/// implausible distances happens upstream in the collector; a negative or
/// oversized distance here simply clamps.
pub fn fullness(depth: f64, distance: f64) -> f64 {
    let raw = (depth - distance) / depth * 100.0;
    raw.clamp(0.0, 100.0)
}

/// Holds the last-known fullness sample for every resource.
///
/// A sample is overwritten only when a valid reading arrives; faulted
/// cycles keep the previous value (stale-but-available).
#[derive(Debug, Clone)]
pub struct FullnessAnalyser {
    samples: Vec<f64>,
}

impl FullnessAnalyser {
    pub fn new(resource_count: usize) -> Self {
        Self {
            samples: vec![0.0; resource_count],
        }
    }

    /// Record a validated reading, overwriting the resource's sample.
    pub fn record(&mut self, depth: f64, reading: &Reading) {
        if let Some(sample) = self.samples.get_mut(reading.resource_id) {
            *sample = fullness(depth, reading.distance);
        }
    }

    /// Current fullness values, indexed by resource id.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Snapshot the current samples into a report.
    pub fn snapshot(&self, registry: &ResourceRegistry) -> Report {
        let statuses = registry
            .iter()
            .map(|resource| ResourceStatus {
                resource_id: resource.id,
                label: resource.label.clone(),
                fullness: self.samples.get(resource.id).copied().unwrap_or(0.0),
            })
            .collect();
        Report::build(statuses)
    }
}
