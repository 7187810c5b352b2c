//! Telemetry collection: one raw distance reading per resource per cycle.

use serde_json::Value;

use crate::core::registry::Resource;
use crate::error::{BinwatchError, Result};

/// Raw sensor output for one resource.
#[derive(Debug, Clone)]
pub struct Reading {
    pub resource_id: usize,
    /// Sensed distance from the sensor to the fill surface
    pub distance: f64,
    pub timestamp: i64,
}

/// Fetches and validates raw distance readings over HTTP.
pub struct TelemetryCollector {
    client: reqwest::Client,
}

impl TelemetryCollector {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch a single reading for one resource.
    ///
    /// Fails with a fetch fault on transport errors or non-success status,
    /// a parse fault on a malformed payload, and a range fault when the
    /// distance exceeds the sensor-plausibility limit. All three are soft:
    /// the caller keeps the resource's last-known sample and the next
    /// cycle retries naturally.
    pub async fn collect(&self, resource: &Resource) -> Result<Reading> {
        let response = self
            .client
            .get(&resource.source_url)
            .send()
            .await
            .map_err(|e| BinwatchError::fetch(&resource.label, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BinwatchError::fetch(
                &resource.label,
                format!("status code {}", status),
            ));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| BinwatchError::parse(&resource.label, e.to_string()))?;

        let distance = parse_distance(&payload, &resource.field)
            .ok_or_else(|| BinwatchError::parse(&resource.label, format!("missing or non-numeric {}", resource.field)))?;

        check_range(resource, distance)?;

        Ok(Reading {
            resource_id: resource.id,
            distance,
            timestamp: chrono::Utc::now().timestamp(),
        })
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the numeric distance field from a telemetry payload.
///
/// ThingSpeak-style feeds encode fields as strings; plain numbers are
/// accepted too.
pub fn parse_distance(payload: &Value, field: &str) -> Option<f64> {
    match payload.get(field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Sensor-plausibility check: a distance beyond 1.05x the container depth
/// usually means the sensor is misbehaving, not that the container is
/// empty. Such readings are rejected and must not update the stored
/// sample.
pub fn check_range(resource: &Resource, distance: f64) -> Result<()> {
    let limit = resource.range_limit();
    if distance > limit {
        return Err(BinwatchError::range(&resource.label, distance, limit));
    }
    Ok(())
}
