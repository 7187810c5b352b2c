//! Report snapshot produced once per monitoring cycle.

use serde::{Deserialize, Serialize};

/// Current fullness of one resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceStatus {
    pub resource_id: usize,
    pub label: String,
    /// Percentage occupancy in [0, 100]
    pub fullness: f64,
}

/// Aggregated snapshot of all current fullness samples.
///
/// Regenerated wholesale each cycle; the previous report is overwritten,
/// never appended to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub timestamp: i64,
    pub statuses: Vec<ResourceStatus>,
    /// Index into `statuses` of the most occupied resource
    pub most_occupied: Option<usize>,
    /// Index into `statuses` of the least occupied resource
    pub least_occupied: Option<usize>,
}

impl Report {
    /// Build a report from per-resource statuses. Ranking ties are broken
    /// by registry order (first registered wins).
    pub fn build(statuses: Vec<ResourceStatus>) -> Self {
        let mut most_occupied = None;
        let mut least_occupied = None;
        for (i, status) in statuses.iter().enumerate() {
            match most_occupied {
                None => most_occupied = Some(i),
                Some(m) if status.fullness > statuses[m].fullness => most_occupied = Some(i),
                _ => {}
            }
            match least_occupied {
                None => least_occupied = Some(i),
                Some(m) if status.fullness < statuses[m].fullness => least_occupied = Some(i),
                _ => {}
            }
        }
        Report {
            timestamp: chrono::Utc::now().timestamp(),
            statuses,
            most_occupied,
            least_occupied,
        }
    }

    /// Render the textual report artifact: one line per resource in
    /// registry order, then the occupancy ranking.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push("Fullness for Each Bin".to_string());
        for status in &self.statuses {
            lines.push(format!("{}: {:.2}%", status.label, status.fullness));
        }
        lines.push("Up to Now:".to_string());
        if let Some(i) = self.most_occupied {
            lines.push(format!(
                "Most occupied: {} - {:.2}%",
                self.statuses[i].label, self.statuses[i].fullness
            ));
        }
        if let Some(i) = self.least_occupied {
            lines.push(format!(
                "Least occupied: {} - {:.2}%",
                self.statuses[i].label, self.statuses[i].fullness
            ));
        }
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}
