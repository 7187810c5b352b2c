//! Alert evaluation and broadcast.
//!
//! Evaluates fullness and depletion thresholds against the current report
//! and composes the messages sent to subscribed chats.

use crate::core::chat::subscribers::SubscriberRegistry;
use crate::core::chat::transport::ChatTransport;
use crate::core::monitor::predictor::format_minutes;
use crate::core::monitor::report::Report;

/// Alert thresholds and cadence.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Fullness percentage at or above which a resource alerts
    pub fullness_threshold: f64,
    /// Depletion estimates strictly below this many minutes alert
    pub depletion_minutes: u64,
    /// Alerts are evaluated every this many cycles
    pub alert_frequency: u64,
}

/// Whether alerts run on this cycle. Threshold state is irrelevant on
/// off-cycles; this bounds alert frequency regardless of how often the
/// conditions hold.
pub fn is_alert_cycle(cycle: u64, alert_frequency: u64) -> bool {
    alert_frequency != 0 && cycle % alert_frequency == 0
}

/// Compose one message per triggered resource, in registry order.
///
/// The first triggered resource carries a single leading "Alert" banner
/// line; subsequent messages do not repeat it. `estimates` holds the
/// depletion estimate in minutes per resource, `None` meaning no depletion
/// within the simulated horizon.
pub fn compose_alerts(
    report: &Report,
    estimates: &[Option<u64>],
    config: &AlertConfig,
) -> Vec<String> {
    let mut messages = Vec::new();

    for (i, status) in report.statuses.iter().enumerate() {
        let mut lines = Vec::new();

        if status.fullness >= config.fullness_threshold {
            lines.push(format!(
                "{} is {:.2}% full. Please empty it.",
                status.label, status.fullness
            ));
        }

        if let Some(Some(minutes)) = estimates.get(i) {
            if *minutes < config.depletion_minutes {
                lines.push(format!(
                    "{} is expected to run out in {}.",
                    status.label,
                    format_minutes(*minutes)
                ));
            }
        }

        if lines.is_empty() {
            continue;
        }

        let body = lines.join("\n");
        if messages.is_empty() {
            messages.push(format!("Alert\n{}", body));
        } else {
            messages.push(body);
        }
    }

    messages
}

/// Send each message to every subscribed chat.
///
/// A delivery fault to one recipient is logged and must not block the
/// remaining recipients or messages.
pub fn broadcast(
    transport: &dyn ChatTransport,
    subscribers: &SubscriberRegistry,
    messages: &[String],
) {
    let recipients = subscribers.snapshot();
    for message in messages {
        for &chat_id in &recipients {
            if let Err(e) = transport.send_message(chat_id, message) {
                log::warn!("Alert delivery failed: {}", e);
            }
        }
    }
}
