//! The interval-driven monitoring activity.
//!
//! One long-lived task drives the full cycle: collect, analyse, report,
//! predict, alert, publish. Every fault along the way is logged and
//! contained; nothing here ends the task short of shutdown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::core::chat::subscribers::SubscriberRegistry;
use crate::core::chat::transport::ChatTransport;
use crate::core::model::{RateModel, WeekClock};
use crate::core::monitor::alerts::{self, AlertConfig};
use crate::core::monitor::analyser::FullnessAnalyser;
use crate::core::monitor::chart;
use crate::core::monitor::collector::TelemetryCollector;
use crate::core::monitor::predictor::predict_depletion;
use crate::core::monitor::publisher::{write_report, ArtifactPaths, Publisher};
use crate::core::registry::ResourceRegistry;

/// Everything the monitoring task needs, assembled once by the runtime.
pub struct MonitorContext {
    pub registry: Arc<ResourceRegistry>,
    /// Per-resource predictive models, indexed by resource id
    pub models: Vec<Arc<dyn RateModel>>,
    pub collector: TelemetryCollector,
    pub publisher: Publisher,
    pub alert_config: AlertConfig,
    pub horizon_days: u32,
    pub interval: Duration,
    pub artifacts: ArtifactPaths,
    pub subscribers: Arc<SubscriberRegistry>,
    pub cycle: Arc<AtomicU64>,
    pub transport: Arc<dyn ChatTransport>,
}

/// Task that runs the monitoring cycle on a fixed interval.
///
/// No drift correction: a slow cycle delays the next tick by its own
/// duration plus the configured interval.
pub async fn monitor_task(ctx: MonitorContext, mut shutdown: broadcast::Receiver<()>) {
    log::info!(
        "Monitoring task started: {} resources, interval {:?}",
        ctx.registry.len(),
        ctx.interval
    );

    let mut analyser = FullnessAnalyser::new(ctx.registry.len());

    let mut ticker = interval(ctx.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                run_cycle(&ctx, &mut analyser).await;
            }
            _ = shutdown.recv() => {
                log::info!("Monitoring task shutting down");
                break;
            }
        }
    }
}

async fn run_cycle(ctx: &MonitorContext, analyser: &mut FullnessAnalyser) {
    let cycle = ctx.cycle.fetch_add(1, Ordering::SeqCst) + 1;
    log::debug!("Monitoring cycle {} started", cycle);

    // Collect: failures are isolated per resource, keeping the previous
    // sample for the faulted one
    for resource in ctx.registry.iter() {
        match ctx.collector.collect(resource).await {
            Ok(reading) => {
                log::debug!("Raw distance for {}: {:.2}", resource.label, reading.distance);
                analyser.record(resource.depth, &reading);
            }
            Err(e) => {
                log::warn!("{}", e);
            }
        }
    }

    let report = analyser.snapshot(&ctx.registry);

    // Predict depletion for every resource from the current wall clock
    let start = WeekClock::now();
    let estimates: Vec<Option<u64>> = ctx
        .registry
        .iter()
        .map(|resource| {
            let level = analyser.samples()[resource.id];
            predict_depletion(level, ctx.models[resource.id].as_ref(), start, ctx.horizon_days)
        })
        .collect();

    if alerts::is_alert_cycle(cycle, ctx.alert_config.alert_frequency) {
        let messages = alerts::compose_alerts(&report, &estimates, &ctx.alert_config);
        if !messages.is_empty() {
            log::info!("Broadcasting {} alert message(s)", messages.len());
            alerts::broadcast(ctx.transport.as_ref(), &ctx.subscribers, &messages);
        }
    }

    if let Err(e) = ctx.publisher.publish(analyser.samples()).await {
        log::warn!("Telemetry publish failed: {}", e);
    }

    if let Err(e) = write_report(&ctx.artifacts.report, &report) {
        log::warn!("Report artifact write failed: {}", e);
    }

    if let Err(e) = chart::save_chart(&report, &ctx.artifacts.chart) {
        log::warn!("Chart artifact write failed: {}", e);
    }

    log::debug!("Monitoring cycle {} finished", cycle);
}
