//! Tokio runtime wiring for the two engine activities.
//!
//! The interval-driven monitoring task and the message-driven chat task
//! are spawned independently and share only the subscriber registry, the
//! cycle counter, and the shutdown broadcast. Neither calls into the
//! other.

use std::fs;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::{broadcast, mpsc};
use tokio::time::Duration;

use crate::core::chat::auth::Authenticator;
use crate::core::chat::dispatcher::{chat_task, ChatEngine};
use crate::core::chat::subscribers::SubscriberRegistry;
use crate::core::chat::transport::{ChatEvent, ChatTransport};
use crate::core::config::Config;
use crate::core::model::RateModel;
use crate::core::monitor::alerts::AlertConfig;
use crate::core::monitor::collector::TelemetryCollector;
use crate::core::monitor::publisher::{ArtifactPaths, Publisher};
use crate::core::monitor::scheduler::{monitor_task, MonitorContext};
use crate::core::registry::ResourceRegistry;

/// Owns the runtime and the two spawned activities.
pub struct MonitorRuntime {
    shutdown_tx: broadcast::Sender<()>,
    cycle: Arc<AtomicU64>,
    runtime: tokio::runtime::Runtime,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MonitorRuntime {
    /// Build the runtime and spawn both activities.
    pub fn start(
        config: &Config,
        registry: ResourceRegistry,
        models: Vec<Arc<dyn RateModel>>,
        transport: Arc<dyn ChatTransport>,
        auth: Arc<dyn Authenticator>,
        events: mpsc::Receiver<ChatEvent>,
    ) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("binwatch-worker")
            .build()?;

        fs::create_dir_all(&config.artifacts_dir).with_context(|| {
            format!("Failed to create artifacts directory: {:?}", config.artifacts_dir)
        })?;
        let artifacts = ArtifactPaths::new(&config.artifacts_dir);

        let subscribers = Arc::new(SubscriberRegistry::new());
        let cycle = Arc::new(AtomicU64::new(0));
        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        let ctx = MonitorContext {
            registry: Arc::new(registry),
            models,
            collector: TelemetryCollector::new(),
            publisher: Publisher::new(config.publish.clone()),
            alert_config: AlertConfig {
                fullness_threshold: config.fullness_alert_threshold,
                depletion_minutes: config.depletion_alert_minutes,
                alert_frequency: config.alert_frequency,
            },
            horizon_days: config.max_horizon_days,
            interval: Duration::from_secs(config.interval_secs),
            artifacts: artifacts.clone(),
            subscribers: subscribers.clone(),
            cycle: cycle.clone(),
            transport: transport.clone(),
        };

        let engine = ChatEngine::new(
            auth,
            subscribers,
            artifacts,
            config.dashboard_url.clone(),
        );

        let monitor_handle = runtime.spawn(monitor_task(ctx, shutdown_tx.subscribe()));
        let chat_handle = runtime.spawn(chat_task(
            engine,
            transport,
            events,
            shutdown_tx.clone(),
            shutdown_tx.subscribe(),
        ));

        Ok(Self {
            shutdown_tx,
            cycle,
            runtime,
            handles: vec![monitor_handle, chat_handle],
        })
    }

    /// Sender that triggers shutdown of both activities.
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Number of completed monitoring cycles.
    pub fn cycle_count(&self) -> u64 {
        self.cycle.load(Ordering::SeqCst)
    }

    /// Block until both activities have observed shutdown and ended.
    pub fn wait(self) {
        let MonitorRuntime {
            shutdown_tx,
            runtime,
            handles,
            ..
        } = self;
        runtime.block_on(async {
            for handle in handles {
                let _ = handle.await;
            }
        });
        // Dropping the sender before the tasks finish would close the
        // broadcast channel and read as a shutdown signal
        drop(shutdown_tx);
    }

    /// Trigger shutdown and block until both activities end.
    pub fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        self.wait();
    }
}
