use anyhow::{Context, Result};
use clap::{Arg, Command};
use colored::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

use binwatch::core::chat::auth::InMemoryAuthenticator;
use binwatch::core::chat::console::{spawn_stdin_reader, ConsoleTransport};
use binwatch::core::model::{RateModel, TableRateModel};
use binwatch::core::runtime::MonitorRuntime;
use binwatch::Config;

fn main() -> Result<()> {
    let matches = Command::new("binwatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Fill-level monitoring and alerting for bins and tanks")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to the config file")
                .default_value("binwatch.json")
                .global(true),
        )
        .subcommand(Command::new("run").about("Run the monitoring and chat engine (default)"))
        .subcommand(Command::new("check-config").about("Validate the config file and exit"))
        .subcommand(
            Command::new("init-config")
                .about("Write a starter config file and a sample rate model"),
        )
        .get_matches();

    binwatch::init_logging();

    let config_path = PathBuf::from(matches.get_one::<String>("config").unwrap());

    match matches.subcommand() {
        Some(("check-config", _)) => cmd_check_config(&config_path),
        Some(("init-config", _)) => cmd_init_config(&config_path),
        _ => cmd_run(&config_path),
    }
}

fn cmd_run(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let registry = config.build_registry()?;
    let models = load_models(&config)?;

    let (event_tx, event_rx) = mpsc::channel(64);
    spawn_stdin_reader(event_tx);

    let transport = Arc::new(ConsoleTransport);
    let auth = Arc::new(InMemoryAuthenticator::new());

    let runtime = MonitorRuntime::start(&config, registry, models, transport, auth, event_rx)?;

    let shutdown = runtime.shutdown_handle();
    ctrlc::set_handler(move || {
        let _ = shutdown.send(());
    })
    .context("Failed to install Ctrl-C handler")?;

    println!(
        "{} {} resources, every {}s, alerts every {} cycles",
        "Monitoring:".green().bold(),
        config.resources.len(),
        config.interval_secs,
        config.alert_frequency
    );
    println!(
        "{} type {} to interact, Ctrl-C to stop",
        "Console chat:".cyan().bold(),
        "<user_id> <text>".yellow()
    );

    runtime.wait();
    println!("{}", "Stopped.".dimmed());
    Ok(())
}

fn cmd_check_config(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    println!("{} {:?}", "Config OK:".green().bold(), config_path);
    for resource in &config.resources {
        println!(
            "  {} depth {:.1}, model {:?}",
            resource.label.bold(),
            resource.depth,
            resource.model_path
        );
    }
    Ok(())
}

fn cmd_init_config(config_path: &Path) -> Result<()> {
    let config = Config::sample();
    config.save(config_path)?;
    println!("{} {:?}", "Wrote config:".green().bold(), config_path);

    for resource in &config.resources {
        write_sample_model(&resource.model_path)?;
        println!("{} {:?}", "Wrote model:".green().bold(), resource.model_path);
    }
    println!("Edit the telemetry URLs and API keys before running.");
    Ok(())
}

fn load_models(config: &Config) -> Result<Vec<Arc<dyn RateModel>>> {
    config
        .resources
        .iter()
        .map(|resource| {
            let model = TableRateModel::load(&resource.model_path).with_context(|| {
                format!("Failed to load rate model for resource {}", resource.label)
            })?;
            Ok(Arc::new(model) as Arc<dyn RateModel>)
        })
        .collect()
}

/// Sample weekly model: light consumption at night, heavier during the day.
fn write_sample_model(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create model directory: {:?}", parent))?;
    }
    let day: Vec<f64> = (0..24)
        .map(|hour| if (8..20).contains(&hour) { -0.02 } else { -0.005 })
        .collect();
    let rates: Vec<Vec<f64>> = vec![day; 7];
    let data = serde_json::to_string_pretty(&serde_json::json!({ "rates": rates }))?;
    std::fs::write(path, data).with_context(|| format!("Failed to write model: {:?}", path))?;
    Ok(())
}
