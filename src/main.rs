use cohort_lens::analyzer::{Analyzer, CohortAnalyzer};
use cohort_lens::config::{AppConfig, DatasetConfig, load_config};
use cohort_lens::model::ProcessError;
use cohort_lens::report::{self, AnalysisReport};
use cohort_lens::source::{DatasetSource, JsonFileSource};
use futures::future::join_all;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::time::{Duration, sleep};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env).init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    // Load configuration from file
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            std::process::exit(1);
        }
    };
    info!("Datasets configured: {}", config.datasets.len());

    // Single pass over every dataset unless a watch interval is set
    let Some(interval) = config.watch_interval_seconds else {
        let selected: Vec<&DatasetConfig> = config.datasets.iter().collect();
        let failures = process_all(&selected, &config).await;
        if failures > 0 {
            error!("{} dataset(s) failed", failures);
            std::process::exit(1);
        }
        return;
    };

    // Watch loop: re-analyse datasets whose files changed
    let mut last_seen: HashMap<&str, SystemTime> = HashMap::new();
    loop {
        let mut changed = Vec::new();
        for dataset in &config.datasets {
            let Some(modified) = modified_at(&dataset.path).await else {
                warn!("Cannot stat {}, skipping this round", dataset.path.display());
                continue;
            };
            if last_seen.get(dataset.name.as_str()) != Some(&modified) {
                last_seen.insert(dataset.name.as_str(), modified);
                changed.push(dataset);
            }
        }

        if !changed.is_empty() {
            info!("Re-analysing {} changed dataset(s)...", changed.len());
            process_all(&changed, &config).await;
        }

        // Wait for the next round or Ctrl-C
        tokio::select! {
            _ = sleep(Duration::from_secs(interval)) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown requested.");
                break;
            }
        }
    }
}

/// Processes the datasets concurrently and returns the number that failed.
async fn process_all(datasets: &[&DatasetConfig], config: &AppConfig) -> usize {
    let tasks = datasets.iter().map(|dataset| process_dataset(dataset, config));
    let results = join_all(tasks).await;

    let mut failures = 0;
    for (dataset, result) in datasets.iter().zip(results) {
        match result {
            Ok(path) => info!("[{}] Report written: {}", dataset.name, path.display()),
            Err(e) => {
                warn!("[{}] Processing failed: {}", dataset.name, e);
                failures += 1;
            }
        }
    }
    failures
}

/// Loads, analyses and reports a single dataset.
async fn process_dataset(
    dataset: &DatasetConfig,
    config: &AppConfig,
) -> Result<PathBuf, ProcessError> {
    info!("[{}] Loading {}...", dataset.name, dataset.path.display());
    // Read and parse the dataset file
    let source = JsonFileSource::new(&dataset.path);
    let records = source.load().await?;

    info!("[{}] Analysing {} records...", dataset.name, records.len());
    let mut analyzer =
        CohortAnalyzer::new(dataset.analyzer_options(), config.synthetic.provider());
    let outcome = analyzer.analyze(records);
    report::log_summary(&dataset.name, &outcome);

    // Persist the report for this dataset
    let report = AnalysisReport::new(&dataset.name, &outcome, dataset.roster.as_ref());
    let path = report::write_report(&config.output_dir, &report).await?;
    Ok(path)
}

async fn modified_at(path: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(path).await.ok()?.modified().ok()
}
