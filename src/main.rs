//! connstat - Chart student connection activity from the terminal

use clap::Parser;
use connstat::{
    aggregation::Aggregator,
    aggregation_types::Totals,
    cli::Cli,
    dashboard::Dashboard,
    error::Result,
    output::get_formatter,
    preferences::{PreferenceStore, Preferences, save_or_warn},
    source::{FileRecordSource, HttpRecordSource, RecordSource},
    timezone::TimezoneConfig,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(cli: &Cli) {
    // --quiet and --verbose both override RUST_LOG
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("warn")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("connstat=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Pick the record source from the command line
fn build_source(cli: &Cli) -> Box<dyn RecordSource> {
    match &cli.file {
        Some(path) => Box::new(FileRecordSource::new(path)),
        None => Box::new(
            HttpRecordSource::new(&cli.url).with_timeout(Duration::from_secs(cli.timeout)),
        ),
    }
}

/// Apply command-line overrides on top of the saved preferences
fn resolve_preferences(cli: &Cli, saved: Preferences) -> Result<Preferences> {
    let mut prefs = saved;
    if cli.clear {
        prefs.clear();
    }
    if let Some(granularity) = cli.granularity {
        prefs.granularity = granularity;
    }
    prefs.merge_date_range(cli.date_overrides()?);
    Ok(prefs)
}

fn spinner(message: String) -> Option<ProgressBar> {
    if !is_terminal::is_terminal(std::io::stdout()) {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]")
    {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let store = PreferenceStore::locate(cli.prefs.as_deref());
    let saved = match &store {
        Some(store) => store.load().await,
        None => Preferences::default(),
    };
    let prefs = resolve_preferences(&cli, saved)?;

    if !cli.no_save {
        save_or_warn(store.as_ref(), &prefs).await;
    }

    let tz_config = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc)?;
    let aggregator = Aggregator::new(tz_config).with_week_start(cli.week_start);
    info!(
        "Using timezone: {}, weeks start on {}",
        aggregator.timezone_config().display_name(),
        aggregator.week_start()
    );

    let source = build_source(&cli);
    let progress = spinner(format!("Loading connections from {}", source.describe()));
    let dashboard = Dashboard::load(source.as_ref(), prefs, aggregator).await;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let chart = dashboard.chart_series();
    let totals = Totals::from_series(&chart);
    let formatter = get_formatter(cli.output_format());
    println!(
        "{}",
        formatter.format_series(&chart, &totals, dashboard.granularity())
    );

    Ok(())
}
