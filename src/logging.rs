use crate::constants::{logging as logging_constants, metrics as metric_names};
use metrics::{describe_counter, describe_gauge, describe_histogram};
use tracing::Level;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
    Layer,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    pub enable_file_logging: bool,
    pub log_directory: Option<String>,
    pub enable_metrics_exporter: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: Level::INFO,
            format: LogFormat::Compact,
            enable_file_logging: false,
            log_directory: Some(logging_constants::DEFAULT_LOG_DIRECTORY.to_string()),
            enable_metrics_exporter: false,
        }
    }
}

/// Initialize the logging system.
///
/// When file logging is enabled the returned guard must be kept alive for
/// the lifetime of the process, otherwise buffered lines are lost.
pub fn init_logging(config: LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive(LevelFilter::from_level(config.level).into());

    let fmt_layer = match config.format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    let guard = if config.enable_file_logging {
        let log_dir = config
            .log_directory
            .unwrap_or_else(|| logging_constants::DEFAULT_LOG_DIRECTORY.to_string());
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = rolling::daily(&log_dir, logging_constants::LOG_FILE_NAME);
        let (writer, guard) = non_blocking(file_appender);

        let file_layer = fmt::layer()
            .json()
            .with_writer(writer)
            .with_span_events(FmtSpan::CLOSE);

        subscriber.with(file_layer).try_init()?;
        Some(guard)
    } else {
        subscriber.try_init()?;
        None
    };

    if config.enable_metrics_exporter {
        init_metrics()?;
    }

    Ok(guard)
}

/// Describe the validation metrics and install the Prometheus exporter
fn init_metrics() -> anyhow::Result<()> {
    describe_metrics();

    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    builder.install()?;

    Ok(())
}

pub fn describe_metrics() {
    describe_counter!(metric_names::PASSES_TOTAL, "Total number of completed validation passes");
    describe_counter!(metric_names::PASS_FAILURES_TOTAL, "Total number of aborted validation passes");
    describe_histogram!(metric_names::PASS_DURATION, "Validation pass duration");
    describe_gauge!(metric_names::SAMPLES_SEEN, "Samples evaluated in the last validation pass");
}
