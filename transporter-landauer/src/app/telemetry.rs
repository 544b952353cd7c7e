use super::LogLevel;
use std::path::Path;
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Creates a subscriber which write to `console::Term::stdout` and to a log file `log.log`
/// located in the results directory.
pub(crate) fn get_subscriber(
    log_level: LogLevel,
    results_directory: &Path,
) -> (
    impl Subscriber + Send + Sync,
    tracing_appender::non_blocking::WorkerGuard,
) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    let fmt_layer = tracing_subscriber::fmt::Layer::new()
        .with_writer(console::Term::stdout)
        .without_time();

    let appender = tracing_appender::rolling::never(results_directory, "log.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    (
        Registry::default().with(env_filter).with(fmt_layer).with(
            tracing_subscriber::fmt::Layer::new()
                .with_writer(non_blocking)
                .json(),
        ),
        guard,
    )
}

pub(crate) fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> color_eyre::Result<()> {
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}
