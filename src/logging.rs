//! Logging-related code (via [`tracing`]).

use std::path::PathBuf;

use miette::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
    Layer,
};


/// Where (and how verbosely) the rolling log file is written.
pub struct LogFileOptions {
    pub directory_path: PathBuf,
    pub file_name_prefix: String,
    pub level_filter: EnvFilter,
}


/// Initialize console (and optionally file) logging via [`tracing`](../../tracing/index.html).
///
/// Console output goes to standard error so that the bounds report on standard output
/// stays clean. If `RUST_LOG` is set, it takes precedence over `console_level_filter`.
///
/// When `log_file` is provided, log files are placed in its directory and roll over daily.
///
/// # Return value ([`WorkerGuard`]) obligations
/// **If file logging is enabled, the caller must ensure that the returned [`WorkerGuard`]
/// is not dropped until the end of the program.
/// After the guard is dropped, the log file will not be written to.**
pub fn initialize_tracing(
    console_level_filter: EnvFilter,
    log_file: Option<LogFileOptions>,
) -> Result<Option<WorkerGuard>> {
    let console_layer = {
        let console_tracing_format = tracing_subscriber::fmt::format()
            .with_ansi(true)
            .with_target(true)
            .with_level(true);

        let level_filter = if std::env::var("RUST_LOG").is_err() {
            console_level_filter
        } else {
            EnvFilter::from_default_env()
        };

        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .log_internal_errors(true)
            .event_format(console_tracing_format)
            .with_filter(level_filter)
    };

    let (file_layer, file_guard) = match log_file {
        Some(log_file) => {
            let file_tracing_format = tracing_subscriber::fmt::format()
                .with_ansi(false)
                .with_target(true)
                .with_level(true);

            let (appender, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(
                    log_file.directory_path,
                    log_file.file_name_prefix,
                ));

            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(appender)
                .log_internal_errors(true)
                .event_format(file_tracing_format)
                .with_filter(log_file.level_filter);

            (Some(file_layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();


    Ok(file_guard)
}
