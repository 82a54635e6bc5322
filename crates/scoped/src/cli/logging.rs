//! Diagnostic logging setup.

use std::io;

use scoped_config::LogLevel;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Maps a configured log level onto a tracing level.
fn tracing_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}

/// Installs a stderr subscriber filtering at `level`.
///
/// Stdout stays reserved for command output.
pub fn init(level: LogLevel) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing_level(level))
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: could not install logger: {e}");
    }
}
