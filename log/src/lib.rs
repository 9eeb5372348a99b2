//! Logging setup for autoscroll with file output and optional stderr.
//!
//! Logs always go to a file, at `warn` unless a filter variable is set. Terminal output
//! is enabled when `AUTOSCROLL_LOG` or `RUST_LOG` is set, or in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`AUTOSCROLL_LOG`** (highest priority). A bare level such as `debug` applies to the
//!    autoscroll crates only; anything with `=`, `:` or `,` is used as a full filter.
//! 2. **`RUST_LOG`**, used as-is.
//! 3. **Default**: `warn` globally, `info` for autoscroll crates.
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/autoscroll/logs/autoscroll-<pid>.log`
//! - macOS: `~/Library/Application Support/autoscroll/logs/autoscroll-12345.log`
//! - Linux: `~/.local/share/autoscroll/logs/autoscroll-12345.log`
//!
//! Override with `--log-file <path>` or `AUTOSCROLL_LOG_FILE`. A path with an extension
//! names the file; any other path names the directory.

use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const CRATES: &[&str] = &["autoscroll", "autoscroll_bin", "autoscroll_log"];

/// Returned from [`init`]. Dropping it flushes and stops the background file writer.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Default, Clone)]
pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// Fails if a global subscriber is already installed.
pub fn init(config: LogConfig) -> Result<LogGuard, BoxError> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(file_filter());

    let terminal_layer = terminal_enabled().then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(filter())
    });

    Registry::default()
        .with(file_layer)
        .with(terminal_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize logging for tests.
///
/// Writes to the test harness's captured output only. Safe to call from every test.
pub fn test() {
    let _ = fmt()
        .with_env_filter(filter())
        .with_test_writer()
        .try_init();
}

fn terminal_enabled() -> bool {
    env::var_os("AUTOSCROLL_LOG").is_some()
        || env::var_os("RUST_LOG").is_some()
        || cfg!(debug_assertions)
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("autoscroll-{}.log", std::process::id());

    let override_path =
        override_path.or_else(|| env::var_os("AUTOSCROLL_LOG_FILE").map(PathBuf::from));

    match override_path {
        Some(path) => split_override(path, filename),
        None => {
            let dir = dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("autoscroll")
                .join("logs");
            (dir, filename)
        },
    }
}

fn split_override(path: PathBuf, default_name: String) -> (PathBuf, String) {
    if path.extension().is_none() {
        return (path, default_name);
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or(default_name);
    let dir = match path.parent() {
        Some(parent) if parent != Path::new("") => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    (dir, name)
}

/// The file only gets the verbose filter when the user asked for one.
fn file_filter() -> EnvFilter {
    if env::var_os("AUTOSCROLL_LOG").is_some() || env::var_os("RUST_LOG").is_some() {
        return filter();
    }
    EnvFilter::new("warn")
}

fn filter() -> EnvFilter {
    filter_from(
        env::var("AUTOSCROLL_LOG").ok().as_deref(),
        env::var("RUST_LOG").ok().as_deref(),
    )
}

fn filter_from(autoscroll_log: Option<&str>, rust_log: Option<&str>) -> EnvFilter {
    EnvFilter::new(directives(autoscroll_log, rust_log))
}

fn directives(autoscroll_log: Option<&str>, rust_log: Option<&str>) -> String {
    match (autoscroll_log, rust_log) {
        (Some(value), _) if value.contains(['=', ':', ',']) => value.to_string(),
        (Some(level), _) => crate_directives(level),
        (None, Some(rust_log)) => rust_log.to_string(),
        (None, None) => crate_directives("info"),
    }
}

fn crate_directives(level: &str) -> String {
    let mut directives = String::from("warn");
    for name in CRATES {
        directives.push_str(&format!(",{name}={level}"));
    }
    directives
}
