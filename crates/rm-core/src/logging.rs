use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize the tracing subscriber for a binary.
///
/// Filtering follows `RUST_LOG` (default `info`). When `RM_LOG_DIR` is set,
/// output goes to `<RM_LOG_DIR>/<app>.log` with daily rotation; otherwise it
/// goes to stderr, leaving stdout free for result JSON. Safe to call more
/// than once; later calls are no-ops.
pub fn init(app_name: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    let writer = file_writer(app_name).unwrap_or_else(|| BoxMakeWriter::new(std::io::stderr));
    let _ = builder.with_writer(writer).try_init();
}

fn file_writer(app_name: &str) -> Option<BoxMakeWriter> {
    let dir = std::path::PathBuf::from(std::env::var_os("RM_LOG_DIR")?);
    if let Err(err) = std::fs::create_dir_all(&dir) {
        eprintln!("failed to create RM_LOG_DIR {}: {err}; logging to stdout", dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Some(BoxMakeWriter::new(non_blocking))
}
