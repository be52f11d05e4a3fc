use std::path::Path;

/// File written into the directory passed to [`init_tracing`].
pub const TRACE_FILE_NAME: &str = "kana-typing-trace.jsonl";

/// Environment variable holding an `EnvFilter` directive that overrides
/// [`DEFAULT_FILTER`].
pub const FILTER_ENV: &str = "KANA_TYPING_LOG";

#[cfg_attr(not(feature = "trace"), allow(dead_code))]
const DEFAULT_FILTER: &str = "kana_typing=debug,typing_core=debug,typing_session=debug";

/// Keeps the trace writer alive. Buffered lines are flushed when dropped.
#[must_use = "dropping the guard stops trace output"]
pub struct TraceGuard {
    #[cfg(feature = "trace")]
    _worker: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Install a JSON-lines subscriber writing [`TRACE_FILE_NAME`] into
/// `log_dir`, creating the directory if needed.
///
/// If a global subscriber is already installed the call leaves it in place
/// and the returned guard holds nothing. Without the `trace` feature this
/// does nothing at all.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> std::io::Result<TraceGuard> {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    std::fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::never(log_dir, TRACE_FILE_NAME);
    let (writer, worker) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::fmt()
        .json()
        .with_writer(writer)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(filter)
        .try_init()
        .is_ok();

    Ok(TraceGuard {
        _worker: installed.then_some(worker),
    })
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &Path) -> std::io::Result<TraceGuard> {
    Ok(TraceGuard {})
}

#[cfg(all(test, feature = "trace"))]
mod tests {
    use tracing::level_filters::{LevelFilter, STATIC_MAX_LEVEL};

    use super::*;

    #[test]
    fn test_debug_level_compiled_in() {
        assert!(STATIC_MAX_LEVEL >= LevelFilter::DEBUG);
    }

    #[test]
    fn test_trace_file_receives_events() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let guard = init_tracing(&log_dir).unwrap();
        let session_span = tracing::debug_span!("handle_key", key = 'k');
        session_span.in_scope(|| tracing::debug!(kana = "か", "trace file check"));
        drop(session_span);
        drop(guard);

        let content = std::fs::read_to_string(log_dir.join(TRACE_FILE_NAME)).unwrap();
        let line = content
            .lines()
            .find(|l| l.contains("trace file check"))
            .expect("debug event missing from trace file");
        let json: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(json["level"], "DEBUG");
        assert_eq!(json["target"], "kana_typing::trace_init::tests");
        assert_eq!(json["fields"]["kana"], "か");
    }
}
