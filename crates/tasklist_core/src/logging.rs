//! Process-wide logging bootstrap. Initialization is idempotent for the
//! same level and rejected for a conflicting one; diagnostics go to
//! stderr so they never interleave with command output on stdout.

use flexi_logger::{Logger, LoggerHandle};
use once_cell::sync::OnceCell;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    _logger: LoggerHandle,
}

/// Starts the logger at `level`. Repeated calls with the same level are
/// no-ops; a different level is refused instead of silently ignored.
pub fn init_logging(level: &str) -> Result<(), String> {
    let normalized = normalize_level(level)?;

    if let Some(state) = LOGGING_STATE.get() {
        if state.level == normalized {
            return Ok(());
        }
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{normalized}`",
            state.level
        ));
    }

    LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, String> {
        let logger = Logger::try_with_str(normalized)
            .map_err(|err| format!("invalid log level `{normalized}`: {err}"))?
            .log_to_stderr()
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;

        Ok(LoggingState {
            level: normalized,
            _logger: logger,
        })
    })?;

    Ok(())
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}
