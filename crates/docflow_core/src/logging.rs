//! Logging bootstrap for the console core.
//!
//! # Responsibility
//! - Initialize the process logger exactly once, either to stderr or to a
//!   rolling file directory.
//! - Keep emitted events metadata-only: ids, roles, counts and statuses.
//!
//! # Invariants
//! - Re-initialization with an identical configuration is a no-op.
//! - Re-initialization with a different level or directory is rejected.
//! - Initialization never panics.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
    WriteMode,
};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::LoggingConfig;

const LOG_FILE_BASENAME: &str = "docflow";
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unsupported log level `{0}`; expected trace|debug|info|warn|error")]
    UnsupportedLevel(String),
    #[error("log dir cannot be empty")]
    EmptyDir,
    #[error("log dir must be an absolute path, got `{0}`")]
    RelativeDir(PathBuf),
    #[error("failed to create log directory `{path}`: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start logger: {0}")]
    Backend(#[from] FlexiLoggerError),
    #[error("logging already initialized with {active}; refusing to switch to {requested}")]
    Conflict { active: String, requested: String },
}

struct LoggingState {
    level: &'static str,
    log_dir: Option<PathBuf>,
    _logger: LoggerHandle,
}

impl LoggingState {
    fn describe(level: &str, log_dir: Option<&Path>) -> String {
        match log_dir {
            Some(dir) => format!("level={level} dir={}", dir.display()),
            None => format!("level={level} dir=stderr"),
        }
    }

    fn ensure_same(&self, level: &'static str, log_dir: Option<&Path>) -> Result<(), LoggingError> {
        if self.level == level && self.log_dir.as_deref() == log_dir {
            return Ok(());
        }
        Err(LoggingError::Conflict {
            active: Self::describe(self.level, self.log_dir.as_deref()),
            requested: Self::describe(level, log_dir),
        })
    }
}

/// Initializes process logging from `config`.
///
/// Without a `dir` the logger writes to stderr. With a `dir`, logs rotate by
/// size inside it and `duplicate_to_stderr` echoes info and above.
///
/// # Errors
/// - The level is not one of trace|debug|info|warn|error.
/// - The directory is blank, relative, or cannot be created.
/// - The backend refuses to start.
/// - Logging is already active with a different level or directory.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let level = normalize_level(&config.level)?;
    let log_dir = config.dir.as_deref().map(normalize_log_dir).transpose()?;

    if let Some(state) = LOGGING_STATE.get() {
        return state.ensure_same(level, log_dir.as_deref());
    }

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, LoggingError> {
        let logger = match &log_dir {
            Some(dir) => start_file_logger(level, dir, config)?,
            None => Logger::try_with_str(level)?
                .log_to_stderr()
                .format_for_stderr(flexi_logger::detailed_format)
                .start()?,
        };

        install_panic_hook_once();

        info!(
            "event=app_start module=core status=ok platform={} build_mode={} version={}",
            std::env::consts::OS,
            build_mode(),
            env!("CARGO_PKG_VERSION")
        );
        info!(
            "event=logging_init module=core status=ok {}",
            LoggingState::describe(level, log_dir.as_deref())
        );

        Ok(LoggingState {
            level,
            log_dir: log_dir.clone(),
            _logger: logger,
        })
    })?;

    // Another thread may have won the race with a different configuration.
    state.ensure_same(level, log_dir.as_deref())
}

/// Returns `(level, log_dir)` when logging is active.
///
/// `log_dir` is `None` when logging goes to stderr.
pub fn logging_status() -> Option<(&'static str, Option<PathBuf>)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

fn start_file_logger(
    level: &'static str,
    dir: &Path,
    config: &LoggingConfig,
) -> Result<LoggerHandle, LoggingError> {
    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let duplicate = if config.duplicate_to_stderr {
        Duplicate::Info
    } else {
        Duplicate::None
    };

    let handle = Logger::try_with_str(level)?
        .log_to_file(
            FileSpec::default()
                .directory(dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(config.max_file_size_bytes),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.max_files),
        )
        .duplicate_to_stderr(duplicate)
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;
    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}

fn normalize_log_dir(log_dir: &Path) -> Result<PathBuf, LoggingError> {
    let raw = log_dir.to_string_lossy();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LoggingError::EmptyDir);
    }
    let path = PathBuf::from(trimmed);
    if !path.is_absolute() {
        return Err(LoggingError::RelativeDir(path));
    }
    Ok(path)
}

fn build_mode() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.get().is_some() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_payload_summary(panic_info);
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location, payload
        );
        previous_hook(panic_info);
    }));

    let _ = PANIC_HOOK_INSTALLED.set(());
}

fn panic_payload_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
}

/// Flattens newlines and caps length so user text cannot forge log lines.
fn sanitize_message(value: &str, max_chars: usize) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut truncated = normalized.chars().take(max_chars).collect::<String>();
    if normalized.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}

#[cfg(test)]
mod tests {
    use super::{
        init_logging, logging_status, normalize_level, normalize_log_dir, sanitize_message,
        LoggingError,
    };
    use crate::config::LoggingConfig;
    use std::path::Path;

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        assert!(matches!(
            normalize_level("loud").unwrap_err(),
            LoggingError::UnsupportedLevel(level) if level == "loud"
        ));
    }

    #[test]
    fn normalize_log_dir_rejects_blank_and_relative_paths() {
        assert!(matches!(
            normalize_log_dir(Path::new("  ")).unwrap_err(),
            LoggingError::EmptyDir
        ));
        assert!(matches!(
            normalize_log_dir(Path::new("logs/dev")).unwrap_err(),
            LoggingError::RelativeDir(_)
        ));
    }

    #[test]
    fn sanitize_message_removes_newlines_and_truncates() {
        let sanitized = sanitize_message("line1\nline2\rline3", 8);
        assert!(!sanitized.contains('\n'));
        assert!(!sanitized.contains('\r'));
        assert!(sanitized.ends_with("..."));
    }

    #[test]
    fn init_logging_is_idempotent_for_same_config_and_rejects_conflicts() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            level: "info".to_string(),
            dir: Some(first.path().to_path_buf()),
            ..LoggingConfig::default()
        };

        init_logging(&config).expect("first init should succeed");
        init_logging(&config).expect("same config should be idempotent");

        let louder = LoggingConfig {
            level: "debug".to_string(),
            ..config.clone()
        };
        assert!(matches!(
            init_logging(&louder).unwrap_err(),
            LoggingError::Conflict { .. }
        ));

        let moved = LoggingConfig {
            dir: Some(second.path().to_path_buf()),
            ..config.clone()
        };
        assert!(matches!(
            init_logging(&moved).unwrap_err(),
            LoggingError::Conflict { .. }
        ));

        let (active_level, active_dir) = logging_status().expect("logging should be active");
        assert_eq!(active_level, "info");
        assert_eq!(active_dir.as_deref(), Some(first.path()));
    }
}
