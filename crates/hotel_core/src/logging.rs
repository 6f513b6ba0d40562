//! Service logging bootstrap.
//!
//! # Responsibility
//! - Start the `flexi_logger` backend behind the `log` facade once per process.
//! - Write rotating files when a directory is configured, stderr otherwise.
//! - Route panics through the logger before the default hook runs.
//!
//! # Invariants
//! - Repeating `init_logging` with identical settings is a no-op.
//! - Different settings after the first successful call are rejected.
//! - Initialization reports failures as values and never panics.

use flexi_logger::{
    detailed_format, Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
    WriteMode,
};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Once;
use thiserror::Error;

const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE: OnceCell<ActiveLogging> = OnceCell::new();
static PANIC_HOOK: Once = Once::new();

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unsupported log level `{0}`; expected trace|debug|info|warn|error")]
    UnsupportedLevel(String),
    #[error("log directory must be a non-empty absolute path, got `{0}`")]
    InvalidDirectory(String),
    #[error("failed to create log directory `{}`: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start logger: {0}")]
    Backend(#[from] FlexiLoggerError),
    #[error("logging already active with {active}; refusing {requested}")]
    Conflict { active: String, requested: String },
}

/// Verbosity accepted in `logger.level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(LoggingError::UnsupportedLevel(value.trim().to_string())),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where log records end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Rotating `<service>_rCURRENT.log` files inside an absolute directory.
    Directory(PathBuf),
}

impl LogTarget {
    fn from_dir(log_dir: Option<&str>) -> Result<Self, LoggingError> {
        let Some(raw) = log_dir else {
            return Ok(Self::Stderr);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || !Path::new(trimmed).is_absolute() {
            return Err(LoggingError::InvalidDirectory(trimmed.to_string()));
        }
        Ok(Self::Directory(PathBuf::from(trimmed)))
    }
}

impl Display for LogTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stderr => f.write_str("stderr"),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

struct ActiveLogging {
    level: LogLevel,
    target: LogTarget,
    _handle: LoggerHandle,
}

impl ActiveLogging {
    fn ensure_matches(&self, level: LogLevel, target: &LogTarget) -> Result<(), LoggingError> {
        if self.level == level && &self.target == target {
            return Ok(());
        }
        Err(LoggingError::Conflict {
            active: format!("level={} target={}", self.level, self.target),
            requested: format!("level={level} target={target}"),
        })
    }
}

/// Starts logging for `service`.
///
/// `service` names the log files; `log_dir` switches from stderr to
/// rotating files in that directory.
pub fn init_logging(level: &str, service: &str, log_dir: Option<&str>) -> Result<(), LoggingError> {
    let level: LogLevel = level.parse()?;
    let target = LogTarget::from_dir(log_dir)?;

    let active = ACTIVE.get_or_try_init(|| start_backend(level, service, &target))?;
    active.ensure_matches(level, &target)
}

/// Level used when `logger.level` is not configured.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        LogLevel::Debug.as_str()
    } else {
        LogLevel::Info.as_str()
    }
}

fn start_backend(
    level: LogLevel,
    service: &str,
    target: &LogTarget,
) -> Result<ActiveLogging, LoggingError> {
    let logger = Logger::try_with_str(level.as_str())?;
    let handle = match target {
        LogTarget::Stderr => logger.log_to_stderr().format(detailed_format).start()?,
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDirectory {
                path: dir.clone(),
                source,
            })?;
            logger
                .log_to_file(FileSpec::default().directory(dir.as_path()).basename(service))
                .rotate(
                    Criterion::Size(ROTATE_AT_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(detailed_format)
                .start()?
        }
    };

    install_panic_hook();
    info!(
        "event=logging_init module=logging status=ok service={} level={} target={} os={} version={}",
        service,
        level,
        target,
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogging {
        level,
        target: target.clone(),
        _handle: handle,
    })
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let location = info.location().map_or_else(
                || "unknown".to_string(),
                |loc| format!("{}:{}", loc.file(), loc.line()),
            );
            let current = std::thread::current();
            // Payloads can echo request data; keep them to one capped line.
            error!(
                "event=panic module=logging status=error thread={} location={} payload={}",
                current.name().unwrap_or("unnamed"),
                location,
                one_line(panic_payload(info), MAX_PANIC_PAYLOAD_CHARS)
            );
            previous(info);
        }));
    });
}

fn panic_payload<'a>(info: &'a std::panic::PanicHookInfo<'_>) -> &'a str {
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Joins the lines of `value` with spaces and caps it at `max_chars`.
pub(crate) fn one_line(value: &str, max_chars: usize) -> String {
    let joined = value
        .lines()
        .flat_map(|line| line.split('\r'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.chars().count() <= max_chars {
        return joined;
    }
    let mut capped: String = joined.chars().take(max_chars).collect();
    capped.push_str("...");
    capped
}

#[cfg(test)]
mod tests {
    use super::{init_logging, one_line, LogLevel, LogTarget, LoggingError, ACTIVE};

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!(" warning ".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!(matches!(
            "verbose".parse::<LogLevel>(),
            Err(LoggingError::UnsupportedLevel(level)) if level == "verbose"
        ));
    }

    #[test]
    fn relative_or_blank_directories_are_rejected() {
        assert!(matches!(
            LogTarget::from_dir(Some("logs/dev")),
            Err(LoggingError::InvalidDirectory(_))
        ));
        assert!(LogTarget::from_dir(Some("  ")).is_err());
        assert_eq!(LogTarget::from_dir(None).unwrap(), LogTarget::Stderr);
    }

    #[test]
    fn one_line_joins_and_caps() {
        assert_eq!(one_line("a\nb\r\nc", 20), "a b c");
        let capped = one_line("line1\nline2\rline3", 8);
        assert_eq!(capped, "line1 li...");
    }

    #[test]
    fn init_is_idempotent_and_rejects_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let log_dir_str = log_dir.to_str().unwrap().to_string();

        init_logging("info", "hotel_core_test", Some(&log_dir_str)).unwrap();
        init_logging("INFO", "hotel_core_test", Some(&log_dir_str)).unwrap();

        assert!(matches!(
            init_logging("debug", "hotel_core_test", Some(&log_dir_str)),
            Err(LoggingError::Conflict { .. })
        ));
        assert!(matches!(
            init_logging("info", "hotel_core_test", None),
            Err(LoggingError::Conflict { .. })
        ));

        let active = ACTIVE.get().unwrap();
        assert_eq!(active.level, LogLevel::Info);
        assert_eq!(active.target, LogTarget::Directory(log_dir));
    }
}
