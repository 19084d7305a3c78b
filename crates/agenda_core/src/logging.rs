//! Logging bootstrap for the contact book.
//!
//! # Responsibility
//! - Turn raw level/directory settings (usually from the environment) into a
//!   checked [`LogSettings`].
//! - Start the rotating file logger once per process.
//!
//! # Invariants
//! - Starting again with the same settings is a no-op; different settings
//!   are rejected.
//! - Nothing here panics.
//! - Events carry metadata only; contact field values are never logged.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable holding the log level.
pub const ENV_LOG_LEVEL: &str = "AGENDA_LOG_LEVEL";
/// Environment variable holding the absolute log directory.
pub const ENV_LOG_DIR: &str = "AGENDA_LOG_DIR";

const LOG_FILE_BASENAME: &str = "agenda";
const DEFAULT_LOG_DIR_NAME: &str = "agenda-logs";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 5;
const PANIC_SUMMARY_CHARS: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Why logging could not be started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnsupportedLevel(String),
    EmptyDir,
    RelativeDir(PathBuf),
    CreateDir { dir: PathBuf, message: String },
    Backend(String),
    /// Logging already runs with other settings.
    AlreadyActive {
        active: LogSettings,
        requested: LogSettings,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(raw) => write!(
                f,
                "unsupported log level `{raw}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyDir => write!(f, "log directory cannot be empty"),
            Self::RelativeDir(dir) => {
                write!(f, "log directory must be absolute, got `{}`", dir.display())
            }
            Self::CreateDir { dir, message } => write!(
                f,
                "failed to create log directory `{}`: {message}",
                dir.display()
            ),
            Self::Backend(message) => write!(f, "failed to start logger: {message}"),
            Self::AlreadyActive { active, requested } => write!(
                f,
                "logging already active with {active}; refusing to switch to {requested}"
            ),
        }
    }
}

impl Error for LoggingError {}

/// Checked logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub log_dir: PathBuf,
}

impl Display for LogSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "level {} at `{}`",
            self.level.as_str().to_ascii_lowercase(),
            self.log_dir.display()
        )
    }
}

/// Raw logging settings as read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub log_dir: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: default_log_dir().display().to_string(),
        }
    }
}

impl LogConfig {
    /// Reads [`ENV_LOG_LEVEL`] and [`ENV_LOG_DIR`]; unset or blank values
    /// fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`LogConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let pick = |key: &str, fallback: String| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(fallback)
        };
        Self {
            level: pick(ENV_LOG_LEVEL, defaults.level),
            log_dir: pick(ENV_LOG_DIR, defaults.log_dir),
        }
    }

    /// Checks the level name and requires an absolute, non-empty directory.
    /// `warning` is accepted as `warn`; `off` is rejected.
    pub fn resolve(&self) -> Result<LogSettings, LoggingError> {
        let raw_level = self.level.trim().to_ascii_lowercase();
        let level = match raw_level.as_str() {
            "warning" => LevelFilter::Warn,
            "off" => return Err(LoggingError::UnsupportedLevel(raw_level)),
            other => other
                .parse::<LevelFilter>()
                .map_err(|_| LoggingError::UnsupportedLevel(raw_level.clone()))?,
        };

        let raw_dir = self.log_dir.trim();
        if raw_dir.is_empty() {
            return Err(LoggingError::EmptyDir);
        }
        let log_dir = Path::new(raw_dir);
        if !log_dir.is_absolute() {
            return Err(LoggingError::RelativeDir(log_dir.to_path_buf()));
        }

        Ok(LogSettings {
            level,
            log_dir: log_dir.to_path_buf(),
        })
    }

    /// Starts logging with these settings.
    pub fn init(&self) -> Result<(), LoggingError> {
        let settings = self.resolve()?;
        if let Some(active) = ACTIVE_LOGGER.get() {
            return same_settings(&active.settings, &settings);
        }
        let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(&settings))?;
        // A concurrent caller may have started first with other settings.
        same_settings(&active.settings, &settings)
    }
}

/// Starts logging from raw `level` and `log_dir` strings.
///
/// # Errors
/// See [`LoggingError`]. Repeated calls with equivalent settings succeed.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), LoggingError> {
    LogConfig {
        level: level.to_string(),
        log_dir: log_dir.to_string(),
    }
    .init()
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// `<system temp dir>/agenda-logs`.
pub fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)
}

fn same_settings(active: &LogSettings, requested: &LogSettings) -> Result<(), LoggingError> {
    if active == requested {
        return Ok(());
    }
    Err(LoggingError::AlreadyActive {
        active: active.clone(),
        requested: requested.clone(),
    })
}

fn start_logger(settings: &LogSettings) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&settings.log_dir).map_err(|err| LoggingError::CreateDir {
        dir: settings.log_dir.clone(),
        message: err.to_string(),
    })?;

    let spec = LogSpecification::builder().default(settings.level).build();
    let handle = Logger::with(spec)
        .log_to_file(
            FileSpec::default()
                .directory(settings.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    PANIC_HOOK.get_or_init(log_panics);

    info!(
        "event=logging_init module=logging status=ok level={} log_dir={} version={} build={}",
        settings.level,
        settings.log_dir.display(),
        env!("CARGO_PKG_VERSION"),
        if cfg!(debug_assertions) { "debug" } else { "release" }
    );

    Ok(ActiveLogger {
        settings: settings.clone(),
        _handle: handle,
    })
}

/// Chains a hook that records panics as one log line before the default
/// report runs.
fn log_panics() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_info.payload().downcast_ref::<String>().map(String::as_str))
            .map(one_line_summary)
            .unwrap_or_else(|| "<non-string payload>".to_string());
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic module=agenda status=error location={} payload={}",
            location, payload
        );
        previous(panic_info);
    }));
}

/// Collapses whitespace runs (newlines included) to single spaces and caps
/// the result at [`PANIC_SUMMARY_CHARS`].
fn one_line_summary(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(PANIC_SUMMARY_CHARS) {
        Some((cut, _)) => format!("{}...", &collapsed[..cut]),
        None => collapsed,
    }
}
