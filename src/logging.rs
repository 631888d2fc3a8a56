use std::env;
use std::io::{self, Write};
use std::sync::Mutex;
use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable selecting the log level
pub const LOG_LEVEL_ENV: &str = "SASS_EXPORT_LOG";

struct StderrLogger {
    level: LevelFilter,
    stderr: Mutex<io::Stderr>,
}

impl StderrLogger {
    fn new(level: LevelFilter) -> Self {
        StderrLogger {
            level,
            stderr: Mutex::new(io::stderr()),
        }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut stderr) = self.stderr.lock() {
                let _ = writeln!(
                    stderr,
                    "[{}] [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut stderr) = self.stderr.lock() {
            let _ = stderr.flush();
        }
    }
}

/// Parse a level name such as `debug` or `WARN`
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}

/// Pick the log level: debug when verbose, otherwise the environment
/// variable, falling back to warnings only
pub fn resolve_level(verbose: bool, env_value: Option<&str>) -> LevelFilter {
    if verbose {
        return LevelFilter::Debug;
    }
    env_value.and_then(parse_level).unwrap_or(LevelFilter::Warn)
}

/// Initialize the logger to write timestamped lines to stderr
pub fn init_logger(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_value = env::var(LOG_LEVEL_ENV).ok();
    let level = resolve_level(verbose, env_value.as_deref());

    log::set_boxed_logger(Box::new(StderrLogger::new(level)))
        .map(|()| log::set_max_level(level))?;

    Ok(())
}
