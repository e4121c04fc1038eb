//! Run logging.
//!
//! One log file per run, timestamped in its name, with every entry echoed
//! to the console. The logger is an explicit handle constructed at the
//! entry point and passed by reference — no process-wide singleton.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::Result;

#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

pub struct ScrapeLogger {
    log_path: PathBuf,
}

impl ScrapeLogger {
    /// Create `dir` if needed and open a fresh, timestamp-named log file.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        Ok(Self {
            log_path: dir.join(format!("scrape_{stamp}.log")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn log(&self, level: LogLevel, event: &str, details: Option<&str>) -> Result<()> {
        let line = match details {
            Some(d) => format!(
                "{} - {} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                level.as_str(),
                event,
                d
            ),
            None => format!(
                "{} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                level.as_str(),
                event
            ),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{line}")?;
        println!("{line}");
        Ok(())
    }

    pub fn info(&self, event: &str, details: Option<&str>) -> Result<()> {
        self.log(LogLevel::Info, event, details)
    }

    pub fn warn(&self, event: &str, details: Option<&str>) -> Result<()> {
        self.log(LogLevel::Warn, event, details)
    }

    pub fn error(&self, event: &str, details: Option<&str>) -> Result<()> {
        self.log(LogLevel::Error, event, details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_land_in_the_run_file() {
        let dir = std::env::temp_dir().join(format!("ratelink-logs-{}", std::process::id()));
        let logger = ScrapeLogger::new(&dir).unwrap();
        logger.info("started", None).unwrap();
        logger.warn("no rooms found on page", Some("zero offers")).unwrap();

        let contents = fs::read_to_string(logger.path()).unwrap();
        assert!(contents.contains("INFO - started"));
        assert!(contents.contains("WARN - no rooms found on page - zero offers"));
        let _ = fs::remove_dir_all(&dir);
    }
}
