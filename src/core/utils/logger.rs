use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use log::{LevelFilter, Log, Metadata, Record};

use crate::core::error::Result;

pub const LOG_LEVEL_ENV: &str = "RUST_GB_LOG";

/// 日誌設定；預設寫入 logs/emulator.log
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub dir: PathBuf,
    pub level: LevelFilter,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            dir: PathBuf::from("logs"),
            level: LevelFilter::Info,
        }
    }
}

impl LoggerConfig {
    /// 以環境變數 RUST_GB_LOG 覆寫等級，無法解析時沿用預設
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(level) = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|v| v.parse::<LevelFilter>().ok())
        {
            config.level = level;
        }
        config
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join("emulator.log")
    }
}

/// 將 log 紀錄附加到檔案的 `log::Log` 實作
#[derive(Debug)]
pub struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl FileLogger {
    pub fn open(config: &LoggerConfig) -> Result<Self> {
        if !Path::new(&config.dir).exists() {
            std::fs::create_dir_all(&config.dir)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())?;
        Ok(FileLogger {
            level: config.level,
            file: Mutex::new(file),
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{:<5} {}", record.level(), record.args());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<FileLogger> = OnceLock::new();

/// 安裝全域 logger；重複呼叫時保留第一次的設定
pub fn init(config: &LoggerConfig) -> Result<()> {
    if LOGGER.get().is_none() {
        let _ = LOGGER.set(FileLogger::open(config)?);
    }
    if let Some(logger) = LOGGER.get() {
        if log::set_logger(logger).is_ok() {
            log::set_max_level(logger.level);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_logs_dir() {
        let config = LoggerConfig::default();
        assert_eq!(config.log_path(), PathBuf::from("logs").join("emulator.log"));
        assert_eq!(config.level, LevelFilter::Info);
    }

    #[test]
    fn file_logger_filters_by_level() {
        let dir = std::env::temp_dir().join(format!("rust_gb_cb_log_{}", std::process::id()));
        let config = LoggerConfig {
            dir: dir.clone(),
            level: LevelFilter::Warn,
        };
        let logger = FileLogger::open(&config).unwrap();
        logger.log(
            &Record::builder()
                .level(log::Level::Warn)
                .args(format_args!("[MMU_READ] unmapped addr=C000"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(log::Level::Trace)
                .args(format_args!("[CB] 00: RLC B"))
                .build(),
        );
        logger.flush();
        let text = std::fs::read_to_string(config.log_path()).unwrap();
        assert!(text.contains("unmapped addr=C000"));
        assert!(!text.contains("RLC B"));
        let _ = std::fs::remove_dir_all(dir);
    }
}
