//! Pluggable logger для симуляции
//!
//! Симуляция не знает кто печатает логи (консоль, host-движок, тестовый буфер).
//! Host устанавливает свой `LogPrinter` через `set_logger`, симуляция пишет
//! через `log` / `log_info` / `log_warning` / `log_error`.
//!
//! Порог уровня (`set_log_level`) отсекает сообщения ниже threshold
//! ещё до форматирования timestamp.

use once_cell::sync::Lazy;
use std::sync::Mutex;

static LOGGER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

static LOGGER_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

/// Уровень логирования (упорядочен: Debug < Info < Warning < Error)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Приёмник логов (консоль, host engine console, тестовый collector)
pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

pub fn set_logger(logger: Box<dyn LogPrinter>) {
    if let Ok(mut slot) = LOGGER.lock() {
        *slot = Some(logger);
    }
}

pub fn set_logger_if_needed(logger: Box<dyn LogPrinter>) {
    if let Ok(mut slot) = LOGGER.lock() {
        if slot.is_none() {
            *slot = Some(logger);
        }
    }
}

pub fn set_log_level(level: LogLevel) {
    if let Ok(mut threshold) = LOGGER_LEVEL.lock() {
        *threshold = level;
    }
}

pub fn log_level() -> LogLevel {
    LOGGER_LEVEL
        .lock()
        .map(|level| *level)
        .unwrap_or(LogLevel::Debug)
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    if level < log_level() {
        return;
    }

    // Poisoned mutex → сообщение теряется, симуляция не падает
    let Ok(slot) = LOGGER.lock() else {
        return;
    };

    if let Some(logger) = slot.as_ref() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        logger.log(level, &format!("[{}] {}", timestamp, message));
    }
}

/// Вывод в stdout (headless binary, тесты)
pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_log_level_names() {
        assert_eq!(LogLevel::Warning.as_str(), "WARNING");
        assert_eq!(LogLevel::Error.as_str(), "ERROR");
    }

    /// Тестовый collector: запоминает только сообщения со своим тегом
    struct CollectingLogger {
        tag: &'static str,
        lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
    }

    impl LogPrinter for CollectingLogger {
        fn log(&self, level: LogLevel, message: &str) {
            if !message.contains(self.tag) {
                return;
            }
            if let Ok(mut lines) = self.lines.lock() {
                lines.push((level, message.to_string()));
            }
        }
    }

    #[test]
    fn test_threshold_drops_lower_levels() {
        const TAG: &str = "[threshold-test]";
        let lines = Arc::new(Mutex::new(Vec::new()));
        set_logger(Box::new(CollectingLogger {
            tag: TAG,
            lines: Arc::clone(&lines),
        }));

        set_log_level(LogLevel::Warning);
        log(&format!("{} debug", TAG));
        log_info(&format!("{} info", TAG));
        log_warning(&format!("{} warning", TAG));
        log_error(&format!("{} error", TAG));
        set_log_level(LogLevel::Debug);

        let levels: Vec<LogLevel> = lines.lock().unwrap().iter().map(|(level, _)| *level).collect();
        assert_eq!(levels, vec![LogLevel::Warning, LogLevel::Error]);

        // Порог снят → debug снова проходит
        log(&format!("{} debug again", TAG));
        assert_eq!(lines.lock().unwrap().len(), 3);

        set_logger(Box::new(ConsoleLogger));
    }
}
