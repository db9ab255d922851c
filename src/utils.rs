use anyhow::{Context, Result};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::time::Duration;

/// Formats byte count in human-readable form (e.g., "10.00 MB")
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Formats a window in seconds without trailing zeros (3000ms -> "3", 100ms -> "0.1")
pub fn format_window(window: Duration) -> String {
    format!("{}", window.as_secs_f64())
}

/// Appends timestamped lines to an audit file.
pub struct Logger {
    file_path: String,
}

impl Logger {
    pub fn new(file_path: &str) -> Self {
        Self {
            file_path: file_path.to_string(),
        }
    }

    pub fn log(&self, message: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .with_context(|| format!("Failed to open log file {}", self.file_path))?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "[{}] {}", timestamp, message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(10 * 1024 * 1024), "10.00 MB");
    }

    #[test]
    fn test_format_window() {
        assert_eq!(format_window(Duration::from_millis(3000)), "3");
        assert_eq!(format_window(Duration::from_millis(100)), "0.1");
        assert_eq!(format_window(Duration::from_millis(1500)), "1.5");
    }

    #[test]
    fn test_logger() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let log_path = dir.path().join("bench.log");
        let logger = Logger::new(log_path.to_str().unwrap());

        logger.log("Test message 1")?;
        logger.log("Test message 2")?;

        let content = fs::read_to_string(&log_path)?;
        assert!(content.contains("Test message 1"));
        assert!(content.contains("Test message 2"));
        assert!(content.starts_with('[')); // Timestamp check
        Ok(())
    }
}
