use crate::taxonomy::Severity;
use chrono::Local;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Shared append target for every log line the crate produces. Writes one
/// `<timestamp> [<SEVERITY>] <message>` line to stdout and, when a log
/// file is configured, appends the same line there.
///
/// Clones share one sink: a single lock covers both the line write and
/// any file-handle swap, so concurrent callers never interleave partial
/// lines. Constructed explicitly and passed by reference; tests get
/// isolated sinks instead of shared global state.
#[derive(Clone)]
pub struct LogSink {
    file: Arc<Mutex<Option<File>>>,
}

impl LogSink {
    /// Stdout-only sink; attach a file later with `set_log_file`.
    pub fn new() -> Self {
        Self { file: Arc::new(Mutex::new(None)) }
    }

    pub fn log(&self, message: &str, severity: Severity) {
        let line = format!(
            "{} [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            severity,
            message
        );

        let mut file = self.file.lock();
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{line}");
        if let Some(file) = file.as_mut() {
            let _ = writeln!(file, "{line}");
            let _ = file.flush();
        }
    }

    /// Open `path` in append mode and route future lines there as well.
    /// Any previously configured file is closed; lines already written
    /// stay where they are.
    pub fn set_log_file<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        *self.file.lock() = Some(file);
        Ok(())
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(message.as_ref(), Severity::Info);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(message.as_ref(), Severity::Warning);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(message.as_ref(), Severity::Error);
    }

    pub fn critical(&self, message: impl AsRef<str>) {
        self.log(message.as_ref(), Severity::Critical);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log(tag: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("groundwork_{tag}_{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn stdout_only_sink_accepts_lines() {
        let sink = LogSink::new();
        sink.log("no file configured", Severity::Info);
        sink.warning("still fine");
    }

    #[test]
    fn line_format() {
        let path = temp_log("format");
        let sink = LogSink::new();
        sink.set_log_file(&path).unwrap();
        sink.log("boom", Severity::Error);

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        let line = lines.next().unwrap();
        assert!(lines.next().is_none());

        let (timestamp, rest) = line.split_once(" [").unwrap();
        assert_eq!(timestamp.len(), "2026-08-08 12:00:00".len());
        assert_eq!(&timestamp[4..5], "-");
        assert_eq!(&timestamp[10..11], " ");
        assert_eq!(rest, "ERROR] boom");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn severity_tags() {
        let path = temp_log("severity");
        let sink = LogSink::new();
        sink.set_log_file(&path).unwrap();
        sink.info("a");
        sink.warning("b");
        sink.error("c");
        sink.critical("d");

        let content = std::fs::read_to_string(&path).unwrap();
        let tags: Vec<&str> = content
            .lines()
            .map(|l| l.split_once(" [").unwrap().1.split_once("] ").unwrap().0)
            .collect();
        assert_eq!(tags, ["INFO", "WARNING", "ERROR", "CRITICAL"]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn set_log_file_switches_future_output_only() {
        let first = temp_log("switch_first");
        let second = temp_log("switch_second");

        let sink = LogSink::new();
        sink.set_log_file(&first).unwrap();
        sink.info("goes to first");
        sink.set_log_file(&second).unwrap();
        sink.info("goes to second");

        let first_content = std::fs::read_to_string(&first).unwrap();
        assert!(first_content.contains("goes to first"));
        assert!(!first_content.contains("goes to second"));

        let second_content = std::fs::read_to_string(&second).unwrap();
        assert!(second_content.contains("goes to second"));
        assert!(!second_content.contains("goes to first"));

        let _ = std::fs::remove_file(&first);
        let _ = std::fs::remove_file(&second);
    }

    #[test]
    fn concurrent_writers_never_interleave_lines() {
        let path = temp_log("concurrent");
        let sink = LogSink::new();
        sink.set_log_file(&path).unwrap();

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let sink = sink.clone();
                scope.spawn(move || {
                    for n in 0..25 {
                        sink.log(&format!("worker {worker} line {n}"), Severity::Info);
                    }
                });
            }
        });

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 8 * 25);
        for line in lines {
            let (_, rest) = line.split_once(" [INFO] ").unwrap();
            let mut words = rest.split(' ');
            assert_eq!(words.next(), Some("worker"));
            let worker: usize = words.next().unwrap().parse().unwrap();
            assert!(worker < 8);
            assert_eq!(words.next(), Some("line"));
            let n: usize = words.next().unwrap().parse().unwrap();
            assert!(n < 25);
            assert_eq!(words.next(), None);
        }

        let _ = std::fs::remove_file(&path);
    }
}
