use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

/// Opens the log file once. Later calls keep the first file.
pub fn init(path: &Path) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if logger.is_none()
        && let Ok(file) = OpenOptions::new().create(true).append(true).open(path)
    {
        *logger = Some(file);
    }
}

pub fn log(message: &str) {
    if let Ok(mut logger) = LOGGER.lock()
        && let Some(file) = logger.as_mut()
    {
        let _ = write_entry(file, message);
    }
}

fn write_entry(out: &mut impl Write, message: &str) -> std::io::Result<()> {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(out, "[{}] {}", timestamp, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_before_init_is_noop() {
        log("nobody is listening");
    }

    #[test]
    fn test_logger_init_and_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.log");
        // The only init call in the test suite, so this path wins.
        init(&path);
        log("Test log message");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("] Test log message\n"));
    }

    #[test]
    fn test_write_entry_format() {
        let mut out = Vec::new();
        write_entry(&mut out, "Loaded 3 words").unwrap();

        let line = String::from_utf8(out).unwrap();
        assert!(line.starts_with('['));
        assert!(line.ends_with("] Loaded 3 words\n"));
        // "[YYYY-MM-DD HH:MM:SS] "
        assert_eq!(line.find(']'), Some(20));
    }
}
