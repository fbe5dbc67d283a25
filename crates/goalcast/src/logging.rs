use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Maximum log file size before rotation (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Size to keep after rotation (1 MB of most recent logs)
const KEEP_SIZE: u64 = 1024 * 1024;

/// Rotate log file if it exceeds `max_size`, keeping the most recent `keep_size` bytes.
fn rotate_log_if_needed(log_path: &Path, max_size: u64, keep_size: u64) -> io::Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let metadata = fs::metadata(log_path)?;
    if metadata.len() <= max_size {
        return Ok(());
    }

    let mut file = File::open(log_path)?;
    let start_pos = metadata.len().saturating_sub(keep_size);

    file.seek(SeekFrom::Start(start_pos))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    drop(file);

    // Skip to the first newline to avoid partial lines
    let skip = buffer
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |i| i + 1);

    let mut file = File::create(log_path)?;
    file.write_all(b"--- Log rotated (older entries removed) ---\n")?;
    file.write_all(&buffer[skip..])?;

    Ok(())
}

/// Produces writers for a log file shared across threads
#[derive(Clone)]
struct LogWriterFactory {
    file: Arc<Mutex<File>>,
}

impl LogWriterFactory {
    fn new(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct LogWriter {
    file: Arc<Mutex<File>>,
}

impl LogWriter {
    fn lock(&self) -> io::Result<MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.flush()
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            file: self.file.clone(),
        }
    }
}

fn env_filter(level: &str) -> EnvFilter {
    let default_filter = format!("goalcast={level},goalcast_core=warn");
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter))
}

/// Initialize logging.
///
/// Events go to stderr, or are appended to `log_file` when one is given. An
/// oversized log file is trimmed to its most recent 1MB first. `RUST_LOG`
/// takes precedence over `level`.
pub fn init_logging(log_file: Option<&Path>, level: &str) -> color_eyre::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(level));

    match log_file {
        Some(log_path) => {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }

            if let Err(e) = rotate_log_if_needed(log_path, MAX_LOG_SIZE, KEEP_SIZE) {
                eprintln!("Warning: Failed to rotate log file: {e}");
            }

            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?;

            registry
                .with(
                    fmt::layer()
                        .with_writer(LogWriterFactory::new(file))
                        .with_ansi(false)
                        .with_target(true)
                        .with_thread_ids(false),
                )
                .init();

            tracing::info!(log_path = %log_path.display(), "logging initialized");
        }
        None => {
            registry
                .with(fmt::layer().with_writer(io::stderr).with_target(true))
                .init();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_small_log_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goalcast.log");
        fs::write(&path, "line one\nline two\n").unwrap();

        rotate_log_if_needed(&path, 1024, 16).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "line one\nline two\n");
    }

    #[test]
    fn test_rotation_keeps_whole_recent_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goalcast.log");
        fs::write(&path, "aaaaaaaaaa\nbbbbbbbbbb\ncccccccccc\n").unwrap();

        rotate_log_if_needed(&path, 20, 15).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("--- Log rotated"));
        assert!(content.ends_with("cccccccccc\n"));
        assert!(!content.contains("bbbb"));
    }

    #[test]
    fn test_missing_log_is_fine() {
        let dir = tempdir().unwrap();
        assert!(rotate_log_if_needed(&dir.path().join("absent.log"), 1, 1).is_ok());
    }

    #[test]
    fn test_shared_writer_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goalcast.log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .unwrap();

        let factory = LogWriterFactory::new(file);
        factory.make_writer().write_all(b"first\n").unwrap();
        factory.make_writer().write_all(b"second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
