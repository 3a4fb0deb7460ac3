use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::{debug, trace, trace_span};

/// Reads `path` as UTF-8 and applies `transform` to its contents.
///
/// Every failure in here (open, read, decode, or a panic inside `transform`)
/// is confined to this one file and reported as `None`.
pub fn process_file<T, F>(path: &Path, transform: F) -> Option<T>
where
    F: FnOnce(&str) -> Option<T>,
{
    let _span = trace_span!("process_file", path = %path.display()).entered();

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            debug!("Skipping {}: {}", path.display(), e);
            return None;
        }
    };

    match panic::catch_unwind(AssertUnwindSafe(|| transform(&text))) {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            trace!("{} did not qualify", path.display());
            None
        }
        Err(_) => {
            debug!("Skipping {}: transform panicked", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::extract_openapi_stats;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_returns_transform_output() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.yaml");
        fs::write(&path, "hello").unwrap();

        assert_eq!(process_file(&path, |text| Some(text.len())), Some(5));
        assert_eq!(process_file(&path, |_| None::<usize>), None);
    }

    #[test]
    fn test_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gone.yaml");

        assert_eq!(process_file(&path, |_| Some(1)), None);
    }

    #[test]
    fn test_invalid_utf8_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.yaml");
        fs::write(&path, [0x6f, 0x70, 0xe9, 0xff, 0x0a]).unwrap();

        assert_eq!(process_file(&path, |_| Some(())), None);
    }

    #[test]
    fn test_directory_path_is_none() {
        let temp_dir = TempDir::new().unwrap();

        assert_eq!(process_file(temp_dir.path(), |_| Some(())), None);
    }

    #[test]
    fn test_panicking_transform_is_contained() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("boom.yaml");
        fs::write(&path, "x").unwrap();

        let result: Option<u8> = process_file(&path, |_| panic!("bad document"));
        assert_eq!(result, None);
    }

    #[test]
    fn test_rejection_reason_is_traced_with_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("swagger.yaml");
        fs::write(&path, "swagger: '2.0'\npaths: {}\n").unwrap();

        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || {
            process_file(&path, extract_openapi_stats)
        });
        assert_eq!(result, None);

        let logs = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Document rejected"), "{}", logs);
        assert!(logs.contains("not a 3.x version string"), "{}", logs);
        assert!(logs.contains("swagger.yaml"), "{}", logs);
    }
}
